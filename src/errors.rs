use std::path::PathBuf;

use thiserror::Error;

/// Error type that captures expense persistence and input failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt data in `{}`: {reason}", .path.display())]
    CorruptData { path: PathBuf, reason: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;

impl ExpenseError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ExpenseError::CorruptData {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
