pub mod json_backend;

use crate::{errors::Result, ledger::Expense};

/// Abstraction over the durable mirror of the expense list.
pub trait ExpenseStorage {
    /// Reads every persisted expense in stored order; an absent store is empty.
    fn load(&self) -> Result<Vec<Expense>>;

    /// Replaces the persisted contents with `expenses`.
    fn save(&self, expenses: &[Expense]) -> Result<()>;
}

pub use json_backend::JsonFileStore;
