use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::{ExpenseError, Result};

use super::category::Category;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One dated, categorized monetary entry.
///
/// `id` is assigned when the record enters a session (created or loaded) and
/// is never written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category: category.into(),
            date,
        }
    }

    /// Compares every persisted field, ignoring the session identifier.
    pub fn same_entry(&self, other: &Expense) -> bool {
        self.title == other.title
            && self.amount == other.amount
            && self.category == other.category
            && self.date == other.date
    }
}

/// Raw form input for a new expense, validated by [`ExpenseDraft::validate`].
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            amount: amount.into(),
            category: category.into(),
            date,
        }
    }

    pub fn validate(self) -> Result<Expense> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ExpenseError::InvalidInput("title must not be empty".into()));
        }
        let amount = parse_amount(&self.amount)?;
        let category: Category = self.category.parse()?;
        Ok(Expense::new(title, amount, category.as_str(), self.date))
    }
}

pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ExpenseError::InvalidAmount(format!("`{}` is not a number", trimmed)))?;
    if !value.is_finite() {
        return Err(ExpenseError::InvalidAmount(format!(
            "`{}` is not a finite number",
            trimmed
        )));
    }
    Ok(value)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ExpenseError::InvalidDate(format!("`{}` is not a YYYY-MM-DD date", trimmed)))
}
