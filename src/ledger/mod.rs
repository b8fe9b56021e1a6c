//! Expense domain models and input parsing helpers.

pub mod category;
pub mod expense;
pub mod month;

pub use category::Category;
pub use expense::{parse_amount, parse_date, Expense, ExpenseDraft, DATE_FORMAT};
pub use month::MonthSelector;
