#![doc(test(attr(deny(warnings))))]

//! Expense Tracker records dated, categorized expenses in a local JSON file
//! and derives month-filtered views with per-category totals.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{ExpenseSummary, ExpenseTracker, FilteredExpense};
pub use errors::{ExpenseError, Result};
pub use ledger::{Category, Expense, ExpenseDraft, MonthSelector};
pub use storage::{ExpenseStorage, JsonFileStore};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense Tracker tracing initialized.");
    });
}
