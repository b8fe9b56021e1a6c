pub mod aggregator;
pub mod tracker;

pub use aggregator::{
    category_totals, filter_by_month, grand_total, summarize, CategoryTotals, ExpenseSummary,
    FilteredExpense,
};
pub use tracker::ExpenseTracker;
