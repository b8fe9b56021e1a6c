//! Derived views over the expense list: month filtering and per-category sums.
//!
//! Everything here is a pure function of its inputs; callers recompute the
//! views after every mutation instead of caching them.

use std::ops::Index;

use crate::ledger::{Expense, MonthSelector};

/// Summed amount per category label, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    totals: Vec<(String, f64)>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `category`, appending the category if it is new.
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.totals.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += amount,
            None => self.totals.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.totals
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    pub fn contains_key(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(name, _)| name)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|(_, total)| total)
    }
}

impl Index<&str> for CategoryTotals {
    type Output = f64;

    fn index(&self, category: &str) -> &f64 {
        match self.totals.iter().find(|(name, _)| name == category) {
            Some((_, total)) => total,
            None => panic!("no total for category `{}`", category),
        }
    }
}

/// An expense selected by a filter, paired with its position in the full list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredExpense<'a> {
    pub index: usize,
    pub expense: &'a Expense,
}

/// Everything a render pass needs for one month selector.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary<'a> {
    pub selector: MonthSelector,
    pub entries: Vec<FilteredExpense<'a>>,
    pub category_totals: CategoryTotals,
    pub grand_total: f64,
}

impl ExpenseSummary<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn filter_by_month<'a>(
    expenses: &'a [Expense],
    selector: &MonthSelector,
) -> Vec<FilteredExpense<'a>> {
    expenses
        .iter()
        .enumerate()
        .filter(|(_, expense)| selector.matches(expense.date))
        .map(|(index, expense)| FilteredExpense { index, expense })
        .collect()
}

/// Categories with no entries in `filtered` are absent rather than zero.
pub fn category_totals(filtered: &[FilteredExpense<'_>]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for entry in filtered {
        totals.add(&entry.expense.category, entry.expense.amount);
    }
    totals
}

pub fn grand_total(filtered: &[FilteredExpense<'_>]) -> f64 {
    filtered.iter().map(|entry| entry.expense.amount).sum()
}

pub fn summarize<'a>(expenses: &'a [Expense], selector: &MonthSelector) -> ExpenseSummary<'a> {
    let entries = filter_by_month(expenses, selector);
    let category_totals = category_totals(&entries);
    let grand_total = grand_total(&entries);
    ExpenseSummary {
        selector: selector.clone(),
        entries,
        category_totals,
        grand_total,
    }
}
