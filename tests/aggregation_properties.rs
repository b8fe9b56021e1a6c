mod common;

use chrono::Datelike;
use common::{bus, coffee, mixed_expenses};
use expense_tracker::{
    core::{category_totals, filter_by_month, grand_total},
    Expense, ExpenseStorage, ExpenseTracker, JsonFileStore, MonthSelector,
};
use tempfile::tempdir;

fn every_selector() -> Vec<MonthSelector> {
    let mut selectors: Vec<_> = MonthSelector::labels()
        .into_iter()
        .map(MonthSelector::parse)
        .collect();
    selectors.push(MonthSelector::parse("Nonsense"));
    selectors
}

#[test]
fn filter_is_sound_and_complete_for_every_selector() {
    let expenses = mixed_expenses();
    for selector in every_selector() {
        let filtered = filter_by_month(&expenses, &selector);
        for entry in &filtered {
            assert!(selector.matches(entry.expense.date));
            assert_eq!(entry.expense, &expenses[entry.index]);
        }
        let expected: Vec<usize> = expenses
            .iter()
            .enumerate()
            .filter(|(_, expense)| match &selector {
                MonthSelector::All => true,
                MonthSelector::Month(month) => expense.date.month() == month.number_from_month(),
                MonthSelector::Unrecognized(_) => false,
            })
            .map(|(index, _)| index)
            .collect();
        let actual: Vec<usize> = filtered.iter().map(|entry| entry.index).collect();
        assert_eq!(actual, expected, "selector {selector}");
    }
}

#[test]
fn month_filter_ignores_year() {
    let expenses = mixed_expenses();
    let march = filter_by_month(&expenses, &MonthSelector::parse("March"));
    let years: Vec<i32> = march.iter().map(|entry| entry.expense.date.year()).collect();
    assert!(years.contains(&2023));
    assert!(years.contains(&2024));
}

#[test]
fn grand_total_equals_sum_of_category_totals() {
    let expenses = mixed_expenses();
    for selector in every_selector() {
        let filtered = filter_by_month(&expenses, &selector);
        let totals = category_totals(&filtered);
        let by_category: f64 = totals.values().sum();
        assert!(
            (grand_total(&filtered) - by_category).abs() < 1e-9,
            "selector {selector}"
        );
    }
}

#[test]
fn lax_categories_are_grouped_like_any_other() {
    let expenses = mixed_expenses();
    let totals = category_totals(&filter_by_month(&expenses, &MonthSelector::All));
    assert_eq!(totals["Presents"], 25.0);
    assert_eq!(totals["Food"], 9.0);
}

#[test]
fn indices_stay_aligned_after_deletions() {
    let temp = tempdir().unwrap();
    let mut tracker =
        ExpenseTracker::open(Box::new(JsonFileStore::new(temp.path().join("e.json")))).unwrap();
    for expense in mixed_expenses() {
        tracker.add(expense).unwrap();
    }
    let march = MonthSelector::parse("March");

    while !tracker.filtered(&march).is_empty() {
        tracker.remove_row(&march, 0).unwrap();
        for selector in every_selector() {
            for entry in tracker.filtered(&selector) {
                assert_eq!(entry.expense.id, tracker.expenses()[entry.index].id);
            }
        }
    }
    assert_eq!(tracker.len(), mixed_expenses().len() - 4);
    assert!(tracker
        .expenses()
        .iter()
        .all(|expense| !march.matches(expense.date)));
}

#[test]
fn deleting_a_duplicate_removes_only_the_chosen_one() {
    let temp = tempdir().unwrap();
    let mut tracker =
        ExpenseTracker::open(Box::new(JsonFileStore::new(temp.path().join("e.json")))).unwrap();
    let first = tracker.add(coffee()).unwrap();
    let second = tracker.add(coffee()).unwrap();

    tracker.remove(second).unwrap();
    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.expenses()[0].id, first);
}

#[test]
fn coffee_and_bus_scenario() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("expenses.json");
    let mut tracker = ExpenseTracker::open(Box::new(JsonFileStore::new(&path))).unwrap();
    tracker.add(coffee()).unwrap();
    tracker.add(bus()).unwrap();

    let march = tracker.summary(&MonthSelector::parse("March"));
    let titles: Vec<&str> = march
        .entries
        .iter()
        .map(|entry| entry.expense.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Coffee", "Bus"]);
    assert_eq!(march.category_totals.len(), 2);
    assert_eq!(march.category_totals["Food"], 4.50);
    assert_eq!(march.category_totals["Transport"], 2.00);
    assert_eq!(march.grand_total, 6.50);

    let april = tracker.summary(&MonthSelector::parse("April"));
    assert!(april.entries.is_empty());
    assert!(april.category_totals.is_empty());
    assert_eq!(april.grand_total, 0.0);

    let persisted: Vec<Expense> = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(persisted.len(), 2);
}
