#![allow(dead_code)]

use chrono::NaiveDate;
use expense_tracker::Expense;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn coffee() -> Expense {
    Expense::new("Coffee", 4.50, "Food", date(2024, 3, 5))
}

pub fn bus() -> Expense {
    Expense::new("Bus", 2.00, "Transport", date(2024, 3, 6))
}

/// A mixed list spanning several months, categories and a duplicate entry.
pub fn mixed_expenses() -> Vec<Expense> {
    vec![
        coffee(),
        Expense::new("Rent", 950.0, "Rent", date(2024, 1, 1)),
        bus(),
        Expense::new("Cinema", 11.75, "Entertainment", date(2024, 4, 12)),
        coffee(),
        Expense::new("Umbrella", 0.0, "Other", date(2023, 3, 30)),
        Expense::new("Gift", 25.0, "Presents", date(2024, 12, 24)),
    ]
}
