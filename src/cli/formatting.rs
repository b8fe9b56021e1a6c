use chrono::NaiveDate;

use crate::{core::ExpenseSummary, ledger::Expense};

const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";
const BAR_WIDTH: usize = 24;

pub fn format_amount(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// One list line: `  1. Coffee  ₹4.50 | Food | 05 Mar 2024`.
pub fn format_row(row: usize, expense: &Expense, symbol: &str) -> String {
    format!(
        "{:>3}. {}  {} | {} | {}",
        row,
        expense.title,
        format_amount(symbol, expense.amount),
        expense.category,
        format_date(expense.date)
    )
}

pub fn total_line(summary: &ExpenseSummary<'_>, symbol: &str) -> String {
    format!(
        "Total for {}: {}",
        summary.selector,
        format_amount(symbol, summary.grand_total)
    )
}

/// Category breakdown lines with each category's share of the grand total.
pub fn breakdown_lines(summary: &ExpenseSummary<'_>, symbol: &str) -> Vec<String> {
    let width = summary
        .category_totals
        .keys()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    summary
        .category_totals
        .iter()
        .map(|(category, amount)| {
            let mut line = format!(
                "{:<width$}  {:>12}",
                category,
                format_amount(symbol, amount),
                width = width
            );
            if let Some(share) = share_of(amount, summary.grand_total) {
                line.push_str(&format!("  {:>5.1}%  {}", share * 100.0, bar(share)));
            }
            line
        })
        .collect()
}

fn share_of(amount: f64, total: f64) -> Option<f64> {
    if total <= 0.0 || amount < 0.0 {
        return None;
    }
    Some((amount / total).min(1.0))
}

fn bar(share: f64) -> String {
    let filled = (share * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled.min(BAR_WIDTH))
}
