use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::{fs, path::Path};
use tempfile::tempdir;

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expense_tracker_cli").unwrap();
    cmd.env("EXPENSE_TRACKER_CLI_SCRIPT", "1")
        .env("EXPENSE_TRACKER_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_adds_filters_and_summarizes() {
    let home = tempdir().unwrap();
    let input = "\
add Coffee 4.50 food 2024-03-05
add Bus 2 Transport 2024-03-06
filter March
summary
list April
exit
";

    cli(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Added `Coffee`"))
        .stdout(contains("  1. Coffee  ₹4.50 | Food | 05 Mar 2024"))
        .stdout(contains("  2. Bus  ₹2.00 | Transport | 06 Mar 2024"))
        .stdout(contains("Total for March: ₹6.50"))
        .stdout(contains("Total for April: ₹0.00"));

    let json = fs::read_to_string(home.path().join("expenses.json")).unwrap();
    assert!(json.contains("\"date\": \"2024-03-05\""));
    assert!(json.contains("\"category\": \"Food\""));
}

#[test]
fn delete_uses_row_numbers_of_the_filtered_view() {
    let home = tempdir().unwrap();
    let input = "\
add Movie 12 Entertainment 2024-04-01
add Coffee 4.5 Food 2024-03-05
add Bus 2 Transport 2024-03-06
filter March
delete 2
filter All
exit
";

    cli(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Deleted `Bus`"))
        .stdout(contains("Total for All: ₹16.50"));

    let json = fs::read_to_string(home.path().join("expenses.json")).unwrap();
    assert!(json.contains("Movie"));
    assert!(json.contains("Coffee"));
    assert!(!json.contains("Bus"));
}

#[test]
fn invalid_input_is_reported_and_nothing_is_saved() {
    let home = tempdir().unwrap();
    let input = "\
add Coffee lots Food 2024-03-05
add Coffee 4.5 Snacks 2024-03-05
add Coffee 4.5 Food 2024-02-30
delete 1
frobnicate
list
";

    cli(home.path())
        .write_stdin(input)
        .assert()
        .success()
        .stderr(contains("Invalid amount"))
        .stderr(contains("Invalid category"))
        .stderr(contains("Invalid date"))
        .stderr(contains("Expense not found"))
        .stderr(contains("Unknown command `frobnicate`"))
        .stdout(contains("No expenses recorded."));

    assert!(!home.path().join("expenses.json").exists());
}

#[test]
fn quoted_titles_keep_their_spaces() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("add \"Team lunch\" 30 Food 2024-05-02\nlist May\n")
        .assert()
        .success()
        .stdout(contains("1. Team lunch  ₹30.00 | Food | 02 May 2024"));
}

#[test]
fn corrupt_data_file_aborts_startup() {
    let home = tempdir().unwrap();
    fs::write(
        home.path().join("expenses.json"),
        r#"[{"title": "Coffee", "amount": 4.5, "category": "Food", "date": "2024-13-40"}]"#,
    )
    .unwrap();

    cli(home.path())
        .write_stdin("list\n")
        .assert()
        .failure()
        .stderr(contains("Corrupt data"))
        .stderr(contains("2024-13-40"));
}

#[test]
fn config_changes_persist_between_sessions() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("config set currency_symbol $\nconfig set default_month March\n")
        .assert()
        .success()
        .stdout(contains("Updated `currency_symbol`."));

    cli(home.path())
        .write_stdin("add Coffee 4.5 Food 2024-03-05\nlist\n")
        .assert()
        .success()
        .stdout(contains("Expenses for March"))
        .stdout(contains("Total for March: $4.50"));
}

#[test]
fn help_lists_commands() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("help\nhelp add\n")
        .assert()
        .success()
        .stdout(contains("summary").and(contains("usage: add <title> <amount> <category>")));
}
