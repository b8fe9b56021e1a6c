use chrono::{Local, NaiveDate};

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::formatting::{breakdown_lines, format_amount, format_date, format_row, total_line};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::ledger::{parse_date, Category, ExpenseDraft, MonthSelector};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add <title> <amount> <category> [YYYY-MM-DD|today]",
            cmd_add,
        ),
        CommandEntry::new(
            "list",
            "List expenses for the current or given month",
            "list [month|All]",
            cmd_list,
        ),
        CommandEntry::new(
            "delete",
            "Delete an expense by its row number in the current list",
            "delete <row>",
            cmd_delete,
        ),
        CommandEntry::new(
            "filter",
            "Show or change the month filter",
            "filter [month|All]",
            cmd_filter,
        ),
        CommandEntry::new(
            "summary",
            "Show category totals for the current or given month",
            "summary [month|All]",
            cmd_summary,
        ),
        CommandEntry::new(
            "categories",
            "List the categories accepted by `add`",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new("months", "List month filter values", "months", cmd_months),
        CommandEntry::new(
            "config",
            "Show or change settings",
            "config [show|set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandEntry::new("quit", "Exit the shell", "quit", cmd_exit),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (title, amount, category) = match args {
        [title, amount, category] | [title, amount, category, _] => (*title, *amount, *category),
        _ => return Err(usage_error("add")),
    };
    let date = match args.get(3) {
        Some(raw) => resolve_date(raw)?,
        None => today(),
    };

    let id = context
        .tracker
        .add_draft(ExpenseDraft::new(title, amount, category, date))?;
    if let Some(expense) = context.tracker.get(id) {
        output::success(format!(
            "Added `{}` ({}, {}, {})",
            expense.title,
            format_amount(&context.config.currency_symbol, expense.amount),
            expense.category,
            format_date(expense.date)
        ));
    }
    let summary = context.tracker.summary(&context.selector);
    output::info(total_line(&summary, &context.config.currency_symbol));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selector = selector_arg(context, args);
    render_list(context, &selector);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row = match args {
        [raw] => raw
            .parse::<usize>()
            .ok()
            .filter(|row| *row > 0)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!("`{raw}` is not a row number"))
            })?,
        _ => return Err(usage_error("delete")),
    };
    let selector = context.selector.clone();
    let removed = context.tracker.remove_row(&selector, row - 1)?;
    output::success(format!(
        "Deleted `{}` ({}, {})",
        removed.title,
        format_amount(&context.config.currency_symbol, removed.amount),
        format_date(removed.date)
    ));
    render_list(context, &selector);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        output::info(format!("Current filter: {}", context.selector));
        return Ok(());
    }
    let selector = MonthSelector::parse(&args.join(" "));
    if !selector.is_recognized() {
        output::warning(format!(
            "`{selector}` is not a month name; no expenses will match."
        ));
    }
    context.selector = selector.clone();
    render_list(context, &selector);
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selector = selector_arg(context, args);
    let symbol = &context.config.currency_symbol;
    let summary = context.tracker.summary(&selector);
    output::section(format!("Summary for {}", summary.selector));
    if summary.is_empty() {
        output::info("No expenses recorded.");
    } else {
        for line in breakdown_lines(&summary, symbol) {
            output::detail(line);
        }
    }
    output::info(total_line(&summary, symbol));
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Categories");
    for category in Category::ALL {
        output::detail(category);
    }
    Ok(())
}

fn cmd_months(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Month filters");
    for label in MonthSelector::labels() {
        output::detail(label);
    }
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output::section("Configuration");
            output::detail(format!("config file: {}", context.config_manager().path().display()));
            output::detail(format!("data file: {}", context.data_file().display()));
            for (key, value) in context.config.entries() {
                output::detail(format!("{key} = {value}"));
            }
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let mut updated = context.config.clone();
            updated.set(key, &value.join(" "))?;
            context.config_manager().save(&updated)?;
            context.config = updated;
            match *key {
                "color_output" => output::set_color_enabled(context.config.color_output),
                "data_file" | "backup_retention" | "default_month" => {
                    output::hint("Takes effect the next time the shell starts.")
                }
                _ => {}
            }
            output::success(format!("Updated `{key}`."));
            Ok(())
        }
        _ => Err(usage_error("config")),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Expense Tracker {}", meta.version));
    output::detail(format!("Build hash : {}", meta.git_hash));
    output::detail(format!("Built at   : {}", meta.timestamp));
    output::detail(format!("Profile    : {}", meta.profile));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        let entry = context
            .registry
            .get(&name)
            .ok_or_else(|| CommandError::UnknownCommand(name.clone()))?;
        output::section(format!("Help: {}", entry.name));
        output::detail(entry.description);
        output::detail(format!("usage: {}", entry.usage));
        return Ok(());
    }

    output::section("Available commands");
    for entry in context.registry.list() {
        output::detail(format!("{:<12} {}", entry.name, entry.description));
    }
    output::info("Use `help <command>` for details.");
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.running = false;
    Ok(())
}

fn render_list(context: &ShellContext, selector: &MonthSelector) {
    let symbol = &context.config.currency_symbol;
    let summary = context.tracker.summary(selector);
    output::section(format!("Expenses for {}", summary.selector));
    if summary.is_empty() {
        output::info("No expenses recorded.");
    }
    for (row, entry) in summary.entries.iter().enumerate() {
        output::info(format_row(row + 1, entry.expense, symbol));
    }
    output::info(total_line(&summary, symbol));
}

fn selector_arg(context: &ShellContext, args: &[&str]) -> MonthSelector {
    if args.is_empty() {
        context.selector.clone()
    } else {
        MonthSelector::parse(&args.join(" "))
    }
}

fn resolve_date(raw: &str) -> Result<NaiveDate, CommandError> {
    if raw.eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    Ok(parse_date(raw)?)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn usage_error(command: &str) -> CommandError {
    let usage = definitions()
        .into_iter()
        .find(|entry| entry.name == command)
        .map(|entry| entry.usage)
        .unwrap_or(command);
    CommandError::InvalidArguments(format!("usage: {usage}"))
}
