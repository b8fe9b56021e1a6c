//! Line-oriented shell over the expense tracker.

pub mod commands;
pub mod context;
pub mod formatting;
pub mod output;
pub mod registry;
mod shell;

pub use context::{CliError, CliMode, CommandError, ShellContext};
pub use shell::run_cli;
