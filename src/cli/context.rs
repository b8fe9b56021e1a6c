use std::{
    io,
    path::{Path, PathBuf},
};

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::{
    cli::{commands, output, registry::CommandRegistry},
    config::{Config, ConfigManager},
    core::ExpenseTracker,
    errors::ExpenseError,
    ledger::MonthSelector,
    storage::JsonFileStore,
    utils::paths,
};

/// Fatal shell errors that end the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error("Terminal error: {0}")]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors reported for a single command; the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Core(#[from] ExpenseError),
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Session state shared by every command handler.
pub struct ShellContext {
    pub tracker: ExpenseTracker,
    pub config: Config,
    pub selector: MonthSelector,
    pub running: bool,
    pub(crate) registry: CommandRegistry,
    config_manager: ConfigManager,
    base_dir: PathBuf,
    data_file: PathBuf,
}

impl ShellContext {
    pub fn new() -> Result<Self, CliError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    /// Builds the session from `base`, loading config and expenses.
    /// Corrupt expense data aborts startup rather than starting empty.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(&base);
        let config = config_manager.load()?;
        output::set_color_enabled(config.color_output);

        let data_file = config.resolve_data_file(&base);
        let mut store = JsonFileStore::new(&data_file);
        if config.backup_retention > 0 {
            store = store.with_backups(paths::backup_dir_in(&base), config.backup_retention);
        }
        let tracker = ExpenseTracker::open(Box::new(store))?;

        let selector = MonthSelector::parse(&config.default_month);
        let mut registry = CommandRegistry::new();
        for entry in commands::definitions() {
            registry.register(entry);
        }

        Ok(Self {
            tracker,
            config,
            selector,
            running: true,
            registry,
            config_manager,
            base_dir: base,
            data_file,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("expenses [{}]> ", self.selector)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let handler = self
            .registry
            .handler(command)
            .ok_or_else(|| CommandError::UnknownCommand(command.to_string()))?;
        handler(self, args)?;
        if self.running {
            Ok(LoopControl::Continue)
        } else {
            Ok(LoopControl::Exit)
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::UnknownCommand(name) => {
                output::error(format!("Unknown command `{name}`"));
                output::hint("Type `help` to list available commands.");
            }
            CommandError::Core(ExpenseError::Io(io)) => {
                output::error(format!("Could not save expenses: {io}"));
                output::hint("The change was not applied.");
            }
            other => output::error(other),
        }
    }
}
