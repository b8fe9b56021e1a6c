use dirs::home_dir;
use std::{
    env,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".expense_tracker";
const DATA_FILE: &str = "expenses.json";
const CONFIG_FILE: &str = "config.json";
const BACKUP_DIR: &str = "backups";
const HISTORY_FILE: &str = "history.txt";

/// Returns the application data directory, defaulting to `~/.expense_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("EXPENSE_TRACKER_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn data_file_in(base: &Path) -> PathBuf {
    base.join(DATA_FILE)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn backup_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

pub fn history_file_in(base: &Path) -> PathBuf {
    base.join(HISTORY_FILE)
}
