use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{ExpenseError, Result},
    utils::{atomic_write::write_atomic, paths},
};

/// User preferences for the expense shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Expense file location. Defaults to `<app dir>/expenses.json`.
    pub data_file: Option<PathBuf>,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_month")]
    pub default_month: String,
    #[serde(default)]
    pub backup_retention: usize,
    #[serde(default = "Config::default_color_output")]
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_symbol: Self::default_currency_symbol(),
            default_month: Self::default_month(),
            backup_retention: 0,
            color_output: Self::default_color_output(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_month() -> String {
        "All".into()
    }

    pub fn default_color_output() -> bool {
        true
    }

    pub fn resolve_data_file(&self, base: &Path) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| paths::data_file_in(base))
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "data_file" => {
                self.data_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "default_month" => self.default_month = value.to_string(),
            "backup_retention" => {
                self.backup_retention = value.parse().map_err(|_| {
                    ExpenseError::Config(format!("backup_retention expects a count, got `{value}`"))
                })?;
            }
            "color_output" => {
                self.color_output = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => {
                        return Err(ExpenseError::Config(format!(
                            "color_output expects on/off, got `{value}`"
                        )))
                    }
                };
            }
            other => return Err(ExpenseError::Config(format!("unknown setting `{other}`"))),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "data_file",
                self.data_file
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "(default)".into()),
            ),
            ("currency_symbol", self.currency_symbol.clone()),
            ("default_month", self.default_month.clone()),
            ("backup_retention", self.backup_retention.to_string()),
            ("color_output", self.color_output.to_string()),
        ]
    }
}

/// Loads and saves [`Config`] as JSON inside the application directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        Self {
            path: paths::config_file_in(base.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            ExpenseError::Config(format!("{}: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ExpenseError::Config(err.to_string()))?;
        write_atomic(&self.path, &json)
    }
}
