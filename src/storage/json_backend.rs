use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{ExpenseError, Result},
    ledger::{Category, Expense, DATE_FORMAT},
    utils::atomic_write::write_atomic,
};

use super::ExpenseStorage;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const BACKUP_TIMESTAMP_LEN: usize = 15;

/// Whole-file JSON persistence for the expense list.
///
/// Every save rewrites the file through a sibling temporary file that is
/// renamed into place. When `retention` is non-zero the previous file is
/// copied into `backups_dir` first and only the newest `retention` copies are
/// kept.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    backups_dir: Option<PathBuf>,
    retention: usize,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backups_dir: None,
            retention: 0,
        }
    }

    pub fn with_backups(mut self, backups_dir: impl Into<PathBuf>, retention: usize) -> Self {
        self.backups_dir = Some(backups_dir.into());
        self.retention = retention;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Backup files for this store, newest first.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>> {
        let dir = match &self.backups_dir {
            Some(dir) if dir.exists() => dir,
            _ => return Ok(Vec::new()),
        };
        let prefix = format!("{}_", self.file_stem());
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let matches_store = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(&prefix))
                .unwrap_or(false);
            if matches_store {
                entries.push(path);
            }
        }
        entries.sort_by_key(|path| Reverse(backup_sort_key(path, &prefix)));
        Ok(entries)
    }

    fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("expenses")
            .to_string()
    }

    fn backup_existing_file(&self) -> Result<()> {
        let dir = match &self.backups_dir {
            Some(dir) if self.retention > 0 => dir,
            _ => return Ok(()),
        };
        if !self.path.exists() {
            return Ok(());
        }
        fs::create_dir_all(dir)?;
        let backup_path = self.next_backup_path(dir);
        fs::copy(&self.path, &backup_path)?;
        tracing::debug!(backup = %backup_path.display(), "backed up expense file");
        self.prune_backups()
    }

    /// `<stem>_<timestamp>.json`, with a `_<n>` sequence appended when
    /// several saves land in the same second.
    fn next_backup_path(&self, dir: &Path) -> PathBuf {
        let stem = self.file_stem();
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut candidate = dir.join(format!("{}_{}.{}", stem, timestamp, BACKUP_EXTENSION));
        let mut sequence = 1u32;
        while candidate.exists() {
            candidate = dir.join(format!(
                "{}_{}_{}.{}",
                stem, timestamp, sequence, BACKUP_EXTENSION
            ));
            sequence += 1;
        }
        candidate
    }

    fn prune_backups(&self) -> Result<()> {
        for stale in self.list_backups()?.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&stale) {
                tracing::warn!(
                    backup = %stale.display(),
                    error = %err,
                    "failed to prune expense backup"
                );
            }
        }
        Ok(())
    }
}

impl ExpenseStorage for JsonFileStore {
    fn load(&self) -> Result<Vec<Expense>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no expense file yet, starting empty");
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let expenses = decode_expenses(&self.path, &data)?;
        tracing::debug!(
            path = %self.path.display(),
            count = expenses.len(),
            "loaded expenses"
        );
        Ok(expenses)
    }

    fn save(&self, expenses: &[Expense]) -> Result<()> {
        let json = encode_expenses(expenses)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.backup_existing_file()?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(
            path = %self.path.display(),
            count = expenses.len(),
            "saved expenses"
        );
        Ok(())
    }
}

/// On-disk shape of an expense: exactly four fields, no envelope.
#[derive(Debug, Serialize, Deserialize)]
struct StoredExpense {
    title: String,
    amount: f64,
    category: String,
    date: String,
}

impl StoredExpense {
    fn from_expense(expense: &Expense) -> Result<Self> {
        if !expense.amount.is_finite() {
            return Err(ExpenseError::InvalidAmount(format!(
                "expense `{}` has a non-finite amount",
                expense.title
            )));
        }
        Ok(Self {
            title: expense.title.clone(),
            amount: expense.amount,
            category: expense.category.clone(),
            date: expense.date.format(DATE_FORMAT).to_string(),
        })
    }

    fn into_expense(self, path: &Path, position: usize) -> Result<Expense> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|err| {
            ExpenseError::corrupt(
                path,
                format!("record {}: invalid date `{}` ({})", position, self.date, err),
            )
        })?;
        if !Category::is_known(&self.category) {
            tracing::warn!(
                record = position,
                category = %self.category,
                "loaded expense with unrecognized category"
            );
        }
        Ok(Expense::new(self.title, self.amount, self.category, date))
    }
}

fn decode_expenses(path: &Path, data: &str) -> Result<Vec<Expense>> {
    let stored: Vec<StoredExpense> =
        serde_json::from_str(data).map_err(|err| ExpenseError::corrupt(path, err))?;
    stored
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_expense(path, position))
        .collect()
}

fn encode_expenses(expenses: &[Expense]) -> Result<String> {
    let stored = expenses
        .iter()
        .map(StoredExpense::from_expense)
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_string_pretty(&stored).map_err(std::io::Error::from)?)
}

/// Orders backups by timestamp, then by same-second sequence number.
fn backup_sort_key(path: &Path, prefix: &str) -> Option<(NaiveDateTime, u32)> {
    let stamp = path.file_stem()?.to_str()?.strip_prefix(prefix)?;
    let (timestamp, sequence) = match stamp.get(BACKUP_TIMESTAMP_LEN..) {
        Some(rest) if !rest.is_empty() => (
            &stamp[..BACKUP_TIMESTAMP_LEN],
            rest.strip_prefix('_')?.parse().ok()?,
        ),
        _ => (stamp, 0),
    };
    let parsed = NaiveDateTime::parse_from_str(timestamp, BACKUP_TIMESTAMP_FORMAT).ok()?;
    Some((parsed, sequence))
}
