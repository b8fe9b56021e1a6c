use std::{fmt, str::FromStr};

use chrono::{Datelike, Month, NaiveDate};

const ALL_LABEL: &str = "All";

/// Filter value controlling which expenses are shown and aggregated.
///
/// Selectors that are neither `All` nor a full English month name are kept
/// as [`MonthSelector::Unrecognized`] and match nothing, so a stale or
/// mistyped filter yields an empty view instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MonthSelector {
    #[default]
    All,
    Month(Month),
    Unrecognized(String),
}

impl MonthSelector {
    /// Parses a selector label; never fails.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case(ALL_LABEL) {
            return MonthSelector::All;
        }
        month_by_name(trimmed)
            .map(MonthSelector::Month)
            .unwrap_or_else(|| MonthSelector::Unrecognized(trimmed.to_string()))
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            MonthSelector::All => true,
            MonthSelector::Month(month) => date.month() == month.number_from_month(),
            MonthSelector::Unrecognized(_) => false,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, MonthSelector::Unrecognized(_))
    }

    /// Labels offered to the user, `All` first followed by January..December.
    pub fn labels() -> Vec<&'static str> {
        std::iter::once(ALL_LABEL)
            .chain(months().map(|month| month.name()))
            .collect()
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::All => f.write_str(ALL_LABEL),
            MonthSelector::Month(month) => f.write_str(month.name()),
            MonthSelector::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

impl FromStr for MonthSelector {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(MonthSelector::parse(value))
    }
}

impl From<Month> for MonthSelector {
    fn from(month: Month) -> Self {
        MonthSelector::Month(month)
    }
}

fn months() -> impl Iterator<Item = Month> {
    (1u8..=12).filter_map(|number| Month::try_from(number).ok())
}

// chrono's own parser also accepts three-letter abbreviations; selectors only
// take full names.
fn month_by_name(name: &str) -> Option<Month> {
    months().find(|month| month.name().eq_ignore_ascii_case(name))
}
