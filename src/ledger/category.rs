use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ExpenseError;

/// Fixed set of categories offered when recording a new expense.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Rent,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Transport,
        Category::Rent,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Rent => "Rent",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Returns `true` when `label` spells one of the known categories exactly.
    pub fn is_known(label: &str) -> bool {
        Self::ALL.iter().any(|category| category.as_str() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ExpenseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ExpenseError::InvalidCategory(format!("`{}`", trimmed)))
    }
}
