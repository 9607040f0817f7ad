//! Expense categories
//!
//! Categories come from a fixed label set. The canonical label is what gets
//! written to the `category` column.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::ExpenseError;

/// Spending category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Entertainment,
    Utilities,
    Rent,
    Shopping,
    Salary,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Rent,
        Category::Shopping,
        Category::Salary,
        Category::Other,
    ];

    /// Canonical label
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Rent => "Rent",
            Self::Shopping => "Shopping",
            Self::Salary => "Salary",
            Self::Other => "Other",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
    }

    /// Next category in display order (wraps)
    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous category in display order (wraps)
    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            let valid: Vec<_> = Self::ALL.iter().map(|c| c.label()).collect();
            ExpenseError::Validation(format!(
                "Invalid category: '{}'. Valid categories: {}",
                s,
                valid.join(", ")
            ))
        })
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        Category::parse(text).ok_or_else(|| {
            FromSqlError::Other(format!("unknown category label '{}'", text).into())
        })
    }
}
