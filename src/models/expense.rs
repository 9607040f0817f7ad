//! Expense model
//!
//! One recorded spending event. Ids are assigned by SQLite on insert and
//! never change afterwards.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Category, Money};

/// Database-assigned expense identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub i64);

impl ExpenseId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Money,
    pub description: String,
    pub starred: bool,
}

/// Payload for inserting a new expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Money,
    pub description: String,
}

impl NewExpense {
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category,
            amount,
            description: description.into(),
        }
    }
}

impl Expense {
    /// Case-insensitive match of `needle` (already lowercased) against the
    /// description or category label
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.description.to_lowercase().contains(needle)
            || self.category.label().to_lowercase().contains(needle)
    }
}
