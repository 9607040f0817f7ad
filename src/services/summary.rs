//! Summary service
//!
//! Plain-text renderings of the grouped totals, shared by the assistant
//! prompt and the `summary` command.

use std::fmt::Write;

use crate::error::ExpenseResult;
use crate::models::{SummaryKind, SummaryRow};
use crate::storage::Database;

/// Render rows as `"<Title> Expense Summary:\n- key: $x.yy\n..."`
pub fn format_summary(kind: SummaryKind, rows: &[SummaryRow]) -> String {
    let mut out = format!("{} Expense Summary:\n", kind.title());
    for row in rows {
        let _ = writeln!(out, "- {}: {}", row.key, row.total);
    }
    out
}

/// The three summaries used to ground an assistant question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTexts {
    pub monthly: String,
    pub category: String,
    pub yearly: String,
}

pub struct SummaryService<'a> {
    db: &'a Database,
}

impl<'a> SummaryService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn text(&self, kind: SummaryKind) -> ExpenseResult<String> {
        Ok(format_summary(kind, &self.db.summary(kind)?))
    }

    pub fn all_texts(&self) -> ExpenseResult<SummaryTexts> {
        Ok(SummaryTexts {
            monthly: self.text(SummaryKind::Monthly)?,
            category: self.text(SummaryKind::Category)?,
            yearly: self.text(SummaryKind::Yearly)?,
        })
    }
}
