//! JSON export
//!
//! Full dump of the expense table plus the summaries, with a schema version
//! so consumers can detect format changes.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, SummaryRow};
use crate::storage::Database;

pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub expenses: Vec<Expense>,
    pub monthly: Vec<SummaryRow>,
    pub categories: Vec<SummaryRow>,
    pub yearly: Vec<SummaryRow>,
}

impl FullExport {
    pub fn from_database(db: &Database) -> ExpenseResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses: db.list_expenses()?,
            monthly: db.monthly_summary()?,
            categories: db.category_summary()?,
            yearly: db.yearly_summary()?,
        })
    }
}

/// Write the full export as pretty JSON
pub fn export_full_json<W: Write>(db: &Database, writer: &mut W) -> ExpenseResult<()> {
    let export = FullExport::from_database(db)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| ExpenseError::Export(format!("Failed to write JSON: {}", e)))?;
    writeln!(writer).map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, NewExpense};
    use chrono::NaiveDate;

    #[test]
    fn test_json_export_contains_rows_and_summaries() {
        let db = Database::open_in_memory().unwrap();
        db.insert_expense(&NewExpense::new(
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            Category::Utilities,
            Money::from_cents(4500),
            "Water",
        ))
        .unwrap();

        let mut out = Vec::new();
        export_full_json(&db, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["expenses"][0]["description"], "Water");
        assert_eq!(value["expenses"][0]["amount"], 4500);
        assert_eq!(value["expenses"][0]["category"], "Utilities");
        assert_eq!(value["monthly"][0]["key"], "2024-02");
    }
}
