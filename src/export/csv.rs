//! CSV export
//!
//! One row per expense, spreadsheet friendly.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

const HEADER: [&str; 6] = ["ID", "Date", "Category", "Amount", "Description", "Starred"];

/// Write `expenses` as CSV with a header row
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> ExpenseResult<()> {
    let mut out = ::csv::Writer::from_writer(writer);
    let export_err = |e: ::csv::Error| ExpenseError::Export(e.to_string());

    out.write_record(HEADER).map_err(export_err)?;
    for expense in expenses {
        out.write_record([
            expense.id.to_string(),
            expense.date.format("%Y-%m-%d").to_string(),
            expense.category.label().to_string(),
            format!("{:.2}", expense.amount.to_f64()),
            expense.description.clone(),
            expense.starred.to_string(),
        ])
        .map_err(export_err)?;
    }

    out.flush()
        .map_err(|e| ExpenseError::Export(format!("Failed to flush CSV output: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseId, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_csv_quotes_descriptions() {
        let expenses = vec![Expense {
            id: ExpenseId(3),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            category: Category::Shopping,
            amount: Money::from_cents(1999),
            description: "Socks, wool".into(),
            starred: true,
        }];

        let mut out = Vec::new();
        export_expenses_csv(&expenses, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "ID,Date,Category,Amount,Description,Starred\n3,2024-06-01,Shopping,19.99,\"Socks, wool\",true\n"
        );
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut out = Vec::new();
        export_expenses_csv(&[], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,Date,Category,Amount,Description,Starred\n"
        );
    }
}
