//! Service layer for the expense manager
//!
//! Validation and derived values on top of the storage layer.

pub mod expense;
pub mod summary;

pub use expense::{parse_amount, parse_date, ExpenseFilter, ExpenseService};
pub use summary::{format_summary, SummaryService, SummaryTexts};
