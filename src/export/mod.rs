//! Export module for the expense manager
//!
//! - CSV: one row per expense (spreadsheet-compatible)
//! - JSON: full dump with summaries (machine-readable)

pub mod csv;
pub mod json;

pub use csv::export_expenses_csv;
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
