//! Error types
//!
//! One `thiserror` enum covers every layer. Validation messages display
//! verbatim so forms and the CLI can show them as-is.

use thiserror::Error;

/// The main error type for expense manager operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Unreadable or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Settings or export document could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(String),

    /// SQLite errors
    #[error("Database error: {0}")]
    Database(String),

    /// Validation errors for user input
    #[error("{0}")]
    Validation(String),

    /// Lookup by id matched nothing
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Outbound HTTP errors (assistant, transcription)
    #[error("Network error: {0}")]
    Network(String),

    /// Email backup errors
    #[error("Backup error: {0}")]
    Backup(String),

    /// Microphone capture and transcription errors
    #[error("Voice input error: {0}")]
    Voice(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for ExpenseError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<reqwest::Error> for ExpenseError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url().to_string())
    }
}

/// Result type alias for expense manager operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
