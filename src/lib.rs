//! Expense Manager - terminal-based personal expense tracker
//!
//! Records expenses in a local SQLite file, shows aggregate summaries and
//! charts, and can answer questions about spending through a Gemini model.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings document and logger setup
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, money, summaries)
//! - `storage`: SQLite storage layer
//! - `services`: Validation and text summaries
//! - `charts`: Bar and line chart geometry
//! - `assistant`: Prompt building, Gemini client, Markdown rendering
//! - `backup`: Email backups and local snapshots
//! - `voice`: Amount dictation
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_manager::config::{ExpensePaths, Settings};
//! use expense_manager::storage::Database;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let db = Database::open_default(&paths)?;
//! ```

pub mod assistant;
pub mod backup;
pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;
pub mod voice;

pub use error::{ExpenseError, ExpenseResult};
