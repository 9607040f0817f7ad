//! Configuration module for the expense manager
//!
//! This module provides configuration management including:
//! - Path resolution for the database, settings and snapshots
//! - User settings persistence
//! - Logger setup

pub mod logging;
pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;
