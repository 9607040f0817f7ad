//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod assistant;
pub mod backup;
pub mod expense;
pub mod export;
pub mod summary;

pub use assistant::handle_ask;
pub use backup::{handle_backup_command, BackupCommands};
pub use expense::{
    handle_add, handle_clear, handle_delete, handle_list, handle_star, AddArgs, ListArgs,
};
pub use export::{handle_export, ExportArgs, ExportFormat};
pub use summary::{handle_dashboard, handle_summary, SummaryChoice};
