//! Logger setup
//!
//! Uses the `log` facade with `env_logger`. The level comes from the
//! `EXPENSE_MANAGER_LOG` environment variable (default `info`). While the TUI
//! owns the terminal, records go to a log file instead of stderr.

use std::fs::OpenOptions;

use env_logger::Target;

use super::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "EXPENSE_MANAGER_LOG";

/// Where log records are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, for CLI commands
    Stderr,
    /// The log file under the data directory, for TUI mode
    File,
}

/// Parse a level name, falling back to `Info`
pub fn parse_level(level: &str) -> log::LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => log::LevelFilter::Off,
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    }
}

/// Initialize the global logger
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(paths: &ExpensePaths, target: LogTarget) -> ExpenseResult<()> {
    let level = std::env::var(LOG_LEVEL_ENV)
        .map(|l| parse_level(&l))
        .unwrap_or(log::LevelFilter::Info);

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false);

    if target == LogTarget::File {
        paths.ensure_directories()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file())
            .map_err(|e| ExpenseError::Io(format!("Failed to open log file: {}", e)))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at level {}", level);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), log::LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), log::LevelFilter::Warn);
        assert_eq!(parse_level("nonsense"), log::LevelFilter::Info);
    }
}
