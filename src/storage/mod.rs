//! Storage layer for the expense manager
//!
//! A single SQLite file holding one `expenses` table. [`Database`] owns the
//! connection for the lifetime of the process; every statement autocommits.

pub mod expenses;
pub mod schema;
pub mod summaries;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};

/// Owner of the SQLite connection
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the database file at `path` and ensure the schema
    pub fn open(path: impl AsRef<Path>) -> ExpenseResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ExpenseError::Io(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|e| {
            ExpenseError::Database(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let db = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        db.ensure_schema()?;
        log::info!("Opened expense database at {}", path.display());
        Ok(db)
    }

    /// Open the database at its standard location under `paths`
    pub fn open_default(paths: &ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;
        Self::open(paths.database_file())
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> ExpenseResult<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        db.ensure_schema()?;
        Ok(db)
    }

    /// Create the `expenses` table if it does not exist yet
    pub fn ensure_schema(&self) -> ExpenseResult<()> {
        self.conn.execute_batch(schema::CREATE_EXPENSES)?;
        Ok(())
    }

    /// File backing this database, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Write a consistent copy of the whole database to `dest`
    pub fn snapshot_to(&self, dest: impl AsRef<Path>) -> ExpenseResult<()> {
        let dest = dest.as_ref();
        self.conn
            .backup(rusqlite::DatabaseName::Main, dest, None)
            .map_err(|e| {
                ExpenseError::Database(format!(
                    "Failed to snapshot database to {}: {}",
                    dest.display(),
                    e
                ))
            })?;
        log::info!("Database snapshot written to {}", dest.display());
        Ok(())
    }

    /// Replace the whole database with the contents of the file at `src`
    pub fn restore_from(&mut self, src: impl AsRef<Path>) -> ExpenseResult<()> {
        let src = src.as_ref();
        if !src.exists() {
            return Err(ExpenseError::Io(format!(
                "Snapshot not found: {}",
                src.display()
            )));
        }
        self.conn
            .restore(rusqlite::DatabaseName::Main, src, None::<fn(rusqlite::backup::Progress)>)
            .map_err(|e| {
                ExpenseError::Database(format!("Failed to restore from {}: {}", src.display(), e))
            })?;
        self.ensure_schema()?;
        log::warn!("Database restored from {}", src.display());
        Ok(())
    }
}
