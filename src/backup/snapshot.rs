//! Local database snapshots
//!
//! Copies of the database taken before destructive operations. Files are
//! named `expenses-YYYYMMDD-HHMMSS-mmm.db`; only the newest `retention`
//! snapshots are kept.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Database;

const PREFIX: &str = "expenses-";
const EXTENSION: &str = "db";

/// Metadata about a snapshot file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Local>,
    pub size_bytes: u64,
}

/// Creates and prunes snapshots in one directory
pub struct SnapshotManager {
    snapshot_dir: PathBuf,
    retention: usize,
}

impl SnapshotManager {
    pub fn new(snapshot_dir: impl Into<PathBuf>, retention: u32) -> Self {
        Self {
            snapshot_dir: snapshot_dir.into(),
            retention: retention.max(1) as usize,
        }
    }

    pub fn snapshot_dir(&self) -> &Path {
        &self.snapshot_dir
    }

    /// Copy the database into a new snapshot file
    pub fn create(&self, db: &Database) -> ExpenseResult<PathBuf> {
        fs::create_dir_all(&self.snapshot_dir).map_err(|e| {
            ExpenseError::Io(format!("Failed to create snapshot directory: {}", e))
        })?;

        let now = Local::now();
        let filename = format!(
            "{}{}-{:03}.{}",
            PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis().min(999),
            EXTENSION
        );
        let path = self.snapshot_dir.join(filename);
        db.snapshot_to(&path)?;
        Ok(path)
    }

    /// All snapshots, newest first
    pub fn list(&self) -> ExpenseResult<Vec<SnapshotInfo>> {
        if !self.snapshot_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.snapshot_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to read snapshot directory: {}", e)))?;

        let mut snapshots = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| ExpenseError::Io(format!("Failed to read directory entry: {}", e)))?;
            if let Some(info) = parse_snapshot_info(&entry.path()) {
                snapshots.push(info);
            }
        }

        snapshots.sort_by(|a, b| b.filename.cmp(&a.filename));
        Ok(snapshots)
    }

    /// Delete snapshots beyond the retention count, returning removed paths
    pub fn enforce_retention(&self) -> ExpenseResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();
        for snapshot in self.list()?.into_iter().skip(self.retention) {
            fs::remove_file(&snapshot.path)
                .map_err(|e| ExpenseError::Io(format!("Failed to delete old snapshot: {}", e)))?;
            log::debug!("Removed old snapshot {}", snapshot.filename);
            deleted.push(snapshot.path);
        }
        Ok(deleted)
    }

    /// Snapshot and prune in one step
    pub fn create_with_retention(&self, db: &Database) -> ExpenseResult<PathBuf> {
        let path = self.create(db)?;
        self.enforce_retention()?;
        Ok(path)
    }
}

fn parse_snapshot_info(path: &Path) -> Option<SnapshotInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename
        .strip_prefix(PREFIX)?
        .strip_suffix(EXTENSION)?
        .strip_suffix('.')?;
    let created_at = parse_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(SnapshotInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// `YYYYMMDD-HHMMSS-mmm`
fn parse_timestamp(stamp: &str) -> Option<DateTime<Local>> {
    let (seconds, millis) = stamp.rsplit_once('-')?;
    let millis: i64 = millis.parse().ok()?;
    let naive = NaiveDateTime::parse_from_str(seconds, "%Y%m%d-%H%M%S").ok()?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(local + chrono::Duration::milliseconds(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, NewExpense};
    use chrono::{NaiveDate, Timelike};
    use tempfile::TempDir;

    fn seeded_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_expense(&NewExpense::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Category::Food,
            Money::from_cents(500),
            "Bagel",
        ))
        .unwrap();
        db
    }

    #[test]
    fn test_create_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SnapshotManager::new(temp_dir.path().join("snapshots"), 5);
        let db = seeded_db();

        let path = manager.create(&db).unwrap();
        assert!(path.exists());

        let snapshots = manager.list().unwrap();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].path, path);
        assert!(snapshots[0].size_bytes > 0);

        let copy = Database::open(&path).unwrap();
        assert_eq!(copy.list_expenses().unwrap().len(), 1);
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();
        fs::write(temp_dir.path().join("expenses-garbage.db"), "x").unwrap();
        let manager = SnapshotManager::new(temp_dir.path(), 5);
        assert!(manager.list().unwrap().is_empty());
    }

    #[test]
    fn test_retention_keeps_newest() {
        let temp_dir = TempDir::new().unwrap();
        for stamp in [
            "20240101-100000-000",
            "20240102-100000-000",
            "20240103-100000-000",
        ] {
            fs::write(temp_dir.path().join(format!("expenses-{}.db", stamp)), "x").unwrap();
        }
        let manager = SnapshotManager::new(temp_dir.path(), 2);

        let deleted = manager.enforce_retention().unwrap();
        assert_eq!(deleted.len(), 1);
        assert!(deleted[0].ends_with("expenses-20240101-100000-000.db"));

        let remaining: Vec<_> = manager
            .list()
            .unwrap()
            .into_iter()
            .map(|s| s.filename)
            .collect();
        assert_eq!(
            remaining,
            vec![
                "expenses-20240103-100000-000.db",
                "expenses-20240102-100000-000.db"
            ]
        );
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("20240315-142530-250").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(parsed.hour(), 14);
        assert_eq!(parsed.second(), 30);
        assert!(parse_timestamp("2024-03-15").is_none());
    }
}
