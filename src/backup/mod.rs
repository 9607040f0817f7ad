//! Backups for the expense manager
//!
//! Two independent mechanisms:
//!
//! - `EmailBackup`: mails the database file to the user's Gmail address
//! - `SnapshotManager`: local rolling copies taken before clear-all
//!
//! ```rust,ignore
//! use expense_manager::backup::{EmailBackup, SnapshotManager};
//!
//! let snapshots = SnapshotManager::new(paths.snapshot_dir(), settings.snapshot_retention);
//! snapshots.create_with_retention(&db)?;
//!
//! EmailBackup::new(&settings.backup_email, password, paths.database_file())?.send()?;
//! ```

mod email;
mod snapshot;

pub use email::{EmailBackup, APP_PASSWORD_HINT, MISSING_CREDENTIALS_MSG, SUCCESS_MSG};
pub use snapshot::{SnapshotInfo, SnapshotManager};
