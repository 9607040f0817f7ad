//! Backup CLI commands
//!
//! Email backups of the database file and local snapshot management.

use std::path::PathBuf;

use clap::Subcommand;

use crate::backup::{EmailBackup, SnapshotInfo, SnapshotManager, SUCCESS_MSG};
use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::storage::Database;

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Email the database file to your Gmail address
    Email {
        /// Gmail address (defaults to BACKUP_EMAIL from the settings)
        #[arg(short, long)]
        email: Option<String>,

        /// App password; prompted for when omitted
        #[arg(long, env = "EXPENSE_MANAGER_APP_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Take a local snapshot of the database now
    Snapshot,

    /// List local snapshots
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Restore the database from a snapshot
    Restore {
        /// Snapshot filename or path (use 'latest' for most recent)
        snapshot: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    db: &mut Database,
    paths: &ExpensePaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> ExpenseResult<()> {
    let manager = SnapshotManager::new(paths.snapshot_dir(), settings.snapshot_retention);

    match cmd {
        BackupCommands::Email { email, password } => {
            let address = email.unwrap_or_else(|| settings.backup_email.clone());
            if address.trim().is_empty() {
                return Err(ExpenseError::Validation(
                    crate::backup::MISSING_CREDENTIALS_MSG.into(),
                ));
            }
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password(format!("App password for {}: ", address))
                    .map_err(|e| ExpenseError::Io(format!("Failed to read password: {}", e)))?,
            };

            let database = db
                .path()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| paths.database_file());
            let backup = EmailBackup::new(address, password, database)?;
            println!("Sending backup to {}...", backup.address());
            backup.send()?;
            println!("{}", SUCCESS_MSG);
        }

        BackupCommands::Snapshot => {
            let path = manager.create_with_retention(db)?;
            println!("Snapshot created: {}", display_name(&path));
            println!("Location: {}", path.display());
        }

        BackupCommands::List { verbose } => {
            let snapshots = manager.list()?;
            if snapshots.is_empty() {
                println!("No snapshots found.");
                println!("Create one with: expenses backup snapshot");
                return Ok(());
            }

            println!("Available Snapshots");
            println!("===================");
            println!();
            for (i, snapshot) in snapshots.iter().enumerate() {
                print_snapshot(i + 1, snapshot, verbose);
            }
            println!();
            println!("Total: {} snapshot(s)", snapshots.len());
        }

        BackupCommands::Restore { snapshot, force } => {
            let source = resolve_snapshot_path(&manager, &snapshot)?;

            if !force {
                println!("Snapshot: {}", source.display());
                println!("WARNING: This will overwrite ALL current expenses!");
                println!("To proceed, run again with --force flag:");
                println!("  expenses backup restore {} --force", snapshot);
                return Ok(());
            }

            println!("Creating snapshot of current data before restore...");
            let pre_restore = manager.create(db)?;
            println!("Pre-restore snapshot saved: {}", display_name(&pre_restore));

            db.restore_from(&source)?;
            println!("Restore complete: {} expense(s)", db.list_expenses()?.len());
        }
    }

    Ok(())
}

fn print_snapshot(index: usize, snapshot: &SnapshotInfo, verbose: bool) {
    let age = chrono::Local::now().signed_duration_since(snapshot.created_at);
    if verbose {
        println!(
            "{}. {}\n   Created: {}\n   Size: {}\n   Age: {}\n",
            index,
            snapshot.filename,
            snapshot.created_at.format("%Y-%m-%d %H:%M:%S"),
            format_size(snapshot.size_bytes),
            format_duration(age),
        );
    } else {
        println!(
            "  {}. {} ({} ago, {})",
            index,
            snapshot.filename,
            format_duration(age),
            format_size(snapshot.size_bytes),
        );
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Resolve `latest`, a bare filename in the snapshot directory, or a path
fn resolve_snapshot_path(manager: &SnapshotManager, spec: &str) -> ExpenseResult<PathBuf> {
    if spec == "latest" {
        return manager
            .list()?
            .into_iter()
            .next()
            .map(|s| s.path)
            .ok_or_else(|| ExpenseError::Validation("No snapshots found.".into()));
    }

    let in_dir = manager.snapshot_dir().join(spec);
    if in_dir.exists() {
        return Ok(in_dir);
    }
    let as_path = PathBuf::from(spec);
    if as_path.exists() {
        return Ok(as_path);
    }
    Err(ExpenseError::NotFound {
        entity_type: "Snapshot",
        identifier: spec.to_string(),
    })
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn format_duration(duration: chrono::Duration) -> String {
    let days = duration.num_days();
    if days > 0 {
        return format!("{} day{}", days, if days == 1 { "" } else { "s" });
    }
    let hours = duration.num_hours();
    if hours > 0 {
        return format!("{} hour{}", hours, if hours == 1 { "" } else { "s" });
    }
    let minutes = duration.num_minutes();
    if minutes > 0 {
        return format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" });
    }
    "just now".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::days(2)), "2 days");
        assert_eq!(format_duration(chrono::Duration::hours(1)), "1 hour");
        assert_eq!(format_duration(chrono::Duration::seconds(10)), "just now");
    }

    #[test]
    fn test_resolve_latest_without_snapshots() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SnapshotManager::new(temp_dir.path(), 3);
        assert!(resolve_snapshot_path(&manager, "latest").is_err());
        assert!(resolve_snapshot_path(&manager, "missing.db")
            .unwrap_err()
            .is_not_found());
    }
}
