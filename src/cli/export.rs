//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_full_json};
use crate::storage::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn handle_export(db: &Database, args: ExportArgs) -> ExpenseResult<()> {
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv => export_expenses_csv(&db.list_expenses()?, &mut writer)?,
        ExportFormat::Json => export_full_json(db, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| ExpenseError::Export(format!("Failed to write export: {}", e)))?;

    if let Some(path) = args.output {
        eprintln!("Exported to {}", path.display());
    }
    Ok(())
}
