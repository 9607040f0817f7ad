use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_manager::cli::{
    handle_add, handle_ask, handle_backup_command, handle_clear, handle_dashboard, handle_delete,
    handle_export, handle_list, handle_star, handle_summary, AddArgs, BackupCommands, ExportArgs,
    ListArgs, SummaryChoice,
};
use expense_manager::config::logging::{init_logging, LogTarget};
use expense_manager::config::{ExpensePaths, Settings};
use expense_manager::storage::Database;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Records expenses in a local SQLite database, shows monthly, category \
                  and yearly summaries and charts, and can answer questions about your \
                  spending with a Gemini model. Run without a command to open the TUI."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// Record an expense
    Add(AddArgs),

    /// List expenses, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Toggle the star on an expense
    Star {
        /// Expense ID
        id: i64,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: i64,
    },

    /// Delete every expense (a snapshot is taken first)
    Clear {
        /// Skip the safety prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Print text summaries
    Summary {
        #[arg(value_enum, default_value_t = SummaryChoice::All)]
        kind: SummaryChoice,
    },

    /// Totals for this month and today, and the top category
    Dashboard,

    /// Ask the assistant a question about your spending
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// Email backups and local snapshots
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Export expenses
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    paths.ensure_directories()?;

    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(
        &paths,
        if tui_mode {
            LogTarget::File
        } else {
            LogTarget::Stderr
        },
    )?;

    let settings = Settings::load_or_create(&paths)?;
    let mut db = Database::open_default(&paths)?;

    match cli.command {
        None | Some(Commands::Tui) => {
            expense_manager::tui::run_tui(&db, settings, &paths)?;
        }
        Some(Commands::Add(args)) => handle_add(&db, args)?,
        Some(Commands::List(args)) => handle_list(&db, args)?,
        Some(Commands::Star { id }) => handle_star(&db, id)?,
        Some(Commands::Delete { id }) => handle_delete(&db, id)?,
        Some(Commands::Clear { force }) => handle_clear(&db, &paths, &settings, force)?,
        Some(Commands::Summary { kind }) => handle_summary(&db, kind)?,
        Some(Commands::Dashboard) => handle_dashboard(&db)?,
        Some(Commands::Ask { question }) => handle_ask(&db, &settings, &question.join(" "))?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&mut db, &paths, &settings, cmd)?,
        Some(Commands::Export(args)) => handle_export(&db, args)?,
        Some(Commands::Config) => {
            println!("Expense Manager Configuration");
            println!("=============================");
            println!("Data directory:     {}", paths.base_dir().display());
            println!("Database:           {}", paths.database_file().display());
            println!("Settings file:      {}", paths.settings_file().display());
            println!("Snapshot directory: {}", paths.snapshot_dir().display());
            println!("Log file:           {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!(
                "  Gemini API key:     {}",
                if settings.has_api_key() { "set" } else { "not set" }
            );
            println!("  Gemini model:       {}", settings.model);
            println!("  Font size:          {}", settings.font_size);
            println!(
                "  Logo:               {}",
                settings.logo_name().unwrap_or_else(|| "none".into())
            );
            println!(
                "  Backup email:       {}",
                if settings.backup_email.is_empty() {
                    "not set"
                } else {
                    settings.backup_email.as_str()
                }
            );
            println!("  Snapshot retention: {}", settings.snapshot_retention);
        }
    }

    Ok(())
}
