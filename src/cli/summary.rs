//! Summary and dashboard CLI commands

use chrono::Local;
use clap::ValueEnum;

use crate::error::ExpenseResult;
use crate::models::SummaryKind;
use crate::services::SummaryService;
use crate::storage::Database;

/// Which summary to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SummaryChoice {
    Monthly,
    Category,
    Yearly,
    #[default]
    All,
}

impl SummaryChoice {
    fn kinds(self) -> Vec<SummaryKind> {
        match self {
            Self::Monthly => vec![SummaryKind::Monthly],
            Self::Category => vec![SummaryKind::Category],
            Self::Yearly => vec![SummaryKind::Yearly],
            Self::All => SummaryKind::ALL.to_vec(),
        }
    }
}

pub fn handle_summary(db: &Database, choice: SummaryChoice) -> ExpenseResult<()> {
    let service = SummaryService::new(db);
    let texts = choice
        .kinds()
        .into_iter()
        .map(|kind| service.text(kind))
        .collect::<ExpenseResult<Vec<_>>>()?;
    println!("{}", texts.join("\n").trim_end());
    Ok(())
}

pub fn handle_dashboard(db: &Database) -> ExpenseResult<()> {
    let stats = db.dashboard_stats(Local::now().date_naive())?;
    println!("Expense Dashboard");
    println!("=================");
    println!("This month:   {}", stats.total_month);
    println!("Today:        {}", stats.total_today);
    println!("Top category: {}", stats.top_category_label());
    Ok(())
}
