//! Expense CLI commands
//!
//! Add, list, star, delete and clear expenses from the command line.

use chrono::Local;
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::SnapshotManager;
use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::models::{Category, Expense, ExpenseId, NewExpense};
use crate::services::{parse_amount, parse_date, ExpenseFilter, ExpenseService};
use crate::storage::Database;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount, e.g. 12.50
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// Category (Food, Transport, Entertainment, Utilities, Rent, Shopping, Salary, Other)
    #[arg(short, long, default_value = "Food")]
    pub category: String,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,

    /// Description
    #[arg(short = 'm', long)]
    pub description: Option<String>,
}

/// Arguments for `list`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only starred expenses
    #[arg(long)]
    pub starred: bool,

    /// Case-insensitive text to match in description or category
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "★")]
    starred: &'static str,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.get(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.label(),
            amount: expense.amount.to_string(),
            description: expense.description.clone(),
            starred: if expense.starred { "★" } else { "" },
        }
    }
}

/// Render expenses as a table
pub fn format_expense_table(expenses: &[Expense]) -> String {
    let rows: Vec<ExpenseRow> = expenses.iter().map(ExpenseRow::from).collect();
    Table::new(rows).with(Style::modern()).to_string()
}

pub fn handle_add(db: &Database, args: AddArgs) -> ExpenseResult<()> {
    let amount = parse_amount(&args.amount)?;
    let category: Category = args.category.parse()?;
    let date = match args.date {
        Some(text) => parse_date(&text)?,
        None => Local::now().date_naive(),
    };
    let input = NewExpense::new(date, category, amount, args.description.unwrap_or_default());

    let expense = ExpenseService::new(db).add(input)?;
    println!(
        "Added expense {}: {} {} on {}",
        expense.id,
        expense.amount,
        expense.category,
        expense.date.format("%Y-%m-%d")
    );
    Ok(())
}

pub fn handle_list(db: &Database, args: ListArgs) -> ExpenseResult<()> {
    let mut filter = ExpenseFilter::new().search(args.search.unwrap_or_default());
    if let Some(category) = args.category {
        filter = filter.category(category.parse()?);
    }

    let source = if args.starred {
        db.list_starred()?
    } else {
        db.list_expenses()?
    };
    let expenses = filter.apply(&source);

    if expenses.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }

    println!("{}", format_expense_table(&expenses));
    let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();
    println!("{} expense(s), total {}", expenses.len(), total);
    Ok(())
}

pub fn handle_star(db: &Database, id: i64) -> ExpenseResult<()> {
    let starred = ExpenseService::new(db).toggle_star(ExpenseId(id))?;
    if starred {
        println!("Starred expense {}", id);
    } else {
        println!("Unstarred expense {}", id);
    }
    Ok(())
}

pub fn handle_delete(db: &Database, id: i64) -> ExpenseResult<()> {
    ExpenseService::new(db).delete(ExpenseId(id))?;
    println!("Deleted expense {}", id);
    Ok(())
}

pub fn handle_clear(
    db: &Database,
    paths: &ExpensePaths,
    settings: &Settings,
    force: bool,
) -> ExpenseResult<()> {
    if !force {
        println!("DANGER: This will delete ALL expenses permanently.");
        println!("To proceed, run again with --force flag:");
        println!("  expenses clear --force");
        return Ok(());
    }

    let snapshots = SnapshotManager::new(paths.snapshot_dir(), settings.snapshot_retention);
    let snapshot = snapshots.create_with_retention(db)?;
    println!("Snapshot saved: {}", snapshot.display());

    let removed = ExpenseService::new(db).clear_all()?;
    println!("All data has been cleared successfully ({} expense(s) removed).", removed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_table_has_headers_and_rows() {
        let expenses = vec![Expense {
            id: ExpenseId(4),
            date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            category: Category::Entertainment,
            amount: Money::from_cents(2500),
            description: "Fireworks".into(),
            starred: true,
        }];
        let table = format_expense_table(&expenses);
        assert!(table.contains("Category"));
        assert!(table.contains("Entertainment"));
        assert!(table.contains("$25.00"));
        assert!(table.contains("2024-07-04"));
    }
}
