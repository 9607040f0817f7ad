//! Core data models for the expense manager

pub mod category;
pub mod expense;
pub mod money;
pub mod summary;

pub use category::Category;
pub use expense::{Expense, ExpenseId, NewExpense};
pub use money::{Money, MoneyParseError};
pub use summary::{DashboardStats, SummaryKind, SummaryRow};
