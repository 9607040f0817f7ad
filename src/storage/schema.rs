//! SQL schema
//!
//! The layout matches databases written by earlier releases, so existing
//! `expense_manager.db` files open unchanged. There are no migrations.

/// Creates the single `expenses` table
pub const CREATE_EXPENSES: &str = "CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY,
    date TEXT NOT NULL,
    category TEXT NOT NULL,
    amount REAL NOT NULL,
    description TEXT,
    starred INTEGER NOT NULL DEFAULT 0
);";

/// Column list used by every row-returning query, in `Expense` field order
pub const EXPENSE_COLUMNS: &str = "id, date, category, amount, description, starred";

/// Integer cents expression for aggregate sums
pub const AMOUNT_CENTS: &str = "CAST(ROUND(amount * 100) AS INTEGER)";
