//! Expense row operations
//!
//! Insert, read, star, and delete individual rows. Lists come back newest
//! date first with the id as a secondary key, so rows entered on the same
//! day keep a stable order.

use rusqlite::{params, OptionalExtension, Row};

use super::schema::EXPENSE_COLUMNS;
use super::Database;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, Money, NewExpense};

fn expense_from_row(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let amount: f64 = row.get(3)?;
    let description: Option<String> = row.get(4)?;
    let starred: i64 = row.get(5)?;
    Ok(Expense {
        id: ExpenseId(row.get(0)?),
        date: row.get(1)?,
        category: row.get(2)?,
        amount: Money::from_f64(amount),
        description: description.unwrap_or_default(),
        starred: starred != 0,
    })
}

impl Database {
    /// Insert a new expense and return its assigned id
    pub fn insert_expense(&self, expense: &NewExpense) -> ExpenseResult<ExpenseId> {
        self.conn().execute(
            "INSERT INTO expenses (date, category, amount, description, starred)
             VALUES (?1, ?2, ?3, ?4, 0)",
            params![
                expense.date,
                expense.category,
                expense.amount.to_f64(),
                expense.description
            ],
        )?;
        let id = ExpenseId(self.conn().last_insert_rowid());
        log::info!(
            "Inserted expense {} ({} {} on {})",
            id,
            expense.category,
            expense.amount,
            expense.date
        );
        Ok(id)
    }

    /// Fetch one expense by id
    pub fn get_expense(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let sql = format!("SELECT {} FROM expenses WHERE id = ?1", EXPENSE_COLUMNS);
        let expense = self
            .conn()
            .query_row(&sql, params![id.get()], expense_from_row)
            .optional()?;
        Ok(expense)
    }

    /// All expenses, newest first
    pub fn list_expenses(&self) -> ExpenseResult<Vec<Expense>> {
        self.query_expenses("")
    }

    /// Starred expenses, newest first
    pub fn list_starred(&self) -> ExpenseResult<Vec<Expense>> {
        self.query_expenses("WHERE starred = 1")
    }

    fn query_expenses(&self, filter: &str) -> ExpenseResult<Vec<Expense>> {
        let sql = format!(
            "SELECT {} FROM expenses {} ORDER BY date DESC, id DESC",
            EXPENSE_COLUMNS, filter
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map([], expense_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(ExpenseError::from)
    }

    /// Set the starred flag on one expense
    pub fn set_starred(&self, id: ExpenseId, starred: bool) -> ExpenseResult<()> {
        let changed = self.conn().execute(
            "UPDATE expenses SET starred = ?1 WHERE id = ?2",
            params![starred as i64, id.get()],
        )?;
        if changed == 0 {
            return Err(ExpenseError::expense_not_found(id));
        }
        log::info!("Expense {} starred = {}", id, starred);
        Ok(())
    }

    /// Delete one expense
    pub fn delete_expense(&self, id: ExpenseId) -> ExpenseResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.get()])?;
        if changed == 0 {
            return Err(ExpenseError::expense_not_found(id));
        }
        log::info!("Deleted expense {}", id);
        Ok(())
    }

    /// Delete every expense, returning how many rows were removed
    pub fn clear_expenses(&self) -> ExpenseResult<usize> {
        let removed = self.conn().execute("DELETE FROM expenses", [])?;
        log::warn!("Cleared all expenses ({} rows)", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add(db: &Database, d: NaiveDate, category: Category, cents: i64, desc: &str) -> ExpenseId {
        db.insert_expense(&NewExpense::new(d, category, Money::from_cents(cents), desc))
            .unwrap()
    }

    #[test]
    fn test_insert_then_list_contains_exactly_one_new_record() {
        let db = Database::open_in_memory().unwrap();
        add(&db, date(2024, 1, 1), Category::Rent, 90000, "January rent");

        let before = db.list_expenses().unwrap();
        let id = add(&db, date(2024, 1, 15), Category::Food, 1250, "Lunch");
        let after = db.list_expenses().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        let new_rows: Vec<_> = after.iter().filter(|e| e.id == id).collect();
        assert_eq!(new_rows.len(), 1);
        let row = new_rows[0];
        assert_eq!(row.date, date(2024, 1, 15));
        assert_eq!(row.category, Category::Food);
        assert_eq!(row.amount, Money::from_cents(1250));
        assert_eq!(row.description, "Lunch");
        assert!(!row.starred);
    }

    #[test]
    fn test_list_orders_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let a = add(&db, date(2024, 1, 1), Category::Food, 100, "a");
        let b = add(&db, date(2024, 3, 1), Category::Food, 100, "b");
        let c = add(&db, date(2024, 3, 1), Category::Food, 100, "c");

        let ids: Vec<_> = db.list_expenses().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![c, b, a]);
    }

    #[test]
    fn test_get_expense_missing_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_expense(ExpenseId(99)).unwrap().is_none());
    }

    #[test]
    fn test_starred_list_follows_flag() {
        let db = Database::open_in_memory().unwrap();
        let id = add(&db, date(2024, 2, 2), Category::Shopping, 4999, "Shoes");
        add(&db, date(2024, 2, 3), Category::Food, 500, "Snack");

        db.set_starred(id, true).unwrap();
        let starred = db.list_starred().unwrap();
        assert_eq!(starred.len(), 1);
        assert_eq!(starred[0].id, id);

        db.set_starred(id, false).unwrap();
        assert!(db.list_starred().unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_from_both_lists() {
        let db = Database::open_in_memory().unwrap();
        let id = add(&db, date(2024, 2, 2), Category::Utilities, 6000, "Power");
        db.set_starred(id, true).unwrap();

        db.delete_expense(id).unwrap();
        assert!(db.list_expenses().unwrap().iter().all(|e| e.id != id));
        assert!(db.list_starred().unwrap().iter().all(|e| e.id != id));
    }

    #[test]
    fn test_missing_ids_report_not_found() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.delete_expense(ExpenseId(7)).unwrap_err().is_not_found());
        assert!(db.set_starred(ExpenseId(7), true).unwrap_err().is_not_found());
    }

    #[test]
    fn test_clear_empties_everything() {
        let db = Database::open_in_memory().unwrap();
        let id = add(&db, date(2024, 2, 2), Category::Food, 100, "x");
        add(&db, date(2024, 2, 3), Category::Food, 200, "y");
        db.set_starred(id, true).unwrap();

        assert_eq!(db.clear_expenses().unwrap(), 2);
        assert!(db.list_expenses().unwrap().is_empty());
        assert!(db.list_starred().unwrap().is_empty());
    }

    #[test]
    fn test_null_description_reads_as_empty() {
        let db = Database::open_in_memory().unwrap();
        db.conn()
            .execute(
                "INSERT INTO expenses (date, category, amount, description) VALUES ('2024-05-01', 'Other', 3.5, NULL)",
                [],
            )
            .unwrap();
        let rows = db.list_expenses().unwrap();
        assert_eq!(rows[0].description, "");
        assert_eq!(rows[0].amount, Money::from_cents(350));
    }
}
