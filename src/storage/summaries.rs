//! Grouped aggregate queries
//!
//! Sums are taken over integer cents so a group total equals the exact sum
//! of its rows.

use chrono::{Datelike, NaiveDate};
use rusqlite::params;

use super::schema::AMOUNT_CENTS;
use super::Database;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, DashboardStats, Money, SummaryKind, SummaryRow};

impl Database {
    /// Totals per `YYYY-MM`, oldest month first
    pub fn monthly_summary(&self) -> ExpenseResult<Vec<SummaryRow>> {
        self.grouped("strftime('%Y-%m', date)", "key ASC")
    }

    /// Totals per `YYYY`, oldest year first
    pub fn yearly_summary(&self) -> ExpenseResult<Vec<SummaryRow>> {
        self.grouped("strftime('%Y', date)", "key ASC")
    }

    /// Totals per category, largest first; equal totals sort by label
    pub fn category_summary(&self) -> ExpenseResult<Vec<SummaryRow>> {
        self.grouped("category", "total DESC, key ASC")
    }

    /// Summary rows for `kind`
    pub fn summary(&self, kind: SummaryKind) -> ExpenseResult<Vec<SummaryRow>> {
        match kind {
            SummaryKind::Monthly => self.monthly_summary(),
            SummaryKind::Category => self.category_summary(),
            SummaryKind::Yearly => self.yearly_summary(),
        }
    }

    fn grouped(&self, key_expr: &str, order: &str) -> ExpenseResult<Vec<SummaryRow>> {
        let sql = format!(
            "SELECT {key} AS key, SUM({cents}) AS total FROM expenses
             GROUP BY key ORDER BY {order}",
            key = key_expr,
            cents = AMOUNT_CENTS,
            order = order
        );
        let mut stmt = self.conn().prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            let key: Option<String> = row.get(0)?;
            let cents: i64 = row.get(1)?;
            Ok(SummaryRow::new(key.unwrap_or_default(), Money::from_cents(cents)))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(ExpenseError::from)
    }

    /// Dashboard values relative to `today`
    pub fn dashboard_stats(&self, today: NaiveDate) -> ExpenseResult<DashboardStats> {
        let month = format!("{:04}-{:02}", today.year(), today.month());
        let total_month = self.sum_where("strftime('%Y-%m', date) = ?1", &month)?;
        let total_today =
            self.sum_where("date = ?1", &today.format("%Y-%m-%d").to_string())?;
        let top_category = self
            .category_summary()?
            .first()
            .and_then(|row| Category::parse(&row.key));

        Ok(DashboardStats {
            total_month,
            total_today,
            top_category,
        })
    }

    fn sum_where(&self, condition: &str, value: &str) -> ExpenseResult<Money> {
        let sql = format!(
            "SELECT COALESCE(SUM({}), 0) FROM expenses WHERE {}",
            AMOUNT_CENTS, condition
        );
        let cents: i64 = self.conn().query_row(&sql, params![value], |row| row.get(0))?;
        Ok(Money::from_cents(cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        let rows = [
            (date(2024, 1, 5), Category::Food, 1010),
            (date(2024, 1, 20), Category::Food, 2020),
            (date(2024, 1, 20), Category::Rent, 3030),
            (date(2024, 2, 1), Category::Transport, 10),
            (date(2023, 12, 31), Category::Food, 20),
        ];
        for (d, c, cents) in rows {
            db.insert_expense(&NewExpense::new(d, c, Money::from_cents(cents), ""))
                .unwrap();
        }
        db
    }

    #[test]
    fn test_monthly_summary_sums_by_month_ascending() {
        let db = seeded();
        let rows = db.monthly_summary().unwrap();
        assert_eq!(
            rows,
            vec![
                SummaryRow::new("2023-12", Money::from_cents(20)),
                SummaryRow::new("2024-01", Money::from_cents(6060)),
                SummaryRow::new("2024-02", Money::from_cents(10)),
            ]
        );
    }

    #[test]
    fn test_yearly_summary_sums_by_year() {
        let db = seeded();
        let rows = db.yearly_summary().unwrap();
        assert_eq!(
            rows,
            vec![
                SummaryRow::new("2023", Money::from_cents(20)),
                SummaryRow::new("2024", Money::from_cents(6070)),
            ]
        );
    }

    #[test]
    fn test_category_summary_descending() {
        let db = seeded();
        let rows = db.category_summary().unwrap();
        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Food", "Rent", "Transport"]);
        assert_eq!(rows[0].total, Money::from_cents(3050));
    }

    #[test]
    fn test_category_ties_break_alphabetically() {
        let db = Database::open_in_memory().unwrap();
        for c in [Category::Shopping, Category::Entertainment, Category::Rent] {
            db.insert_expense(&NewExpense::new(date(2024, 1, 1), c, Money::from_cents(500), ""))
                .unwrap();
        }
        let keys: Vec<_> = db
            .category_summary()
            .unwrap()
            .into_iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(keys, vec!["Entertainment", "Rent", "Shopping"]);
        assert_eq!(
            db.dashboard_stats(date(2024, 1, 1)).unwrap().top_category,
            Some(Category::Entertainment)
        );
    }

    #[test]
    fn test_sums_are_exact_for_fractional_amounts() {
        let db = Database::open_in_memory().unwrap();
        for _ in 0..10 {
            db.insert_expense(&NewExpense::new(
                date(2024, 1, 1),
                Category::Food,
                Money::from_cents(10),
                "",
            ))
            .unwrap();
        }
        let rows = db.monthly_summary().unwrap();
        assert_eq!(rows[0].total, Money::from_cents(100));
    }

    #[test]
    fn test_dashboard_stats() {
        let db = seeded();
        let stats = db.dashboard_stats(date(2024, 1, 20)).unwrap();
        assert_eq!(stats.total_month, Money::from_cents(6060));
        assert_eq!(stats.total_today, Money::from_cents(5050));
        assert_eq!(stats.top_category, Some(Category::Food));
    }

    #[test]
    fn test_clear_zeroes_dashboard() {
        let db = seeded();
        db.clear_expenses().unwrap();
        let stats = db.dashboard_stats(date(2024, 1, 20)).unwrap();
        assert_eq!(stats, DashboardStats::default());
        assert!(db.monthly_summary().unwrap().is_empty());
        assert!(db.category_summary().unwrap().is_empty());
    }
}
