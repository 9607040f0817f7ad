//! Expense service
//!
//! Business rules on top of [`Database`]: amount validation for new
//! entries, star toggling, and the in-memory list filter used by the
//! expenses panel and `list` command.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseId, Money, NewExpense};
use crate::storage::Database;

/// Shown when the amount text is not a number
pub const INVALID_AMOUNT_MSG: &str = "Please enter a valid numeric amount.";
/// Shown when the amount is zero or negative
pub const NON_POSITIVE_AMOUNT_MSG: &str = "Amount must be greater than zero.";

/// Shown when the amount has fractions of a cent
pub const TOO_PRECISE_AMOUNT_MSG: &str = "Amount can have at most two decimal places.";

/// Parse amount text from the entry form
///
/// Anything that is not a plain decimal number is rejected, as are zero and
/// negative values. Amounts are kept in cents, so more than two decimal
/// places is refused rather than silently changed.
pub fn parse_amount(text: &str) -> ExpenseResult<Money> {
    let amount =
        Money::parse(text).map_err(|_| ExpenseError::Validation(INVALID_AMOUNT_MSG.into()))?;
    let decimals = text.trim().split_once('.').map_or(0, |(_, f)| f.len());
    if decimals > 2 {
        return Err(ExpenseError::Validation(TOO_PRECISE_AMOUNT_MSG.into()));
    }
    if !amount.is_positive() {
        return Err(ExpenseError::Validation(NON_POSITIVE_AMOUNT_MSG.into()));
    }
    Ok(amount)
}

/// Shown when the date text is not `YYYY-MM-DD`
pub const INVALID_DATE_MSG: &str = "Invalid date format. Use YYYY-MM-DD";

/// Parse an ISO date from the entry form or command line
pub fn parse_date(text: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ExpenseError::Validation(INVALID_DATE_MSG.into()))
}

/// Search text plus optional category, applied to a cached list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    /// Case-insensitive substring of the description or category label
    pub search: String,
    /// `None` means all categories
    pub category: Option<Category>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        let category_ok = self.category.map_or(true, |c| expense.category == c);
        category_ok && expense.matches_text(&self.search.trim().to_lowercase())
    }

    /// Matching expenses, keeping the input order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses.iter().filter(|e| self.matches(e)).cloned().collect()
    }

    /// Advance the category filter: All, Food, ..., Other, All
    pub fn cycle_category(&mut self) {
        self.category = match self.category {
            None => Some(Category::ALL[0]),
            Some(c) if c == Category::ALL[Category::ALL.len() - 1] => None,
            Some(c) => Some(c.next()),
        };
    }

    pub fn category_label(&self) -> &'static str {
        self.category.map_or("All Categories", Category::label)
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    db: &'a Database,
}

impl<'a> ExpenseService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Validate and insert a new expense
    pub fn add(&self, mut input: NewExpense) -> ExpenseResult<Expense> {
        if !input.amount.is_positive() {
            return Err(ExpenseError::Validation(NON_POSITIVE_AMOUNT_MSG.into()));
        }
        input.description = input.description.trim().to_string();

        let id = self.db.insert_expense(&input)?;
        self.db
            .get_expense(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id))
    }

    /// Flip the starred flag and return the new value
    pub fn toggle_star(&self, id: ExpenseId) -> ExpenseResult<bool> {
        let expense = self
            .db
            .get_expense(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id))?;
        let starred = !expense.starred;
        self.db.set_starred(id, starred)?;
        Ok(starred)
    }

    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<()> {
        self.db.delete_expense(id)
    }

    /// Remove every expense, returning the number removed
    pub fn clear_all(&self) -> ExpenseResult<usize> {
        self.db.clear_expenses()
    }

    /// All expenses matching `filter`
    pub fn list(&self, filter: &ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        Ok(filter.apply(&self.db.list_expenses()?))
    }
}
