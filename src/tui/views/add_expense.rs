//! Add Expense panel
//!
//! Form with date, category, amount and description. The category is a
//! selector cycled with the arrow keys; the others are text fields.

use chrono::{Local, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::error::ExpenseResult;
use crate::models::{Category, NewExpense};
use crate::services::{parse_amount, parse_date};
use crate::tui::app::{App, InputMode};
use crate::tui::widgets::TextInput;

use super::panel_block;

pub const ADDED_MSG: &str = "Expense added successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    Date,
    Category,
    #[default]
    Amount,
    Description,
}

impl ExpenseField {
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Category,
            Self::Category => Self::Amount,
            Self::Amount => Self::Description,
            Self::Description => Self::Date,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Description,
            Self::Category => Self::Date,
            Self::Amount => Self::Category,
            Self::Description => Self::Amount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub date_input: TextInput,
    pub category: Category,
    pub amount_input: TextInput,
    pub description_input: TextInput,
    /// Last validation failure, shown under the form
    pub error_message: Option<String>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl ExpenseFormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focused_field: ExpenseField::default(),
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today.format("%Y-%m-%d").to_string()),
            category: Category::Food,
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            description_input: TextInput::new()
                .label("Description")
                .placeholder("What was it for?"),
            error_message: None,
        }
    }

    /// Clear the amount and description after a successful save. Date and
    /// category are kept since consecutive entries usually share them.
    pub fn reset(&mut self) {
        self.amount_input.clear();
        self.description_input.clear();
        self.focused_field = ExpenseField::Amount;
        self.error_message = None;
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    /// Text field under focus, `None` on the category selector
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            ExpenseField::Date => Some(&mut self.date_input),
            ExpenseField::Category => None,
            ExpenseField::Amount => Some(&mut self.amount_input),
            ExpenseField::Description => Some(&mut self.description_input),
        }
    }

    /// Validate the fields. The amount is checked first, then the date.
    pub fn build(&self) -> ExpenseResult<NewExpense> {
        let amount = parse_amount(self.amount_input.value())?;
        let date = parse_date(self.date_input.value())?;
        Ok(NewExpense::new(
            date,
            self.category,
            amount,
            self.description_input.value().trim(),
        ))
    }
}

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let block = panel_block(app, " Add New Expense ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(2),
        ])
        .split(inner);

    let form = &app.expense_form;
    let focus = |field: ExpenseField| editing && form.focused_field == field;

    let mut date = form.date_input.clone();
    date.focused = focus(ExpenseField::Date);
    frame.render_widget(date, rows[0]);

    let category_style = if focus(ExpenseField::Category) {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let category = Line::from(vec![
        Span::styled("Category", Style::default().fg(Color::Cyan)),
        Span::raw(": "),
        Span::styled(format!("◀ {} ▶", form.category), category_style),
    ]);
    frame.render_widget(Paragraph::new(category), rows[1]);

    let mut amount = form.amount_input.clone();
    amount.focused = focus(ExpenseField::Amount);
    frame.render_widget(amount, rows[2]);

    let mut description = form.description_input.clone();
    description.focused = focus(ExpenseField::Description);
    frame.render_widget(description, rows[3]);

    let mut status = Vec::new();
    if app.dictating {
        status.push(Span::styled(
            "Listening... say the amount",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ));
    } else if let Some(ref error) = form.error_message {
        status.push(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
    }
    frame.render_widget(Paragraph::new(Line::from(status)), rows[4]);

    let hints = if editing {
        "Tab/Shift+Tab: Field  ←/→: Category  Ctrl+V: Dictate amount  Enter: Add  Esc: Done"
    } else {
        "Enter or i: Start editing"
    };
    frame.render_widget(
        Paragraph::new(hints)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP)),
        rows[5],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::expense::{INVALID_AMOUNT_MSG, INVALID_DATE_MSG, NON_POSITIVE_AMOUNT_MSG};

    fn form() -> ExpenseFormState {
        ExpenseFormState::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
    }

    #[test]
    fn test_defaults() {
        let form = form();
        assert_eq!(form.date_input.value(), "2024-03-05");
        assert_eq!(form.category, Category::Food);
        assert_eq!(form.focused_field, ExpenseField::Amount);
    }

    #[test]
    fn test_build_valid_expense() {
        let mut form = form();
        form.amount_input.set_value("12.50");
        form.description_input.set_value("  lunch ");
        form.category = Category::Transport;

        let expense = form.build().unwrap();
        assert_eq!(expense.amount.cents(), 1250);
        assert_eq!(expense.category, Category::Transport);
        assert_eq!(expense.description, "lunch");
    }

    #[test]
    fn test_build_rejects_bad_input() {
        let mut form = form();
        form.amount_input.set_value("0");
        assert_eq!(form.build().unwrap_err().to_string(), NON_POSITIVE_AMOUNT_MSG);

        form.amount_input.set_value("abc");
        assert_eq!(form.build().unwrap_err().to_string(), INVALID_AMOUNT_MSG);

        form.amount_input.set_value("5");
        form.date_input.set_value("05/03/2024");
        assert_eq!(form.build().unwrap_err().to_string(), INVALID_DATE_MSG);
    }

    #[test]
    fn test_reset_keeps_date_and_category() {
        let mut form = form();
        form.category = Category::Utilities;
        form.amount_input.set_value("3");
        form.description_input.set_value("x");
        form.error_message = Some("oops".into());
        form.focused_field = ExpenseField::Description;

        form.reset();
        assert!(form.amount_input.is_empty());
        assert!(form.description_input.is_empty());
        assert_eq!(form.category, Category::Utilities);
        assert_eq!(form.date_input.value(), "2024-03-05");
        assert_eq!(form.focused_field, ExpenseField::Amount);
        assert!(form.error_message.is_none());
    }

    #[test]
    fn test_field_cycle() {
        let mut field = ExpenseField::Date;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, ExpenseField::Date);
        assert_eq!(ExpenseField::Date.prev(), ExpenseField::Description);
    }
}
