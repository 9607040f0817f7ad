//! Expenses panel
//!
//! Filter bar (search text and category) above a table of every matching
//! expense, newest first.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::Expense;
use crate::tui::app::{App, InputMode};
use crate::tui::layout::MainPanelLayout;

use super::panel_block;

const WIDTHS: [Constraint; 5] = [
    Constraint::Length(12),
    Constraint::Length(15),
    Constraint::Length(12),
    Constraint::Min(16),
    Constraint::Length(3),
];

/// Table of expenses with the shared column layout
pub fn expense_table(expenses: &[Expense], title: &str, focused: bool) -> Table<'static> {
    let header = Row::new(["Date", "Category", "Amount", "Description", "★"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows: Vec<Row> = expenses.iter().map(expense_row).collect();

    Table::new(rows, WIDTHS)
        .header(header)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused {
                    Color::Cyan
                } else {
                    Color::DarkGray
                })),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ")
}

fn expense_row(expense: &Expense) -> Row<'static> {
    let star = if expense.starred {
        Cell::from("★").style(Style::default().fg(Color::Yellow))
    } else {
        Cell::from("☆").style(Style::default().fg(Color::DarkGray))
    };
    Row::new(vec![
        Cell::from(expense.date.format("%Y-%m-%d").to_string()),
        Cell::from(expense.category.label()),
        Cell::from(expense.amount.to_string()).style(Style::default().fg(Color::Green)),
        Cell::from(expense.description.clone()),
        star,
    ])
}

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel_block(app, " View Expenses ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = MainPanelLayout::new(inner);
    render_filter_bar(frame, app, layout.header);

    let title = format!(
        " {} of {} expense(s) ",
        app.visible_expenses.len(),
        app.expenses.len()
    );
    let table = expense_table(&app.visible_expenses, &title, false);

    if app.visible_expenses.is_empty() {
        let message = if app.expenses.is_empty() {
            "No expenses yet. Press 2 to add one."
        } else {
            "No expenses match the current filter."
        };
        let content = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(layout.content);
        frame.render_widget(table, layout.content);
        frame.render_widget(
            Paragraph::new(message)
                .centered()
                .style(Style::default().fg(Color::DarkGray)),
            content[1],
        );
        return;
    }

    let mut state = TableState::default();
    state.select(Some(app.selected_expense_index));
    frame.render_stateful_widget(table, layout.content, &mut state);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(34)])
        .split(area);

    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let search_area = search_block.inner(chunks[0]);
    frame.render_widget(search_block, chunks[0]);
    let mut search = app.search_input.clone();
    search.focused = editing;
    frame.render_widget(search, search_area);

    let hints = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("c", Style::default().fg(Color::Yellow)),
            Span::raw(": "),
            Span::styled(
                app.filter.category_label(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(Span::styled(
            "/ search  s star  d delete",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::LEFT));
    frame.render_widget(hints, chunks[1]);
}
