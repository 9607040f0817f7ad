//! Dashboard panel
//!
//! Three stat cards above the most recent expenses.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::App;

use super::expense_list::expense_table;
use super::panel_block;

const RECENT_COUNT: usize = 10;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = panel_block(app, " Dashboard ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(inner);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);

    let stats = &app.stats;
    render_card(frame, cards[0], "Total This Month", &stats.total_month.to_string(), Color::Cyan);
    render_card(frame, cards[1], "Total Today", &stats.total_today.to_string(), Color::Green);
    render_card(frame, cards[2], "Top Category", stats.top_category_label(), Color::Yellow);

    let recent: Vec<_> = app.expenses.iter().take(RECENT_COUNT).cloned().collect();
    let table = expense_table(&recent, " Recent Expenses ", false);
    frame.render_widget(table, rows[1]);
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, value: &str, color: Color) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Gray))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let value = Paragraph::new(vec![
        Line::from(""),
        Line::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
    .centered()
    .block(block);
    frame.render_widget(value, area);
}
