//! Help dialog
//!
//! Global keys followed by the keys of the active panel.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        key_line("1-7", "Switch panel"),
        key_line("Tab", "Toggle sidebar/panel focus"),
        key_line("j/k ↑/↓", "Move selection"),
        key_line("?", "Show/hide help"),
        key_line("q", "Quit"),
        key_line("Ctrl+C", "Quit, even while editing"),
        Line::from(""),
        section(view.title()),
    ];

    let keys: &[(&str, &str)] = match view {
        ActiveView::Dashboard => &[("", "Totals for this month and today, top category")],
        ActiveView::AddExpense => &[
            ("Enter/i", "Start editing"),
            ("Tab", "Next field"),
            ("←/→", "Change category"),
            ("Ctrl+V", "Dictate the amount"),
            ("Enter", "Add expense (while editing)"),
            ("Esc", "Stop editing"),
        ],
        ActiveView::Expenses => &[
            ("/", "Search description or category"),
            ("c", "Cycle category filter"),
            ("s", "Star/unstar"),
            ("d", "Delete"),
        ],
        ActiveView::Starred => &[("", "Starred expenses, newest first")],
        ActiveView::Charts => &[
            ("b", "Bar chart by category"),
            ("l", "Line chart by month"),
        ],
        ActiveView::Settings => &[
            ("Enter/i", "Start editing"),
            ("←/→", "Change model or font size"),
            ("Ctrl+S", "Save settings"),
            ("B", "Email a backup"),
            ("X", "Clear all expenses"),
        ],
        ActiveView::Assistant => &[
            ("Enter/i", "Type a question"),
            ("Enter", "Ask (while editing)"),
            ("j/k", "Scroll the answer"),
        ],
    };
    lines.extend(keys.iter().map(|(key, description)| key_line(key, description)));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>10}  ", key), Style::default().fg(Color::Cyan)),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
