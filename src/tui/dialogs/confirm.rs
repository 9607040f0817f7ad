//! Confirmation dialog
//!
//! Yes/no prompt before deleting one expense or clearing them all.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::ConfirmAction;
use crate::tui::layout::centered_rect_fixed;

pub fn render(frame: &mut Frame, action: ConfirmAction) {
    let area = centered_rect_fixed(56, 8, frame.area());
    frame.render_widget(Clear, area);

    let color = match action {
        ConfirmAction::ClearAll => Color::Red,
        ConfirmAction::DeleteExpense(_) => Color::Yellow,
    };

    let block = Block::default()
        .title(format!(" {} ", action.title()))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            action.message(),
            Style::default().fg(Color::White),
        )),
    ];
    if action == ConfirmAction::ClearAll {
        lines.push(Line::from(Span::styled(
            "A snapshot is saved first.",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[Y]", Style::default().fg(Color::Green)),
        Span::raw(" Yes  "),
        Span::styled("[N]", Style::default().fg(Color::Red)),
        Span::raw(" No"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
