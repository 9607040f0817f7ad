//! Status bar
//!
//! Month total, background work indicators, the transient status message
//! and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, InputMode};

const HINTS: &str = " 1-7:Panels  Tab:Focus  ?:Help  q:Quit ";
const EDITING_HINTS: &str = " Esc:Stop editing ";

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![
        Span::styled(" This month: ", Style::default().fg(Color::White)),
        Span::styled(
            app.stats.total_month.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if app.input_mode == InputMode::Editing {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("EDIT", Style::default().fg(Color::Green)));
    }

    let busy: Vec<&str> = [
        (app.dictating, "recording"),
        (app.assistant.busy, "asking Gemini"),
        (app.sending_backup, "sending backup"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, label)| *label)
    .collect();
    if !busy.is_empty() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{}...", busy.join(", ")),
            Style::default().fg(Color::Magenta),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = if app.input_mode == InputMode::Editing {
        EDITING_HINTS
    } else {
        HINTS
    };
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize).saturating_sub(used + hints.len()).max(1);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
