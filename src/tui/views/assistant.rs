//! Assistant panel
//!
//! Question field above the rendered Markdown reply.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::assistant::markdown;
use crate::tui::app::{App, InputMode};
use crate::tui::widgets::TextInput;

use super::panel_block;

#[derive(Debug, Clone)]
pub struct AssistantState {
    pub question_input: TextInput,
    /// Last Markdown reply
    pub reply: Option<String>,
    /// A request is in flight
    pub busy: bool,
    /// Lines scrolled off the top of the reply
    pub scroll: u16,
}

impl Default for AssistantState {
    fn default() -> Self {
        Self {
            question_input: TextInput::new()
                .label("Ask")
                .placeholder("e.g. Where did most of my money go this year?"),
            reply: None,
            busy: false,
            scroll: 0,
        }
    }
}

impl AssistantState {
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let block = panel_block(app, " Ask Gemini ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let state = &app.assistant;
    let mut question = state.question_input.clone();
    question.focused = editing;
    let question_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let question_area = question_block.inner(chunks[0]);
    frame.render_widget(question_block, chunks[0]);
    frame.render_widget(question, question_area);

    let reply_block = Block::default()
        .title(" Response ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let body = if state.busy {
        Paragraph::new("Thinking...").style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        match state.reply {
            Some(ref reply) => Paragraph::new(markdown::to_text(reply)),
            None => Paragraph::new(Text::from(
                "Your answer will appear here. Questions are answered from your monthly, category and yearly summaries.",
            ))
            .style(Style::default().fg(Color::DarkGray)),
        }
    };
    frame.render_widget(
        body.block(reply_block)
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0)),
        chunks[1],
    );

    let hints = if editing {
        "Enter: Ask  Esc: Done"
    } else {
        "Enter or i: Type a question  j/k: Scroll answer"
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}
