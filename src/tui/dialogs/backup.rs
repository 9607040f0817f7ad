//! Email backup dialog
//!
//! Asks for the Gmail address and app password. The address is prefilled
//! from the settings; the password is never stored.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::backup::APP_PASSWORD_HINT;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupField {
    #[default]
    Email,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct BackupFormState {
    pub focused_field: BackupField,
    pub email_input: TextInput,
    pub password_input: TextInput,
}

impl BackupFormState {
    pub fn new(email: &str) -> Self {
        Self {
            // Jump straight to the password when the address is known
            focused_field: if email.trim().is_empty() {
                BackupField::Email
            } else {
                BackupField::Password
            },
            email_input: TextInput::new()
                .label("Gmail")
                .placeholder("you@gmail.com")
                .content(email.trim()),
            password_input: TextInput::new()
                .label("App Password")
                .placeholder("16 characters")
                .masked(true),
        }
    }

    pub fn toggle_field(&mut self) {
        self.focused_field = match self.focused_field {
            BackupField::Email => BackupField::Password,
            BackupField::Password => BackupField::Email,
        };
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused_field {
            BackupField::Email => &mut self.email_input,
            BackupField::Password => &mut self.password_input,
        }
    }
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(64, 12, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Backup to Gmail ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(inner);

    let form = &app.backup_form;
    let mut email = form.email_input.clone();
    email.focused = form.focused_field == BackupField::Email;
    frame.render_widget(email, rows[0]);

    let mut password = form.password_input.clone();
    password.focused = form.focused_field == BackupField::Password;
    frame.render_widget(password, rows[1]);

    frame.render_widget(
        Paragraph::new(APP_PASSWORD_HINT)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true }),
        rows[2],
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Send  "),
            Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
            Span::raw(" Switch field  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Cancel"),
        ])),
        rows[3],
    );
}
