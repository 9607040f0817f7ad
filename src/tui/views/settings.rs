//! Settings panel
//!
//! Edits the settings document. Model and font size are steppers, the rest
//! are text fields. Nothing is written until the form is saved.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::settings::{FONT_SIZE_RANGE, MODEL_CHOICES};
use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::tui::app::{App, InputMode};
use crate::tui::widgets::TextInput;

use super::panel_block;

pub const SAVED_MSG: &str = "Settings saved successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    ApiKey,
    Model,
    FontSize,
    LogoPath,
    BackupEmail,
}

impl SettingsField {
    const ORDER: [SettingsField; 5] = [
        Self::ApiKey,
        Self::Model,
        Self::FontSize,
        Self::LogoPath,
        Self::BackupEmail,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct SettingsFormState {
    pub focused_field: SettingsField,
    pub api_key_input: TextInput,
    pub model: String,
    pub font_size: u8,
    pub logo_input: TextInput,
    pub email_input: TextInput,
    /// Set when a field changed since the last load or save
    pub dirty: bool,
}

impl SettingsFormState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            focused_field: SettingsField::default(),
            api_key_input: TextInput::new()
                .label("Gemini API Key")
                .placeholder("not set")
                .masked(true)
                .content(settings.api_key.clone()),
            model: settings.model.clone(),
            font_size: settings.font_size,
            logo_input: TextInput::new()
                .label("Logo")
                .placeholder("No logo selected.")
                .content(settings.logo_path.clone().unwrap_or_default()),
            email_input: TextInput::new()
                .label("Backup Gmail")
                .placeholder("you@gmail.com")
                .content(settings.backup_email.clone()),
            dirty: false,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            SettingsField::ApiKey => Some(&mut self.api_key_input),
            SettingsField::LogoPath => Some(&mut self.logo_input),
            SettingsField::BackupEmail => Some(&mut self.email_input),
            SettingsField::Model | SettingsField::FontSize => None,
        }
    }

    /// Step the focused selector; `forward` is →
    pub fn step(&mut self, forward: bool) {
        match self.focused_field {
            SettingsField::Model => {
                let current = MODEL_CHOICES.iter().position(|m| *m == self.model);
                let next = match (current, forward) {
                    (Some(i), true) => (i + 1) % MODEL_CHOICES.len(),
                    (Some(i), false) => (i + MODEL_CHOICES.len() - 1) % MODEL_CHOICES.len(),
                    // A hand-edited model name steps onto the list
                    (None, _) => 0,
                };
                self.model = MODEL_CHOICES[next].to_string();
            }
            SettingsField::FontSize => {
                self.font_size = if forward {
                    self.font_size.saturating_add(1)
                } else {
                    self.font_size.saturating_sub(1)
                }
                .clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end());
            }
            _ => return,
        }
        self.dirty = true;
    }

    /// Copy the form onto `settings`, leaving it untouched when invalid
    pub fn apply_to(&self, settings: &mut Settings) -> ExpenseResult<()> {
        let email = self.email_input.value().trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(ExpenseError::Validation(format!(
                "'{}' is not an email address.",
                email
            )));
        }
        let logo = self.logo_input.value().trim();

        let mut updated = settings.clone();
        updated.api_key = self.api_key_input.value().trim().to_string();
        updated.model = self.model.clone();
        updated.font_size = self.font_size;
        updated.logo_path = (!logo.is_empty()).then(|| logo.to_string());
        updated.backup_email = email.to_string();
        updated.validate()?;

        *settings = updated;
        Ok(())
    }
}

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let block = panel_block(app, " Settings ");
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
            Constraint::Length(2),
            Constraint::Min(3),
        ])
        .split(inner);

    let form = &app.settings_form;
    let focus = |field: SettingsField| editing && form.focused_field == field;

    let mut api_key = form.api_key_input.clone();
    api_key.focused = focus(SettingsField::ApiKey);
    frame.render_widget(api_key, rows[0]);

    frame.render_widget(
        Paragraph::new(stepper_line("Model", &form.model, focus(SettingsField::Model))),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(stepper_line(
            "Font Size",
            &form.font_size.to_string(),
            focus(SettingsField::FontSize),
        )),
        rows[2],
    );

    let mut logo = form.logo_input.clone();
    logo.focused = focus(SettingsField::LogoPath);
    frame.render_widget(logo, rows[3]);

    let mut email = form.email_input.clone();
    email.focused = focus(SettingsField::BackupEmail);
    frame.render_widget(email, rows[4]);

    let state = if form.dirty {
        Span::styled("Unsaved changes", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("Saved", Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(Line::from(state)), rows[5]);

    let hints = vec![
        Line::from(if editing {
            "Tab/Shift+Tab: Field  ←/→: Change value  Ctrl+S: Save  Esc: Done"
        } else {
            "Enter or i: Edit  Ctrl+S: Save"
        }),
        Line::from(vec![
            Span::styled("B", Style::default().fg(Color::Yellow)),
            Span::raw(": Backup to Gmail   "),
            Span::styled(
                "X",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(": Clear all expenses"),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(hints)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP)),
        rows[6],
    );
}

fn stepper_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(Color::Cyan)),
        Span::raw(": "),
        Span::styled(format!("◀ {} ▶", value), style),
    ])
}
