//! Single-line text field
//!
//! The cursor is tracked in characters so non-ASCII descriptions edit
//! correctly. Text longer than the field scrolls so the cursor stays
//! visible.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    pub focused: bool,
    pub placeholder: String,
    pub label: String,
    /// Render every character as `*`
    pub masked: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set_value(content);
        self
    }

    /// Replace the text and move the cursor to the end
    pub fn set_value(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.char_len();
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// First visible character and the cursor column for a field `width`
    /// cells wide. The cursor cell is always on screen.
    fn visible_window(&self, width: usize) -> (usize, usize) {
        if width == 0 {
            return (0, 0);
        }
        let offset = self.cursor.saturating_sub(width - 1);
        (offset, self.cursor - offset)
    }

    /// Text as it should appear on screen
    fn display_text(&self) -> String {
        if self.masked {
            "*".repeat(self.char_len())
        } else {
            self.content.clone()
        }
    }
}

impl Widget for TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = if self.label.is_empty() {
            0
        } else {
            u16::try_from(self.label.chars().count().saturating_add(2))
                .unwrap_or(u16::MAX)
                .min(area.width)
        };

        if label_width > 0 {
            let label_line = Line::from(vec![
                Span::styled(self.label.as_str(), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
            ]);
            buf.set_line(area.x, area.y, &label_line, label_width);
        }

        let input_start = area.x.saturating_add(label_width);
        let input_width = usize::from(area.width.saturating_sub(label_width));
        if input_width == 0 {
            return;
        }

        if self.content.is_empty() && !self.focused {
            buf.set_stringn(
                input_start,
                area.y,
                &self.placeholder,
                input_width,
                Style::default().fg(Color::DarkGray),
            );
            return;
        }

        let (offset, column) = if self.focused {
            self.visible_window(input_width)
        } else {
            (0, 0)
        };
        let text: String = self.display_text().chars().skip(offset).collect();
        let style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        buf.set_stringn(input_start, area.y, &text, input_width, style);

        if self.focused {
            let cursor_x = input_start.saturating_add(u16::try_from(column).unwrap_or(u16::MAX));
            if cursor_x < area.right() {
                let under = text.chars().nth(column).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    under.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}
