//! Markdown replies to terminal text
//!
//! Walks pulldown-cmark events and builds styled ratatui lines. Covers what
//! model replies typically use: headings, emphasis, inline code, fenced
//! code blocks, nested lists and rules.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// Next number for each open list; `None` for bullet lists
    lists: Vec<Option<u64>>,
    in_code_block: bool,
}

impl Renderer {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            styles: vec![Style::default()],
            lists: Vec::new(),
            in_code_block: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let next = self.style().patch(patch);
        self.styles.push(next);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self.style();
        self.current.push(Span::styled(text.to_string(), style));
    }

    fn flush_line(&mut self) {
        let spans = std::mem::take(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn flush_if_pending(&mut self) {
        if !self.current.is_empty() {
            self.flush_line();
        }
    }

    fn blank_line(&mut self) {
        if self.lines.last().map_or(false, |l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_if_pending();
                let color = match level {
                    HeadingLevel::H1 => Color::Cyan,
                    HeadingLevel::H2 => Color::LightCyan,
                    _ => Color::White,
                };
                self.push_style(Style::default().fg(color).add_modifier(Modifier::BOLD));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::CodeBlock(_) => {
                self.flush_if_pending();
                self.in_code_block = true;
                self.push_style(Style::default().fg(Color::Green));
            }
            Tag::List(start) => {
                self.flush_if_pending();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_if_pending();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.current.push(Span::raw("  ".repeat(depth)));
                self.current
                    .push(Span::styled(marker, Style::default().fg(Color::Yellow)));
            }
            Tag::Link { .. } => {
                self.push_style(Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED))
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                self.pop_style();
                self.flush_line();
                self.blank_line();
            }
            TagEnd::Paragraph => {
                self.flush_if_pending();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link => {
                self.pop_style()
            }
            TagEnd::CodeBlock => {
                self.flush_if_pending();
                self.in_code_block = false;
                self.pop_style();
                self.blank_line();
            }
            TagEnd::Item => self.flush_if_pending(),
            TagEnd::List(_) => {
                self.flush_if_pending();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if !self.in_code_block {
            self.push_text(text);
            return;
        }
        let mut pieces = text.split('\n').peekable();
        while let Some(piece) = pieces.next() {
            if pieces.peek().is_none() && piece.is_empty() {
                break;
            }
            self.current.push(Span::raw("    "));
            self.push_text(piece);
            self.flush_line();
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush_if_pending();
        while self.lines.last().map_or(false, |l| l.spans.is_empty()) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }
}

/// Render Markdown into styled terminal text
pub fn to_text(markdown: &str) -> Text<'static> {
    let mut renderer = Renderer::new();
    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(tag) => renderer.start(tag),
            Event::End(tag) => renderer.end(tag),
            Event::Text(text) => renderer.text(&text),
            Event::Code(code) => {
                let style = renderer.style().fg(Color::Yellow);
                renderer.current.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak => renderer.push_text(" "),
            Event::HardBreak => renderer.flush_line(),
            Event::Rule => {
                renderer.flush_if_pending();
                renderer.lines.push(Line::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Event::TaskListMarker(done) => {
                renderer.push_text(if done { "[x] " } else { "[ ] " })
            }
            Event::Html(html) | Event::InlineHtml(html) => renderer.push_text(&html),
            _ => {}
        }
    }
    renderer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_heading_and_paragraph() {
        let text = to_text("# Summary\n\nYou spent **$40** on food.");
        assert_eq!(plain(&text), vec!["Summary", "", "You spent $40 on food."]);

        let heading = &text.lines[0].spans[0];
        assert!(heading.style.add_modifier.contains(Modifier::BOLD));
        let bold = text.lines[2]
            .spans
            .iter()
            .find(|s| s.content == "$40")
            .unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_lists() {
        let text = to_text("- Food\n- Rent\n\n1. First\n2. Second");
        assert_eq!(
            plain(&text),
            vec!["• Food", "• Rent", "", "1. First", "2. Second"]
        );
    }

    #[test]
    fn test_nested_list_indents() {
        let text = to_text("- Top\n  - Inner");
        assert_eq!(plain(&text), vec!["• Top", "  • Inner"]);
    }

    #[test]
    fn test_code_block_lines_are_indented() {
        let text = to_text("```\nlet a = 1;\nlet b = 2;\n```");
        assert_eq!(plain(&text), vec!["    let a = 1;", "    let b = 2;"]);
    }

    #[test]
    fn test_inline_code_and_breaks() {
        let text = to_text("Use `total`\nnow");
        assert_eq!(plain(&text), vec!["Use total now"]);
    }
}
