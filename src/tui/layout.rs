//! Layout definitions for the TUI
//!
//! Sidebar with the panel list on the left, the active panel on the right,
//! and a one-line status bar along the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub sidebar: Rect,
    pub main: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(40)])
            .split(vertical[0]);

        Self {
            sidebar: horizontal[0],
            main: horizontal[1],
            status_bar: vertical[1],
        }
    }
}

/// Sidebar: logo/title header above the panel list
pub struct SidebarLayout {
    pub header: Rect,
    pub panels: Rect,
}

impl SidebarLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(9)])
            .split(area);

        Self {
            header: chunks[0],
            panels: chunks[1],
        }
    }
}

/// Main panel: title header above the content
pub struct MainPanelLayout {
    pub header: Rect,
    pub content: Rect,
}

impl MainPanelLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
        }
    }
}

/// Centered rectangle sized as a percentage of `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Centered rectangle of a fixed size, clamped to `area`
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Bottom-right corner slot for toast notifications
pub fn notification_rect(area: Rect) -> Rect {
    let width = 44.min(area.width);
    let height = 5.min(area.height);
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_splits_area() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.sidebar.width, 26);
        assert_eq!(layout.main.width, 94);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.status_bar.y, 39);
    }

    #[test]
    fn test_centered_rect_fixed_is_clamped() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect_fixed(50, 7, area);
        assert_eq!(rect.width, 30);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.y, 1);
    }

    #[test]
    fn test_notification_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 30);
        let rect = notification_rect(area);
        assert!(rect.right() <= area.right());
        assert!(rect.bottom() <= area.bottom());
    }
}
