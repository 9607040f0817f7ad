//! Starred panel

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Paragraph, TableState},
    Frame,
};

use crate::tui::app::{App, FocusedPanel};

use super::expense_list::expense_table;
use super::panel_block;

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.starred.is_empty() {
        let empty = Paragraph::new("No starred expenses. Press s on an expense to star it.")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel_block(app, " Starred Expenses "));
        frame.render_widget(empty, area);
        return;
    }

    let focused = app.focused_panel == FocusedPanel::Main;
    let table = expense_table(&app.starred, " Starred Expenses ", focused);
    let mut state = TableState::default();
    state.select(Some(app.selected_starred_index));
    frame.render_stateful_widget(table, area, &mut state);
}
