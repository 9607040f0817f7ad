//! TUI views
//!
//! One module per panel plus the sidebar and status bar.

pub mod add_expense;
pub mod assistant;
pub mod charts;
pub mod dashboard;
pub mod expense_list;
pub mod settings;
pub mod sidebar;
pub mod starred;
pub mod status_bar;

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App, FocusedPanel};
use super::dialogs;
use super::layout::{notification_rect, AppLayout};
use super::widgets::NotificationWidget;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    sidebar::render(frame, app, layout.sidebar);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, layout.main),
        ActiveView::AddExpense => add_expense::render(frame, app, layout.main),
        ActiveView::Expenses => expense_list::render(frame, app, layout.main),
        ActiveView::Starred => starred::render(frame, app, layout.main),
        ActiveView::Charts => charts::render(frame, app, layout.main),
        ActiveView::Settings => settings::render(frame, app, layout.main),
        ActiveView::Assistant => assistant::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    match app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Confirm(action) => dialogs::confirm::render(frame, action),
        ActiveDialog::Backup => dialogs::backup::render(frame, app),
    }

    if let Some(notification) = app.notifications.current() {
        let area = notification_rect(frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}

/// Bordered block for the main panel, highlighted while it has focus
pub(crate) fn panel_block<'b>(app: &App, title: &'b str) -> Block<'b> {
    let border_color = if app.focused_panel == FocusedPanel::Main {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}
