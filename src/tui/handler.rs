//! Event handler for the TUI
//!
//! Routes key presses to the open dialog, the field being edited, the
//! sidebar or the active panel, in that order. Task results and ticks are
//! applied directly.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::charts::ChartKind;

use super::app::{ActiveDialog, ActiveView, App, ConfirmAction, FocusedPanel, InputMode};
use super::event::Event;
use super::views::add_expense::ExpenseField;
use super::widgets::TextInput;

pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.on_tick();
            Ok(())
        }
        Event::Task(outcome) => {
            app.apply_task_outcome(outcome);
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    if ctrl && app.active_view == ActiveView::Settings && key.code == KeyCode::Char('s') {
        app.save_settings();
        return Ok(());
    }
    if ctrl && app.active_view == ActiveView::AddExpense && key.code == KeyCode::Char('v') {
        app.start_dictation();
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_editing_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return Ok(());
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return Ok(());
        }
        KeyCode::Tab => {
            app.toggle_panel_focus();
            return Ok(());
        }
        KeyCode::Esc => {
            app.notifications.dismiss();
            app.clear_status();
            return Ok(());
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if let Some(view) = ActiveView::from_key(c) {
                app.switch_view(view);
            }
            return Ok(());
        }
        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::Sidebar => handle_sidebar_key(app, key),
        FocusedPanel::Main => handle_main_panel_key(app, key),
    }
    Ok(())
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    let last = ActiveView::ALL.len() - 1;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.selected_sidebar_index = (app.selected_sidebar_index + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected_sidebar_index = app.selected_sidebar_index.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            app.switch_view(ActiveView::ALL[app.selected_sidebar_index.min(last)]);
        }
        _ => {}
    }
}

fn handle_main_panel_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return;
        }
        KeyCode::Char('h') | KeyCode::Left if !app.active_view.has_form() => {
            app.focused_panel = FocusedPanel::Sidebar;
            return;
        }
        KeyCode::Enter | KeyCode::Char('i') if app.active_view.has_form() => {
            app.start_editing();
            return;
        }
        _ => {}
    }

    match app.active_view {
        ActiveView::Expenses => match key.code {
            KeyCode::Char('/') => app.start_editing(),
            KeyCode::Char('c') => app.cycle_category_filter(),
            KeyCode::Char('s') => app.toggle_star_selected(),
            KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected(),
            _ => {}
        },
        ActiveView::Charts => match key.code {
            KeyCode::Char('b') => app.chart_kind = ChartKind::CategoryBar,
            KeyCode::Char('l') => app.chart_kind = ChartKind::MonthlyLine,
            _ => {}
        },
        ActiveView::Settings => match key.code {
            KeyCode::Char('B') => app.open_backup_dialog(),
            KeyCode::Char('X') => app.open_dialog(ActiveDialog::Confirm(ConfirmAction::ClearAll)),
            _ => {}
        },
        ActiveView::Dashboard
        | ActiveView::AddExpense
        | ActiveView::Starred
        | ActiveView::Assistant => {}
    }
}

fn handle_editing_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Esc {
        app.stop_editing();
        return Ok(());
    }

    match app.active_view {
        ActiveView::AddExpense => handle_expense_form_key(app, key),
        ActiveView::Expenses => {
            if key.code == KeyCode::Enter {
                app.stop_editing();
            } else if edit_text(&mut app.search_input, key) {
                app.apply_filter();
            }
        }
        ActiveView::Settings => handle_settings_form_key(app, key),
        ActiveView::Assistant => {
            if key.code == KeyCode::Enter {
                app.ask_assistant();
            } else {
                edit_text(&mut app.assistant.question_input, key);
            }
        }
        ActiveView::Dashboard | ActiveView::Starred | ActiveView::Charts => app.stop_editing(),
    }
    Ok(())
}

fn handle_expense_form_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.submit_expense();
        return;
    }

    let form = &mut app.expense_form;
    match key.code {
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Left if form.focused_field == ExpenseField::Category => {
            form.category = form.category.prev();
        }
        KeyCode::Right if form.focused_field == ExpenseField::Category => {
            form.category = form.category.next();
        }
        _ => {
            if let Some(input) = form.focused_input_mut() {
                if edit_text(input, key) {
                    form.error_message = None;
                }
            }
        }
    }
}

fn handle_settings_form_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Enter {
        app.stop_editing();
        return;
    }

    let form = &mut app.settings_form;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        _ => match form.focused_input_mut() {
            Some(input) => {
                if edit_text(input, key) {
                    form.dirty = true;
                }
            }
            None => match key.code {
                KeyCode::Left => form.step(false),
                KeyCode::Right => form.step(true),
                _ => {}
            },
        },
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                app.close_dialog();
            }
        }
        ActiveDialog::Confirm(action) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm(action),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::Backup => match key.code {
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Tab | KeyCode::BackTab => app.backup_form.toggle_field(),
            KeyCode::Enter => app.start_email_backup(),
            _ => {
                edit_text(app.backup_form.focused_input_mut(), key);
            }
        },
    }
    Ok(())
}

/// Apply a text-editing key to `input`; returns whether the text changed
fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_start();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExpensePaths, Settings};
    use crate::models::{Category, Money, NewExpense};
    use crate::storage::Database;
    use chrono::NaiveDate;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn setup() -> (Database, ExpensePaths, TempDir) {
        let dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let db = Database::open(paths.database_file()).unwrap();
        (db, paths, dir)
    }

    fn seed(db: &Database) {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        for (cents, category, description) in [
            (1200, Category::Food, "Groceries"),
            (250, Category::Transport, "Bus"),
            (900, Category::Food, "Coffee"),
        ] {
            db.insert_expense(&NewExpense::new(
                date,
                category,
                Money::from_cents(cents),
                description,
            ))
            .unwrap();
        }
    }

    #[test]
    fn test_digit_keys_switch_views() {
        let (db, paths, _dir) = setup();
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);

        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.active_view, ActiveView::Charts);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.chart_kind, ChartKind::MonthlyLine);
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.chart_kind, ChartKind::CategoryBar);

        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.active_view, ActiveView::Charts);
    }

    #[test]
    fn test_sidebar_navigation() {
        let (db, paths, _dir) = setup();
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_panel, FocusedPanel::Sidebar);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_view, ActiveView::Expenses);
        assert_eq!(app.focused_panel, FocusedPanel::Main);
    }

    #[test]
    fn test_add_expense_with_keys() {
        let (db, paths, _dir) = setup();
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Editing);

        // focus starts on the amount; "q" must be typed, not quit
        type_text(&mut app, "7.25");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "quiche");
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.expense_form.category, Category::Transport);
        press(&mut app, KeyCode::Enter);

        assert!(!app.should_quit);
        assert_eq!(app.expenses.len(), 1);
        assert_eq!(app.expenses[0].description, "quiche");
        assert_eq!(app.expenses[0].category, Category::Transport);
        assert_eq!(app.expenses[0].amount.cents(), 725);
    }

    #[test]
    fn test_search_filters_on_every_keystroke() {
        let (db, paths, _dir) = setup();
        seed(&db);
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.visible_expenses.len(), 1);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.visible_expenses.len(), 3);
        type_text(&mut app, "food");
        assert_eq!(app.visible_expenses.len(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.filter.category, Some(Category::Food));
    }

    #[test]
    fn test_delete_requires_yes() {
        let (db, paths, _dir) = setup();
        seed(&db);
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('d'));
        assert!(app.has_dialog());
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.has_dialog());
        assert_eq!(app.expenses.len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.expenses.len(), 2);
    }

    #[test]
    fn test_star_key_toggles() {
        let (db, paths, _dir) = setup();
        seed(&db);
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.starred.len(), 1);
        assert_eq!(app.starred[0].id, app.visible_expenses[1].id);
    }

    #[test]
    fn test_quit_and_help() {
        let (db, paths, _dir) = setup();
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);

        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.active_dialog, ActiveDialog::Help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.has_dialog());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let (db, paths, _dir) = setup();
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);
        app.switch_view(ActiveView::Assistant);
        app.start_editing();

        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        )
        .unwrap();
        assert!(app.should_quit);
        assert!(app.assistant.question_input.is_empty());
    }

    #[test]
    fn test_settings_clear_all_flow() {
        let (db, paths, _dir) = setup();
        seed(&db);
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);

        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('X'));
        assert_eq!(
            app.active_dialog,
            ActiveDialog::Confirm(ConfirmAction::ClearAll)
        );
        press(&mut app, KeyCode::Char('y'));
        assert!(app.expenses.is_empty());
    }

    #[test]
    fn test_task_event_is_applied() {
        let (db, paths, _dir) = setup();
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(&db, Settings::default(), &paths, tx);
        app.sending_backup = true;

        handle_event(
            &mut app,
            Event::Task(super::super::tasks::TaskOutcome::EmailBackup(Ok(()))),
        )
        .unwrap();
        assert!(!app.sending_backup);
        assert_eq!(
            app.notifications.current().unwrap().message,
            crate::backup::SUCCESS_MSG
        );
    }
}
