//! Application state for the TUI
//!
//! `App` owns everything the views render from: cached query results, form
//! state, the active panel and dialog. Every mutation goes through the
//! storage layer and is followed by a full reload of the cached lists.

use std::sync::mpsc::Sender;

use chrono::Local;

use crate::assistant::AssistantRequest;
use crate::backup::{EmailBackup, SnapshotManager, SUCCESS_MSG};
use crate::charts::ChartKind;
use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{DashboardStats, Expense, ExpenseId, SummaryRow};
use crate::services::{ExpenseFilter, ExpenseService, SummaryService};
use crate::storage::Database;
use crate::voice::{GeminiTranscriber, Recorder};

use super::dialogs::backup::BackupFormState;
use super::event::Event;
use super::tasks::{self, TaskOutcome};
use super::views::add_expense::{ExpenseFormState, ADDED_MSG};
use super::views::assistant::AssistantState;
use super::views::settings::{SettingsFormState, SAVED_MSG};
use super::widgets::{Notification, NotificationQueue, TextInput};

/// Panels listed in the sidebar, in key order `1`..`7`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    AddExpense,
    Expenses,
    Starred,
    Charts,
    Settings,
    Assistant,
}

impl ActiveView {
    pub const ALL: [ActiveView; 7] = [
        Self::Dashboard,
        Self::AddExpense,
        Self::Expenses,
        Self::Starred,
        Self::Charts,
        Self::Settings,
        Self::Assistant,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::AddExpense => "Add Expense",
            Self::Expenses => "Expenses",
            Self::Starred => "Starred",
            Self::Charts => "Charts",
            Self::Settings => "Settings",
            Self::Assistant => "Assistant",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    /// View bound to a digit key
    pub fn from_key(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Panels whose main area is a form
    pub fn has_form(self) -> bool {
        matches!(self, Self::AddExpense | Self::Settings | Self::Assistant)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    Sidebar,
    #[default]
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keystrokes go to the focused text field
    Editing,
}

/// Destructive actions that need a yes/no first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteExpense(ExpenseId),
    ClearAll,
}

impl ConfirmAction {
    pub fn title(self) -> &'static str {
        match self {
            Self::DeleteExpense(_) => "Confirm Delete",
            Self::ClearAll => "Confirm Reset",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::DeleteExpense(_) => "Are you sure you want to delete this expense?",
            Self::ClearAll => "DANGER: This will delete ALL expenses permanently. Continue?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Confirm(ConfirmAction),
    Backup,
}

pub struct App<'a> {
    pub db: &'a Database,
    /// Saved settings; the settings form edits a copy
    pub settings: Settings,
    pub paths: &'a ExpensePaths,

    pub should_quit: bool,
    pub active_view: ActiveView,
    pub focused_panel: FocusedPanel,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,
    pub status_message: Option<String>,
    pub notifications: NotificationQueue,

    /// Every expense, newest first
    pub expenses: Vec<Expense>,
    /// `expenses` after the filter
    pub visible_expenses: Vec<Expense>,
    pub starred: Vec<Expense>,
    pub stats: DashboardStats,
    pub monthly_rows: Vec<SummaryRow>,
    pub category_rows: Vec<SummaryRow>,

    pub filter: ExpenseFilter,
    pub search_input: TextInput,
    pub selected_sidebar_index: usize,
    pub selected_expense_index: usize,
    pub selected_starred_index: usize,
    pub chart_kind: ChartKind,

    pub expense_form: ExpenseFormState,
    pub settings_form: SettingsFormState,
    pub backup_form: BackupFormState,
    pub assistant: AssistantState,

    /// Dictation in flight
    pub dictating: bool,
    /// Email backup in flight
    pub sending_backup: bool,

    task_sender: Sender<Event>,
}

impl<'a> App<'a> {
    pub fn new(
        db: &'a Database,
        settings: Settings,
        paths: &'a ExpensePaths,
        task_sender: Sender<Event>,
    ) -> Self {
        let settings_form = SettingsFormState::from_settings(&settings);
        let mut app = Self {
            db,
            settings,
            paths,
            should_quit: false,
            active_view: ActiveView::default(),
            focused_panel: FocusedPanel::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            status_message: None,
            notifications: NotificationQueue::new(),
            expenses: Vec::new(),
            visible_expenses: Vec::new(),
            starred: Vec::new(),
            stats: DashboardStats::default(),
            monthly_rows: Vec::new(),
            category_rows: Vec::new(),
            filter: ExpenseFilter::new(),
            search_input: TextInput::new().label("Search").placeholder("description or category"),
            selected_sidebar_index: 0,
            selected_expense_index: 0,
            selected_starred_index: 0,
            chart_kind: ChartKind::default(),
            expense_form: ExpenseFormState::default(),
            settings_form,
            backup_form: BackupFormState::default(),
            assistant: AssistantState::default(),
            dictating: false,
            sending_backup: false,
            task_sender,
        };
        app.reload_all();
        app
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Log an error and show it as a toast
    fn report_error(&mut self, context: &str, error: &ExpenseError) {
        if error.is_validation() {
            log::info!("{}: {}", context, error);
        } else {
            log::error!("{}: {}", context, error);
        }
        self.notify(Notification::error(error.to_string()));
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.selected_sidebar_index = view.index();
        self.focused_panel = FocusedPanel::Main;
        self.input_mode = InputMode::Normal;
        if view == ActiveView::Settings && !self.settings_form.dirty {
            self.settings_form = SettingsFormState::from_settings(&self.settings);
        }
    }

    pub fn toggle_panel_focus(&mut self) {
        self.input_mode = InputMode::Normal;
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Sidebar => FocusedPanel::Main,
            FocusedPanel::Main => FocusedPanel::Sidebar,
        };
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn on_tick(&mut self) {
        self.notifications.remove_expired();
    }

    /// Re-read every cached list from storage
    pub fn reload_all(&mut self) {
        if let Err(e) = self.try_reload() {
            self.report_error("Failed to load expenses", &e);
        }
    }

    fn try_reload(&mut self) -> ExpenseResult<()> {
        self.expenses = self.db.list_expenses()?;
        self.starred = self.db.list_starred()?;
        self.stats = self.db.dashboard_stats(Local::now().date_naive())?;
        self.monthly_rows = self.db.monthly_summary()?;
        self.category_rows = self.db.category_summary()?;
        self.apply_filter();
        self.selected_starred_index = clamp_index(self.selected_starred_index, self.starred.len());
        Ok(())
    }

    /// Recompute the visible list from the search text and category filter
    pub fn apply_filter(&mut self) {
        self.filter.search = self.search_input.value().to_string();
        self.visible_expenses = self.filter.apply(&self.expenses);
        self.selected_expense_index =
            clamp_index(self.selected_expense_index, self.visible_expenses.len());
    }

    pub fn cycle_category_filter(&mut self) {
        self.filter.cycle_category();
        self.apply_filter();
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.visible_expenses.get(self.selected_expense_index)
    }

    pub fn move_up(&mut self) {
        match self.active_view {
            ActiveView::Expenses => {
                self.selected_expense_index = self.selected_expense_index.saturating_sub(1)
            }
            ActiveView::Starred => {
                self.selected_starred_index = self.selected_starred_index.saturating_sub(1)
            }
            ActiveView::Assistant => self.assistant.scroll_up(),
            _ => {}
        }
    }

    pub fn move_down(&mut self) {
        match self.active_view {
            ActiveView::Expenses => {
                self.selected_expense_index =
                    clamp_index(self.selected_expense_index + 1, self.visible_expenses.len())
            }
            ActiveView::Starred => {
                self.selected_starred_index =
                    clamp_index(self.selected_starred_index + 1, self.starred.len())
            }
            ActiveView::Assistant => self.assistant.scroll_down(),
            _ => {}
        }
    }

    /// Validate the Add Expense form and insert it
    pub fn submit_expense(&mut self) {
        let result = self
            .expense_form
            .build()
            .and_then(|input| ExpenseService::new(self.db).add(input));

        match result {
            Ok(expense) => {
                log::info!("Added expense {} ({})", expense.id, expense.amount);
                self.expense_form.reset();
                self.notify(Notification::success(ADDED_MSG));
                self.reload_all();
            }
            Err(e) => {
                self.expense_form.error_message = Some(e.to_string());
                self.report_error("Expense rejected", &e);
            }
        }
    }

    pub fn toggle_star_selected(&mut self) {
        let Some(id) = self.selected_expense().map(|e| e.id) else {
            return;
        };
        match ExpenseService::new(self.db).toggle_star(id) {
            Ok(starred) => {
                self.set_status(if starred { "Starred" } else { "Unstarred" });
                self.reload_all();
            }
            Err(e) => self.report_error("Failed to toggle star", &e),
        }
    }

    /// Ask for confirmation before deleting the selected expense
    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_expense().map(|e| e.id) {
            self.open_dialog(ActiveDialog::Confirm(ConfirmAction::DeleteExpense(id)));
        }
    }

    pub fn confirm(&mut self, action: ConfirmAction) {
        self.close_dialog();
        match action {
            ConfirmAction::DeleteExpense(id) => self.delete_expense(id),
            ConfirmAction::ClearAll => self.clear_all_expenses(),
        }
    }

    fn delete_expense(&mut self, id: ExpenseId) {
        match ExpenseService::new(self.db).delete(id) {
            Ok(()) => {
                self.notify(Notification::success("Expense deleted."));
                self.reload_all();
            }
            Err(e) => self.report_error("Failed to delete expense", &e),
        }
    }

    /// Snapshot the database, then remove every expense
    fn clear_all_expenses(&mut self) {
        let manager =
            SnapshotManager::new(self.paths.snapshot_dir(), self.settings.snapshot_retention);
        let result = manager
            .create_with_retention(self.db)
            .and_then(|snapshot| {
                log::info!("Pre-clear snapshot saved to {}", snapshot.display());
                ExpenseService::new(self.db).clear_all()
            });

        match result {
            Ok(removed) => {
                log::info!("Cleared {} expense(s)", removed);
                self.notify(Notification::success(
                    "All data has been cleared successfully.",
                ));
                self.reload_all();
            }
            Err(e) => self.report_error("Failed to clear expenses", &e),
        }
    }

    /// Record a short clip and transcribe it into the amount field
    pub fn start_dictation(&mut self) {
        if self.dictating {
            return;
        }
        if !self.settings.has_api_key() {
            self.notify(Notification::warning(crate::assistant::MISSING_KEY_MSG));
            return;
        }
        let recorder = Recorder::new(self.paths.voice_clip());
        let transcriber = GeminiTranscriber::new(&self.settings.api_key, &self.settings.model);
        let started = tasks::spawn_dictation(self.task_sender.clone(), recorder, transcriber);
        if self.task_started("dictation", started) {
            self.dictating = true;
            self.set_status("Listening...");
        }
    }

    /// Send the question to the assistant in the background
    pub fn ask_assistant(&mut self) {
        if self.assistant.busy {
            return;
        }
        let prepared = SummaryService::new(self.db)
            .all_texts()
            .and_then(|summaries| {
                AssistantRequest::prepare(
                    &self.settings,
                    &summaries,
                    self.assistant.question_input.value(),
                )
            });

        match prepared {
            Ok(request) => {
                let started = tasks::spawn_assistant(self.task_sender.clone(), request);
                if self.task_started("assistant", started) {
                    self.assistant.busy = true;
                    self.assistant.scroll = 0;
                    self.stop_editing();
                }
            }
            Err(e) => self.report_error("Assistant request rejected", &e),
        }
    }

    /// Validate the settings form, then persist it
    pub fn save_settings(&mut self) {
        let mut updated = self.settings.clone();
        let result = self
            .settings_form
            .apply_to(&mut updated)
            .and_then(|()| updated.save(self.paths));

        match result {
            Ok(()) => {
                self.settings = updated;
                self.settings_form.dirty = false;
                self.notify(Notification::success(SAVED_MSG));
            }
            Err(e) => self.report_error("Failed to save settings", &e),
        }
    }

    pub fn open_backup_dialog(&mut self) {
        if self.sending_backup {
            self.notify(Notification::info("A backup is already being sent."));
            return;
        }
        self.backup_form = BackupFormState::new(&self.settings.backup_email);
        self.open_dialog(ActiveDialog::Backup);
    }

    /// Email the database file in the background
    pub fn start_email_backup(&mut self) {
        let database = self
            .db
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.paths.database_file());
        let backup = EmailBackup::new(
            self.backup_form.email_input.value(),
            self.backup_form.password_input.value(),
            database,
        );

        match backup {
            Ok(backup) => {
                self.close_dialog();
                let status = format!("Sending backup to {}...", backup.address());
                let started = tasks::spawn_email_backup(self.task_sender.clone(), backup);
                if self.task_started("email backup", started) {
                    self.sending_backup = true;
                    self.set_status(status);
                }
            }
            Err(e) => self.report_error("Backup rejected", &e),
        }
    }

    /// Whether a background task is running; a failed start is reported and
    /// leaves the busy flags untouched
    fn task_started(&mut self, task: &str, started: ExpenseResult<()>) -> bool {
        match started {
            Ok(()) => true,
            Err(e) => {
                self.report_error(&format!("Could not start {}", task), &e);
                false
            }
        }
    }

    /// Apply the result of a background task
    pub fn apply_task_outcome(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Dictation(result) => {
                self.dictating = false;
                self.clear_status();
                match result {
                    Ok(price) => {
                        self.expense_form.amount_input.set_value(price);
                        self.expense_form.error_message = None;
                    }
                    Err(message) => self.notify(Notification::error(message)),
                }
            }
            TaskOutcome::Assistant(result) => {
                self.assistant.busy = false;
                match result {
                    Ok(reply) => self.assistant.reply = Some(reply),
                    Err(message) => {
                        self.assistant.reply = None;
                        self.notify(Notification::error(message));
                    }
                }
            }
            TaskOutcome::EmailBackup(result) => {
                self.sending_backup = false;
                self.clear_status();
                match result {
                    Ok(()) => self.notify(Notification::success(SUCCESS_MSG)),
                    Err(message) => self.notify(Notification::error(message)),
                }
            }
        }
    }
}

/// Keep a selection inside a list of `len` items
fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
