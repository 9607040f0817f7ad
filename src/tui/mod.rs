//! Terminal user interface
//!
//! A sidebar of seven panels (dashboard, add expense, expense list, starred,
//! charts, settings, assistant) built with ratatui. Slow work such as
//! dictation or network calls runs on background threads that report back
//! through the event channel.

pub mod app;
pub mod dialogs;
pub mod event;
pub mod handler;
pub mod layout;
pub mod tasks;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
