//! Terminal setup and teardown
//!
//! Raw mode and the alternate screen are entered on start and always left
//! on exit, including on panic.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::{ExpensePaths, Settings};
use crate::storage::Database;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the interactive interface until the user quits
pub fn run_tui(db: &Database, settings: Settings, paths: &ExpensePaths) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, db, settings, paths);
    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Tui,
    db: &Database,
    settings: Settings,
    paths: &ExpensePaths,
) -> Result<()> {
    let events = EventHandler::default();
    let mut app = App::new(db, settings, paths, events.sender());
    log::info!("TUI started with {} expense(s)", app.expenses.len());

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, &mut app))?;
        let event = events.next()?;
        handle_event(&mut app, event)?;
    }

    log::info!("TUI exited");
    Ok(())
}
