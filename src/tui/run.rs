//! TUI entry point and terminal setup.

use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::content::ContentUpdate;
use crate::router::Location;
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::tui::app::App;

/// Initialise the terminal and run the UI until the user quits.
pub fn run_tui<S: KeyValueStore>(
    store: TaskStore<S>,
    start: Location,
    updates: UnboundedReceiver<ContentUpdate>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, start, updates);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
