//! # daylist - a terminal to-do list
//!
//! A small to-do list for the terminal: add short tasks, open a task to keep
//! free-text notes, mark it done or delete it. Every change is saved at once.
//! The list view also shows a quote of the moment, and the footer shows
//! today's date with the names celebrating their name day.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI (the default command)
//! daylist
//!
//! # Open a task directly
//! daylist ui --at /task/1718000000000
//!
//! # Scriptable equivalents
//! daylist add "Buy milk"
//! daylist list
//! daylist note 1718000000000 "2%"
//! daylist toggle 1718000000000
//! daylist delete 1718000000000
//! ```
//!
//! ## Locations
//!
//! The UI has two views addressed like web paths: `/` is the task list and
//! `/task/<id>` is a task's detail page. Deleting a task always returns to
//! the list. A detail path for a task that doesn't exist shows a
//! "Task not found" page with a way back.
//!
//! ## Storage
//!
//! Tasks live in `~/.daylist/todo-tasks.json` (or under `--data-dir`) as a
//! JSON array of `{id, text, description, completed}` objects. A missing or
//! unreadable file means an empty list. Logs go to `daylist.log` in the same
//! directory; set `DAYLIST_LOG` to change the filter.
//!
//! The quote and name days come from public APIs. When they can't be reached
//! fixed fallbacks are shown instead, never an error.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod content;
pub mod logging;
pub mod router;
pub mod storage;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
}

use cli::Cli;
use cmd::*;
use content::DEFAULT_COUNTRY;
use router::Location;
use storage::FileStorage;
use store::TaskStore;

fn main() {
    let cli = Cli::parse();
    let data_dir = cli.data_dir();

    if let Some(Commands::Completions { shell }) = &cli.command {
        cmd_completions(*shell);
        return;
    }

    if let Err(e) = logging::init_logging(&data_dir, &cli.log_level) {
        eprintln!("Logging disabled: {e}");
    }

    let storage = match FileStorage::open(&data_dir) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Failed to open data directory {}: {e}", data_dir.display());
            std::process::exit(1);
        }
    };
    let mut store = TaskStore::load(storage);

    let command = cli.command.unwrap_or(Commands::Ui {
        at: Location::List,
        offline: false,
        country: DEFAULT_COUNTRY.to_string(),
    });

    let result = match command {
        Commands::Ui { at, offline, country } => cmd_ui(store, at, offline, country),
        Commands::Add { text } => cmd_add(&mut store, &text),
        Commands::List => {
            cmd_list(&store);
            Ok(())
        }
        Commands::View { id } => {
            cmd_view(&store, id);
            Ok(())
        }
        Commands::Toggle { id } => cmd_toggle(&mut store, id),
        Commands::Note { id, text } => cmd_note(&mut store, id, &text),
        Commands::Delete { id } => cmd_delete(&mut store, id),
        Commands::Completions { .. } => unreachable!("completions handled above"),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
