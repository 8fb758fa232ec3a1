//! Command implementations for the CLI interface.
//!
//! Every Task Store operation has a non-interactive subcommand here; `ui`
//! launches the terminal interface and starts the content providers.

use std::error::Error;

use chrono::Local;
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::Cli;
use crate::content::{offline_updates, spawn_providers, ContentConfig, DEFAULT_COUNTRY};
use crate::router::Location;
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::Task;
use crate::tui::run::run_tui;

pub type CmdResult = Result<(), Box<dyn Error>>;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI.
    Ui {
        /// Location to open: "/" or "/task/<id>".
        #[arg(long, default_value = "/")]
        at: Location,
        /// Skip the quote and name-day fetches.
        #[arg(long)]
        offline: bool,
        /// Country code for name days.
        #[arg(long, default_value = DEFAULT_COUNTRY)]
        country: String,
    },

    /// Add a new task.
    Add {
        /// Short title for the task.
        text: String,
    },

    /// List tasks in the order they were added.
    List,

    /// Show a single task with its notes.
    View {
        /// Task ID.
        id: u64,
    },

    /// Mark a task done, or undo it.
    Toggle {
        /// Task ID.
        id: u64,
    },

    /// Replace a task's notes.
    Note {
        /// Task ID.
        id: u64,
        /// New notes, stored exactly as given.
        text: String,
    },

    /// Delete a task.
    Delete {
        /// Task ID.
        id: u64,
    },

    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// One list line: completion box, id and title.
pub fn format_task_line(task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    format!("{mark} {:<14} {}", task.id, task.text)
}

/// Multi-line rendering used by `view`.
pub fn format_task_detail(task: &Task) -> String {
    let mut out = format!(
        "ID:     {}\nTitle:  {}\nStatus: {}\n",
        task.id,
        task.text,
        if task.completed { "Done" } else { "Open" }
    );
    if task.description.is_empty() {
        out.push_str("Notes:  -\n");
    } else {
        out.push_str("Notes:\n");
        for line in task.description.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

pub fn cmd_ui<S: KeyValueStore>(store: TaskStore<S>, at: Location, offline: bool, country: String) -> CmdResult {
    let runtime = tokio::runtime::Runtime::new()?;
    let (tx, rx) = mpsc::unbounded_channel();

    if offline {
        for update in offline_updates(Local::now().date_naive()) {
            let _ = tx.send(update);
        }
    } else {
        let config = ContentConfig {
            country,
            ..ContentConfig::default()
        };
        spawn_providers(runtime.handle(), config, tx);
    }

    info!(location = %at, offline, "starting ui");
    let result = run_tui(store, at, rx);
    // Pending fetches are abandoned with the runtime.
    runtime.shutdown_background();
    Ok(result?)
}

pub fn cmd_add<S: KeyValueStore>(store: &mut TaskStore<S>, text: &str) -> CmdResult {
    let before = store.tasks().len();
    let tasks = store.add(text)?;
    if tasks.len() > before {
        if let Some(task) = tasks.last() {
            println!("Added task {}: {}", task.id, task.text);
        }
    } else {
        println!("Nothing to add");
    }
    Ok(())
}

pub fn cmd_list<S: KeyValueStore>(store: &TaskStore<S>) {
    if store.tasks().is_empty() {
        println!("No tasks");
        return;
    }
    for task in store.tasks() {
        println!("{}", format_task_line(task));
    }
}

pub fn cmd_view<S: KeyValueStore>(store: &TaskStore<S>, id: u64) {
    match store.get(id) {
        Some(task) => print!("{}", format_task_detail(task)),
        None => println!("Task {id} not found"),
    }
}

pub fn cmd_toggle<S: KeyValueStore>(store: &mut TaskStore<S>, id: u64) -> CmdResult {
    store.toggle_complete(id)?;
    match store.get(id) {
        Some(task) if task.completed => println!("Task {id} marked as done"),
        Some(_) => println!("Task {id} reopened"),
        None => println!("Task {id} not found"),
    }
    Ok(())
}

pub fn cmd_note<S: KeyValueStore>(store: &mut TaskStore<S>, id: u64, text: &str) -> CmdResult {
    store.set_description(id, text)?;
    if store.get(id).is_some() {
        println!("Notes updated for task {id}");
    } else {
        println!("Task {id} not found");
    }
    Ok(())
}

pub fn cmd_delete<S: KeyValueStore>(store: &mut TaskStore<S>, id: u64) -> CmdResult {
    let existed = store.get(id).is_some();
    store.delete(id)?;
    if existed {
        println!("Deleted task {id}");
    } else {
        println!("Task {id} not found");
    }
    Ok(())
}

pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_format_task_line() {
        let mut task = Task::new(17, "Buy milk");
        assert_eq!(format_task_line(&task), "[ ] 17             Buy milk");
        task.completed = true;
        assert!(format_task_line(&task).starts_with("[x] 17"));
    }

    #[test]
    fn test_format_task_detail() {
        let mut task = Task::new(3, "Buy milk");
        assert_eq!(format_task_detail(&task), "ID:     3\nTitle:  Buy milk\nStatus: Open\nNotes:  -\n");
        task.description = "2%\nsemi".to_string();
        task.completed = true;
        assert_eq!(
            format_task_detail(&task),
            "ID:     3\nTitle:  Buy milk\nStatus: Done\nNotes:\n  2%\n  semi\n"
        );
    }

    #[test]
    fn test_commands_drive_store() {
        let mut store = TaskStore::load(MemoryStorage::new());
        cmd_add(&mut store, "Buy milk").unwrap();
        cmd_add(&mut store, "  ").unwrap();
        assert_eq!(store.tasks().len(), 1);
        let id = store.tasks()[0].id;

        cmd_note(&mut store, id, "2%").unwrap();
        cmd_toggle(&mut store, id).unwrap();
        let task = store.get(id).unwrap();
        assert_eq!(task.description, "2%");
        assert!(task.completed);

        cmd_delete(&mut store, id).unwrap();
        assert!(store.tasks().is_empty());
        cmd_delete(&mut store, id).unwrap();
    }
}
