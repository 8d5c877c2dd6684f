//! # Taskbin
//!
//! A terminal task list with a trash can. Taskbin combines a fast CLI for quick entry with an interactive TUI, and keeps deleted tasks recoverable until you empty the trash.
//!
//! ## Features
//!
//! *   **Soft delete**: Deleted tasks land in a trash list and can be restored (always as incomplete) or purged for good.
//! *   **Undo on edit**: In the TUI, a text edit can be reverted for five seconds after saving.
//! *   **Due dates**: Optional due date and time per task; overdue tasks are highlighted.
//! *   **Due-date sorting**: Dated tasks sort before undated ones; repeat sorts flip the direction.
//! *   **Dual interface**:
//!     *   **CLI**: Scriptable and quick for single commands.
//!     *   **TUI**: Interactive dashboard with task and trash views and a light/dark theme.
//! *   **Data Persistence**: Tasks are stored in standard XDG data directories (JSON format).
//!
//! ## Installation
//!
//! ```bash
//! cargo install --path .
//! ```
//!
//! ## Usage
//!
//! ### Interactive Mode (TUI)
//!
//! Simply run the command without arguments to launch the interactive UI:
//!
//! ```bash
//! taskbin
//! # or explicitly
//! taskbin ui
//! ```
//!
//! #### TUI Key Bindings
//!
//! **Global**
//! *   `q`: Quit
//! *   `v`: Switch between Tasks and Trash views
//! *   `t`: Toggle light/dark theme
//!
//! **Tasks view**
//! *   `a`: Add new task
//! *   `Space`: Toggle completed on the selected task
//! *   `e`: Edit the selected task's text
//! *   `u`: Undo the last edit (within the undo window)
//! *   `d`: Move selected task to trash
//! *   `c`: Show/hide completed tasks
//! *   `s`: Sort by due date (press again to flip direction)
//!
//! **Trash view**
//! *   `r`: Restore selected task
//! *   `x`: Permanently delete selected task
//! *   `X`: Empty the trash
//!
//! ### Command Line Interface (CLI)
//!
//! ```bash
//! # Basic task
//! taskbin add "Buy milk"
//!
//! # With a due date and time
//! taskbin add "Call dentist" --due 2026-09-01 --time 14:30
//!
//! # List pending tasks (--all includes completed)
//! taskbin list
//!
//! # Toggle completion
//! taskbin toggle <ID>
//!
//! # Edit text
//! taskbin edit <ID> "Call dentist about crown"
//!
//! # Trash workflow
//! taskbin rm <ID>
//! taskbin trash
//! taskbin restore <ID>
//! taskbin purge <ID>
//! taskbin empty-trash
//!
//! # Sort by due date
//! taskbin sort
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/taskbin/tasks.json`
//! *   macOS: `~/Library/Application Support/taskbin/tasks.json`
//! *   Windows: `%APPDATA%\taskbin\tasks.json`
//!
//! Trashed tasks live next to them in `deletedTasks.json`. You can override
//! the directory by setting the `TASKBIN_DIR` environment variable.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use taskbin::commands::*;
use taskbin::tui::run_tui;

#[derive(Parser)]
#[command(name = "taskbin")]
#[command(about = "Task list with a trash can", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task text (quoted if it has spaces)
        text: String,
        /// Due date in YYYY-MM-DD
        #[arg(short, long)]
        due: Option<String>,
        /// Due time in HH:MM (needs --due)
        #[arg(short, long)]
        time: Option<String>,
    },
    /// List tasks
    List {
        /// Show completed tasks too
        #[arg(short, long)]
        all: bool,
    },
    /// Toggle a task's completed state
    Toggle {
        id: String,
    },
    /// Edit a task's text
    Edit {
        id: String,
        /// New text
        text: String,
    },
    /// Move a task to the trash
    Rm {
        id: String,
    },
    /// List trashed tasks
    Trash,
    /// Restore a trashed task
    Restore {
        id: String,
    },
    /// Permanently delete a trashed task
    Purge {
        id: String,
    },
    /// Permanently delete everything in the trash
    EmptyTrash {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Sort tasks by due date
    Sort,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { text, due, time }) => cmd_add(text, due, time, false),
        Some(Commands::List { all }) => cmd_list(all),
        Some(Commands::Toggle { id }) => cmd_toggle(id, false),
        Some(Commands::Edit { id, text }) => cmd_edit(id, text, false),
        Some(Commands::Rm { id }) => cmd_remove(id, false),
        Some(Commands::Trash) => cmd_trash(),
        Some(Commands::Restore { id }) => cmd_restore(id, false),
        Some(Commands::Purge { id }) => cmd_purge(id, false),
        Some(Commands::EmptyTrash { force }) => cmd_empty_trash(force),
        Some(Commands::Sort) => cmd_sort(false),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "taskbin", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
