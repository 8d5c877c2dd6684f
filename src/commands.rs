use std::io::{self, Write};

use chrono::{Local, NaiveDate, NaiveTime};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::Task;
use crate::storage::Storage;
use crate::store::{EditOutcome, TaskStore};

fn open_store() -> TaskStore {
    TaskStore::load(Storage::from_env())
}

fn parse_due(due: &str, silent: bool) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", due, e); }
            None
        }
    }
}

fn parse_time(time: &str, silent: bool) -> Option<NaiveTime> {
    match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(t) => Some(t),
        Err(e) => {
            if !silent { eprintln!("Invalid time '{}': {}. Use HH:MM.", time, e); }
            None
        }
    }
}

/// Adds a new task, optionally with a due date and time.
pub fn cmd_add(text: String, due: Option<String>, time: Option<String>, silent: bool) {
    let due_date = match due {
        Some(d) => match parse_due(&d, silent) {
            Some(d) => Some(d),
            None => return,
        },
        None => None,
    };
    let due_time = match time {
        Some(t) => match parse_time(&t, silent) {
            Some(t) => Some(t),
            None => return,
        },
        None => None,
    };
    if due_time.is_some() && due_date.is_none() && !silent {
        eprintln!("Ignoring --time: a time needs a due date.");
    }

    let mut store = open_store();
    match store.add_task(&text, due_date, due_time) {
        Ok(task) => {
            if !silent { println!("Task added (id = {})", task.id); }
        }
        Err(e) => {
            if !silent { eprintln!("Failed to add task: {}", e); }
        }
    }
}

/// Lists tasks in a formatted table.
///
/// By default, hides completed tasks unless `all` is true. Overdue tasks are
/// highlighted in red.
pub fn cmd_list(all: bool) {
    let store = open_store();
    let tasks: Vec<&Task> = store
        .active_tasks()
        .iter()
        .filter(|t| all || !t.completed)
        .collect();
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Time").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    let today = Local::now().date_naive();

    for t in tasks {
        let due = t.due_date.map(|d| d.to_string()).unwrap_or_default();
        let time = t
            .due_time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        let status = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };
        let due_color = if t.is_overdue(today) { Color::Red } else { Color::Reset };

        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(&t.text),
            Cell::new(due).fg(due_color),
            Cell::new(time),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{table}");
}

/// Flips the completed flag on a task.
pub fn cmd_toggle(id: String, silent: bool) {
    let mut store = open_store();
    match store.toggle_completed(&id) {
        Ok(()) => {
            if !silent { println!("Task {} toggled.", id); }
        }
        Err(e) => {
            if !silent { eprintln!("{}", e); }
        }
    }
}

/// Replaces the text of a task.
///
/// The CLI runs one process per command, so there is no undo window here;
/// the interactive UI is the surface that offers the reversal.
pub fn cmd_edit(id: String, text: String, silent: bool) {
    let mut store = open_store();
    match store.edit_text(&id, &text) {
        Ok(EditOutcome::Changed { previous_text }) => {
            if !silent { println!("Task {} updated (was: {}).", id, previous_text); }
        }
        Ok(EditOutcome::Unchanged) => {
            if !silent { println!("Task {} unchanged.", id); }
        }
        Err(e) => {
            if !silent { eprintln!("{}", e); }
        }
    }
}

/// Moves a task to the trash.
pub fn cmd_remove(id: String, silent: bool) {
    let mut store = open_store();
    match store.delete_task(&id) {
        Ok(task) => {
            if !silent { println!("Task moved to trash: {}", task.text); }
        }
        Err(e) => {
            if !silent { eprintln!("{}", e); }
        }
    }
}

/// Lists trashed tasks, most recently deleted first.
pub fn cmd_trash() {
    let store = open_store();
    let trashed = store.trashed_tasks();
    if trashed.is_empty() {
        println!("Trash is empty.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
        ]);
    for t in trashed {
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(&t.text),
            Cell::new(t.due_date.map(|d| d.to_string()).unwrap_or_default()),
        ]);
    }
    println!("{table}");
}

/// Restores a trashed task back to the active list, marked incomplete.
pub fn cmd_restore(id: String, silent: bool) {
    let mut store = open_store();
    match store.restore_task(&id) {
        Ok(task) => {
            if !silent { println!("Task restored: {}", task.text); }
        }
        Err(e) => {
            if !silent { eprintln!("{}", e); }
        }
    }
}

/// Permanently deletes a single trashed task.
pub fn cmd_purge(id: String, silent: bool) {
    let mut store = open_store();
    match store.purge_task(&id) {
        Ok(()) => {
            if !silent { println!("Task {} permanently deleted.", id); }
        }
        Err(e) => {
            if !silent { eprintln!("{}", e); }
        }
    }
}

/// Permanently deletes everything in the trash, after confirmation.
pub fn cmd_empty_trash(force: bool) {
    let mut store = open_store();
    if store.trashed_tasks().is_empty() {
        println!("Trash is already empty.");
        return;
    }

    if !force {
        print!(
            "Permanently delete all {} items in the trash? This cannot be undone. [y/N] ",
            store.trashed_tasks().len()
        );
        io::stdout().flush().unwrap();
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = store.empty_trash() {
        eprintln!("Failed to empty trash: {}", e);
    } else {
        println!("Trash emptied.");
    }
}

/// Sorts the active list by due date and saves the new order.
///
/// Dated tasks come first, earliest due first; each CLI invocation is a
/// fresh process, so this always sorts ascending.
pub fn cmd_sort(silent: bool) {
    let mut store = open_store();
    if let Err(e) = store.sort_by_due_date() {
        if !silent { eprintln!("Failed to sort tasks: {}", e); }
    } else if !silent {
        println!("Tasks sorted by due date.");
    }
}
