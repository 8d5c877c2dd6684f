use std::collections::HashSet;
use std::env;
use std::fs;

use chrono::NaiveDate;
use taskbin::storage::Storage;
use taskbin::store::{EditOutcome, TaskStore};

/// Runs a test against a store backed by a fresh temp directory.
fn with_test_store<F>(test_name: &str, f: F)
where
    F: FnOnce(&mut TaskStore, Storage),
{
    let mut dir = env::temp_dir();
    dir.push(format!("taskbin_store_test_{}", test_name));
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();

    let storage = Storage::new(dir.clone());
    let mut store = TaskStore::load(storage.clone());
    f(&mut store, storage);

    fs::remove_dir_all(&dir).unwrap();
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_add_assigns_unique_ids() {
    with_test_store("unique_ids", |store, _| {
        store.add_task("One", None, None).unwrap();
        store.add_task("Two", None, None).unwrap();
        let deleted = store.add_task("Three", None, None).unwrap();
        store.delete_task(&deleted.id).unwrap();
        store.add_task("Four", None, None).unwrap();

        let ids: Vec<&str> = store
            .active_tasks()
            .iter()
            .chain(store.trashed_tasks().iter())
            .map(|t| t.id.as_str())
            .collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(unique.len(), 4);
    });
}

#[test]
fn test_add_rejects_empty_text() {
    with_test_store("empty_text", |store, _| {
        assert!(store.add_task("", None, None).is_err());
        assert!(store.add_task("   ", None, None).is_err());
        assert!(store.active_tasks().is_empty());
    });
}

#[test]
fn test_add_trims_text() {
    with_test_store("trims", |store, _| {
        let task = store.add_task("  Buy milk  ", None, None).unwrap();
        assert_eq!(task.text, "Buy milk");
    });
}

#[test]
fn test_time_without_date_is_dropped() {
    with_test_store("time_no_date", |store, _| {
        let time = chrono::NaiveTime::from_hms_opt(14, 30, 0);
        let task = store.add_task("Call dentist", None, time).unwrap();
        assert_eq!(task.due_date, None);
        assert_eq!(task.due_time, None);

        let dated = store
            .add_task("Call plumber", Some(date("2026-09-01")), time)
            .unwrap();
        assert_eq!(dated.due_time, time);
    });
}

#[test]
fn test_toggle_completed() {
    with_test_store("toggle", |store, _| {
        let task = store.add_task("Task", None, None).unwrap();
        assert!(!task.completed);

        store.toggle_completed(&task.id).unwrap();
        assert!(store.active_tasks()[0].completed);

        store.toggle_completed(&task.id).unwrap();
        assert!(!store.active_tasks()[0].completed);

        assert!(store.toggle_completed("no-such-id").is_err());
    });
}

#[test]
fn test_delete_then_restore_round_trip() {
    with_test_store("delete_restore", |store, _| {
        let task = store
            .add_task("Buy milk", Some(date("2026-09-01")), None)
            .unwrap();
        store.toggle_completed(&task.id).unwrap();

        let deleted = store.delete_task(&task.id).unwrap();
        assert!(deleted.completed);
        assert!(store.active_tasks().is_empty());
        assert_eq!(store.trashed_tasks().len(), 1);

        let restored = store.restore_task(&task.id).unwrap();
        assert!(!restored.completed);
        assert_eq!(restored.id, task.id);
        assert_eq!(restored.text, task.text);
        assert_eq!(restored.due_date, task.due_date);
        assert_eq!(store.active_tasks().len(), 1);
        assert!(store.trashed_tasks().is_empty());
    });
}

#[test]
fn test_delete_prepends_to_trash() {
    with_test_store("trash_order", |store, _| {
        let a = store.add_task("First", None, None).unwrap();
        let b = store.add_task("Second", None, None).unwrap();

        store.delete_task(&a.id).unwrap();
        store.delete_task(&b.id).unwrap();

        // Most recently deleted comes first.
        let trashed: Vec<&str> = store.trashed_tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(trashed, vec!["Second", "First"]);
    });
}

#[test]
fn test_edit_text_unchanged_cases() {
    with_test_store("edit_unchanged", |store, _| {
        let task = store.add_task("Draft report", None, None).unwrap();

        assert_eq!(
            store.edit_text(&task.id, "").unwrap(),
            EditOutcome::Unchanged
        );
        assert_eq!(
            store.edit_text(&task.id, "   ").unwrap(),
            EditOutcome::Unchanged
        );
        assert_eq!(
            store.edit_text(&task.id, "Draft report").unwrap(),
            EditOutcome::Unchanged
        );
        assert_eq!(store.active_tasks()[0].text, "Draft report");
    });
}

#[test]
fn test_edit_text_returns_previous() {
    with_test_store("edit_changed", |store, _| {
        let task = store.add_task("Draft report", None, None).unwrap();

        let outcome = store.edit_text(&task.id, "Draft report v2").unwrap();
        assert_eq!(
            outcome,
            EditOutcome::Changed {
                previous_text: "Draft report".to_string()
            }
        );
        assert_eq!(store.active_tasks()[0].text, "Draft report v2");

        assert!(store.edit_text("no-such-id", "x").is_err());
    });
}

#[test]
fn test_purge_task() {
    with_test_store("purge", |store, _| {
        let task = store.add_task("Pay rent", None, None).unwrap();
        store.delete_task(&task.id).unwrap();

        store.purge_task(&task.id).unwrap();
        assert!(store.trashed_tasks().is_empty());
        assert!(store.active_tasks().is_empty());

        assert!(store.purge_task(&task.id).is_err());
    });
}

#[test]
fn test_empty_trash_is_idempotent() {
    with_test_store("empty_trash", |store, _| {
        store.empty_trash().unwrap();
        store.empty_trash().unwrap();

        let task = store.add_task("Task", None, None).unwrap();
        store.delete_task(&task.id).unwrap();
        store.empty_trash().unwrap();
        assert!(store.trashed_tasks().is_empty());

        store.empty_trash().unwrap();
        assert!(store.trashed_tasks().is_empty());
    });
}

#[test]
fn test_sort_dated_before_undated_and_direction_toggle() {
    with_test_store("sort_toggle", |store, _| {
        store.add_task("no date 1", None, None).unwrap();
        store
            .add_task("late", Some(date("2026-03-01")), None)
            .unwrap();
        store.add_task("no date 2", None, None).unwrap();
        store
            .add_task("early", Some(date("2026-01-01")), None)
            .unwrap();
        store
            .add_task("middle", Some(date("2026-02-01")), None)
            .unwrap();

        store.sort_by_due_date().unwrap();
        let order: Vec<&str> = store.active_tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["early", "middle", "late", "no date 1", "no date 2"]);

        // Second call flips direction for dated tasks; undated stay at the
        // end in their original relative order.
        store.sort_by_due_date().unwrap();
        let order: Vec<&str> = store.active_tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["late", "middle", "early", "no date 1", "no date 2"]);
    });
}

#[test]
fn test_sort_single_dated_task_scenario() {
    with_test_store("sort_single_dated", |store, _| {
        store.add_task("Buy milk", None, None).unwrap();
        store
            .add_task("Call dentist", Some(date("2024-01-10")), None)
            .unwrap();

        store.sort_by_due_date().unwrap();
        let order: Vec<&str> = store.active_tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["Call dentist", "Buy milk"]);

        // Only one dated task, so the direction toggle has no visible effect.
        store.sort_by_due_date().unwrap();
        let order: Vec<&str> = store.active_tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["Call dentist", "Buy milk"]);
    });
}

#[test]
fn test_state_survives_reload() {
    with_test_store("reload", |store, storage| {
        let kept = store
            .add_task("Kept", Some(date("2026-05-01")), None)
            .unwrap();
        let trashed = store.add_task("Trashed", None, None).unwrap();
        store.toggle_completed(&kept.id).unwrap();
        store.delete_task(&trashed.id).unwrap();

        let reloaded = TaskStore::load(storage);
        assert_eq!(reloaded.active_tasks().len(), 1);
        assert_eq!(reloaded.active_tasks()[0].text, "Kept");
        assert!(reloaded.active_tasks()[0].completed);
        assert_eq!(reloaded.active_tasks()[0].due_date, Some(date("2026-05-01")));
        assert_eq!(reloaded.trashed_tasks().len(), 1);
        assert_eq!(reloaded.trashed_tasks()[0].text, "Trashed");
    });
}

#[test]
fn test_ids_not_reused_after_reload() {
    with_test_store("id_reuse", |store, storage| {
        let first = store.add_task("First", None, None).unwrap();
        store.delete_task(&first.id).unwrap();

        let mut reloaded = TaskStore::load(storage);
        let second = reloaded.add_task("Second", None, None).unwrap();
        assert_ne!(first.id, second.id);
    });
}
