use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use taskbin::commands::*;
use taskbin::storage::Storage;

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_dir<F>(test_name: &str, f: F)
where
    F: FnOnce(Storage),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let mut dir = env::temp_dir();
    dir.push(format!("taskbin_cmd_test_{}", test_name));

    // Clean up before test
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    env::set_var("TASKBIN_DIR", dir.to_str().unwrap());

    // Run test
    f(Storage::new(PathBuf::from(&dir)));

    // Clean up after test
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    env::remove_var("TASKBIN_DIR");
}

#[test]
fn test_add_and_load() {
    with_test_dir("add_load", |storage| {
        cmd_add("Buy milk".into(), Some("2026-09-01".into()), Some("14:30".into()), true);

        let tasks = storage.load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Buy milk");
        assert!(!tasks[0].completed);
        assert_eq!(tasks[0].due_date.unwrap().to_string(), "2026-09-01");
        assert_eq!(tasks[0].due_time.unwrap().format("%H:%M").to_string(), "14:30");
    });
}

#[test]
fn test_add_rejects_bad_date() {
    with_test_dir("bad_date", |storage| {
        cmd_add("Task".into(), Some("not-a-date".into()), None, true);
        assert!(storage.load_tasks().is_empty());
    });
}

#[test]
fn test_toggle_command() {
    with_test_dir("toggle", |storage| {
        cmd_add("Task".into(), None, None, true);
        let id = storage.load_tasks()[0].id.clone();

        cmd_toggle(id.clone(), true);
        assert!(storage.load_tasks()[0].completed);

        cmd_toggle(id, true);
        assert!(!storage.load_tasks()[0].completed);
    });
}

#[test]
fn test_edit_command() {
    with_test_dir("edit", |storage| {
        cmd_add("Draft report".into(), None, None, true);
        let id = storage.load_tasks()[0].id.clone();

        cmd_edit(id.clone(), "Draft report v2".into(), true);
        assert_eq!(storage.load_tasks()[0].text, "Draft report v2");

        // Empty text leaves the task untouched.
        cmd_edit(id, "".into(), true);
        assert_eq!(storage.load_tasks()[0].text, "Draft report v2");
    });
}

#[test]
fn test_rm_and_restore() {
    with_test_dir("rm_restore", |storage| {
        cmd_add("Task".into(), None, None, true);
        let id = storage.load_tasks()[0].id.clone();
        cmd_toggle(id.clone(), true);

        cmd_remove(id.clone(), true);
        assert!(storage.load_tasks().is_empty());
        assert_eq!(storage.load_trashed().len(), 1);

        cmd_restore(id, true);
        let tasks = storage.load_tasks();
        assert_eq!(tasks.len(), 1);
        assert!(!tasks[0].completed);
        assert!(storage.load_trashed().is_empty());
    });
}

#[test]
fn test_purge_command() {
    with_test_dir("purge", |storage| {
        cmd_add("Pay rent".into(), None, None, true);
        let id = storage.load_tasks()[0].id.clone();

        cmd_remove(id.clone(), true);
        cmd_purge(id, true);

        assert!(storage.load_tasks().is_empty());
        assert!(storage.load_trashed().is_empty());
    });
}

#[test]
fn test_empty_trash_command() {
    with_test_dir("empty_trash", |storage| {
        cmd_add("One".into(), None, None, true);
        cmd_add("Two".into(), None, None, true);
        for task in storage.load_tasks() {
            cmd_remove(task.id, true);
        }
        assert_eq!(storage.load_trashed().len(), 2);

        cmd_empty_trash(true);
        assert!(storage.load_trashed().is_empty());

        // Safe on an already-empty trash.
        cmd_empty_trash(true);
        assert!(storage.load_trashed().is_empty());
    });
}

#[test]
fn test_sort_command_is_ascending() {
    with_test_dir("sort", |storage| {
        cmd_add("no date".into(), None, None, true);
        cmd_add("late".into(), Some("2026-03-01".into()), None, true);
        cmd_add("early".into(), Some("2026-01-01".into()), None, true);

        cmd_sort(true);

        let order: Vec<String> = storage.load_tasks().iter().map(|t| t.text.clone()).collect();
        assert_eq!(order, vec!["early", "late", "no date"]);
    });
}
