use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::error::StoreError;
use crate::models::{Task, Theme};

/// File name for the active task collection.
const TASKS_FILE: &str = "tasks.json";
/// File name for the trash. Matches the key the original data layout used.
const TRASH_FILE: &str = "deletedTasks.json";
/// File name for the persisted color scheme.
const THEME_FILE: &str = "theme.json";

/// Persistence adapter: a directory of JSON documents, one per collection.
///
/// Loads are tolerant (a missing or unparsable file yields the empty
/// collection); saves truncate and rewrite the whole document and report
/// I/O failures to the caller.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Creates a storage adapter rooted at the given directory.
    pub fn new(dir: PathBuf) -> Storage {
        Storage { dir }
    }

    /// Resolves the data directory and creates it if needed.
    ///
    /// The directory is determined in the following order:
    /// 1. `TASKBIN_DIR` environment variable.
    /// 2. `~/.local/share/taskbin` (on Linux).
    /// 3. `.` (fallback).
    pub fn from_env() -> Storage {
        let dir = std::env::var("TASKBIN_DIR").map(PathBuf::from).unwrap_or_else(|_| {
            let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("taskbin");
            p
        });
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        Storage { dir }
    }

    fn path(&self, file: &str) -> PathBuf {
        let mut p = self.dir.clone();
        p.push(file);
        p
    }

    fn read_to_string(&self, file: &str) -> Option<String> {
        let path = self.path(file);
        if !path.exists() {
            return None;
        }
        let mut f = OpenOptions::new().read(true).open(&path).ok()?;
        let mut s = String::new();
        f.read_to_string(&mut s).ok()?;
        Some(s)
    }

    fn write_string(&self, file: &str, contents: &str) -> Result<(), StoreError> {
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path(file))?;
        f.write_all(contents.as_bytes())?;
        Ok(())
    }

    fn load_collection(&self, file: &str) -> Vec<Task> {
        match self.read_to_string(file) {
            Some(s) => serde_json::from_str(&s).unwrap_or_else(|_| Vec::new()),
            None => Vec::new(),
        }
    }

    fn save_collection(&self, file: &str, tasks: &[Task]) -> Result<(), StoreError> {
        let s = serde_json::to_string_pretty(tasks)?;
        self.write_string(file, &s)
    }

    /// Loads the active task collection.
    ///
    /// Returns an empty vector if the file does not exist or cannot be read.
    pub fn load_tasks(&self) -> Vec<Task> {
        self.load_collection(TASKS_FILE)
    }

    /// Saves the active task collection, overwriting the existing file.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.save_collection(TASKS_FILE, tasks)
    }

    /// Loads the trashed task collection.
    pub fn load_trashed(&self) -> Vec<Task> {
        self.load_collection(TRASH_FILE)
    }

    /// Saves the trashed task collection.
    pub fn save_trashed(&self, tasks: &[Task]) -> Result<(), StoreError> {
        self.save_collection(TRASH_FILE, tasks)
    }

    /// Loads the persisted theme. Absent or unreadable means dark.
    pub fn load_theme(&self) -> Theme {
        match self.read_to_string(THEME_FILE) {
            Some(s) => serde_json::from_str(&s).unwrap_or_default(),
            None => Theme::default(),
        }
    }

    /// Saves the theme.
    pub fn save_theme(&self, theme: Theme) -> Result<(), StoreError> {
        let s = serde_json::to_string(&theme)?;
        self.write_string(THEME_FILE, &s)
    }
}
