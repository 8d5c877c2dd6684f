use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};

use crate::error::StoreError;
use crate::models::Task;
use crate::storage::Storage;
use crate::undo::PendingEdit;

/// Outcome of a text edit.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The new text was empty or identical; nothing was changed or saved.
    Unchanged,
    /// The text was replaced. `previous_text` is the reversal payload.
    Changed { previous_text: String },
}

/// In-memory authority over the task collections and their persisted form.
///
/// Holds the active collection (completed and not-yet-completed tasks alike)
/// and the trash (most-recently-deleted first). Every mutation persists the
/// collections it touched before returning; a failed save is reported but
/// never rolls the in-memory change back, so no operation can leave the two
/// collections inconsistent with each other.
#[derive(Debug)]
pub struct TaskStore {
    active: Vec<Task>,
    trashed: Vec<Task>,
    next_id: u64,
    sort_ascending: bool,
    storage: Storage,
}

impl TaskStore {
    /// Loads both collections from storage.
    ///
    /// The id counter is seeded past the highest numeric id found in either
    /// collection, so ids are never reused across runs. The sort direction
    /// always starts ascending in a fresh process; it is deliberately not
    /// persisted.
    pub fn load(storage: Storage) -> TaskStore {
        let active = storage.load_tasks();
        let trashed = storage.load_trashed();
        let next_id = active
            .iter()
            .chain(trashed.iter())
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        TaskStore {
            active,
            trashed,
            next_id,
            sort_ascending: true,
            storage,
        }
    }

    /// Snapshot of the active collection, in display order.
    pub fn active_tasks(&self) -> &[Task] {
        &self.active
    }

    /// Snapshot of the trash, most-recently-deleted first.
    pub fn trashed_tasks(&self) -> &[Task] {
        &self.trashed
    }

    /// Creates a task and appends it to the active collection.
    ///
    /// Rejects text that is empty after trimming. A due time without a due
    /// date is dropped, keeping the time field meaningful only alongside a
    /// date.
    pub fn add_task(
        &mut self,
        text: &str,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
    ) -> Result<Task, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyText);
        }
        let id = self.next_id.to_string();
        self.next_id += 1;
        let task = Task::new(id, text.to_string(), due_date, due_time);
        self.active.push(task.clone());
        self.storage.save_tasks(&self.active)?;
        Ok(task)
    }

    /// Flips the completed flag on an active task.
    pub fn toggle_completed(&mut self, id: &str) -> Result<(), StoreError> {
        let task = self
            .active
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        task.completed = !task.completed;
        self.storage.save_tasks(&self.active)?;
        Ok(())
    }

    /// Replaces the text of an active task.
    ///
    /// Empty (after trimming) or identical text is reported as
    /// [`EditOutcome::Unchanged`] with no mutation and no save. Otherwise the
    /// previous text is returned so the caller can arm an undo.
    pub fn edit_text(&mut self, id: &str, new_text: &str) -> Result<EditOutcome, StoreError> {
        let task = self
            .active
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let new_text = new_text.trim();
        if new_text.is_empty() || new_text == task.text {
            return Ok(EditOutcome::Unchanged);
        }
        let previous_text = std::mem::replace(&mut task.text, new_text.to_string());
        self.storage.save_tasks(&self.active)?;
        Ok(EditOutcome::Changed { previous_text })
    }

    /// Applies the reversal for an earlier edit, restoring the old text.
    ///
    /// The task may have been deleted since the edit, so the trash is
    /// searched as well. Reverting is itself not undoable.
    pub fn revert_edit(&mut self, edit: PendingEdit) -> Result<(), StoreError> {
        if let Some(task) = self.active.iter_mut().find(|t| t.id == edit.task_id) {
            task.text = edit.previous_text;
            return self.storage.save_tasks(&self.active);
        }
        if let Some(task) = self.trashed.iter_mut().find(|t| t.id == edit.task_id) {
            task.text = edit.previous_text;
            return self.storage.save_trashed(&self.trashed);
        }
        Err(StoreError::NotFound(edit.task_id))
    }

    /// Moves a task from the active collection to the front of the trash.
    ///
    /// The move is a single step: at no point is the task in neither or both
    /// collections.
    pub fn delete_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let idx = self
            .active
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let task = self.active.remove(idx);
        self.trashed.insert(0, task.clone());
        self.storage.save_tasks(&self.active)?;
        self.storage.save_trashed(&self.trashed)?;
        Ok(task)
    }

    /// Moves a task out of the trash back to the end of the active
    /// collection. Restored tasks always come back incomplete.
    pub fn restore_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let idx = self
            .trashed
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let mut task = self.trashed.remove(idx);
        task.completed = false;
        self.active.push(task.clone());
        self.storage.save_trashed(&self.trashed)?;
        self.storage.save_tasks(&self.active)?;
        Ok(task)
    }

    /// Permanently removes a task from the trash.
    pub fn purge_task(&mut self, id: &str) -> Result<(), StoreError> {
        let idx = self
            .trashed
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        self.trashed.remove(idx);
        self.storage.save_trashed(&self.trashed)
    }

    /// Permanently removes everything in the trash.
    ///
    /// Safe to call unconditionally: an already-empty trash is a no-op and
    /// does not touch storage.
    pub fn empty_trash(&mut self) -> Result<(), StoreError> {
        if self.trashed.is_empty() {
            return Ok(());
        }
        self.trashed.clear();
        self.storage.save_trashed(&self.trashed)
    }

    /// Stable-sorts the active collection by due date.
    ///
    /// Tasks with a due date always sort before tasks without one. Among
    /// dated tasks the direction alternates per call, ascending first; ties
    /// and undated tasks keep their relative order. The direction lives for
    /// the process only, so the first sort after a restart is ascending
    /// again.
    pub fn sort_by_due_date(&mut self) -> Result<(), StoreError> {
        let ascending = self.sort_ascending;
        self.active.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(da), Some(db)) => {
                if ascending {
                    da.cmp(&db)
                } else {
                    db.cmp(&da)
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        self.sort_ascending = !self.sort_ascending;
        self.storage.save_tasks(&self.active)
    }
}
