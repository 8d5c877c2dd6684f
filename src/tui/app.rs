use ratatui::widgets::TableState;

use crate::models::{Task, Theme};
use crate::storage::Storage;
use crate::store::{EditOutcome, TaskStore};
use crate::undo::{PendingEdit, UndoController, DEFAULT_UNDO_WINDOW};

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

#[derive(PartialEq)]
pub enum ViewMode {
    Tasks,
    Trash,
}

/// State for the multi-step "Add Task" wizard.
#[derive(Default)]
pub struct AddState {
    pub text: String,
    pub due: String,
    pub step: usize, // 0: Text, 1: Due date, 2: Due time
}

pub struct App {
    pub store: TaskStore,
    pub undo: UndoController,
    pub theme: Theme,
    storage: Storage,
    /// Tasks currently shown in the Tasks view, in display order.
    pub visible: Vec<Task>,
    pub state: TableState,
    pub trash_state: TableState,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub add_state: AddState,
    pub edit_target: Option<String>,
    pub show_completed: bool,
    pub status: Option<String>,
}

impl App {
    /// Creates a new App instance and loads initial data.
    pub fn new() -> App {
        let storage = Storage::from_env();
        let store = TaskStore::load(storage.clone());
        let theme = storage.load_theme();

        let mut app = App {
            store,
            undo: UndoController::new(DEFAULT_UNDO_WINDOW),
            theme,
            storage,
            visible: Vec::new(),
            state: TableState::default(),
            trash_state: TableState::default(),
            view_mode: ViewMode::Tasks,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            add_state: AddState::default(),
            edit_target: None,
            show_completed: false,
            status: None,
        };
        app.reload();
        app
    }

    /// Refreshes the visible task list and clamps both selections.
    pub fn reload(&mut self) {
        self.visible = self
            .store
            .active_tasks()
            .iter()
            .filter(|t| self.show_completed || !t.completed)
            .cloned()
            .collect();

        if self.visible.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.visible.len() {
                self.state.select(Some(self.visible.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }

        let trash_len = self.store.trashed_tasks().len();
        if trash_len == 0 {
            self.trash_state.select(None);
        } else if let Some(i) = self.trash_state.selected() {
            if i >= trash_len {
                self.trash_state.select(Some(trash_len - 1));
            }
        } else {
            self.trash_state.select(Some(0));
        }
    }

    fn current_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Tasks => self.visible.len(),
            ViewMode::Trash => self.store.trashed_tasks().len(),
        }
    }

    fn current_state(&mut self) -> &mut TableState {
        match self.view_mode {
            ViewMode::Tasks => &mut self.state,
            ViewMode::Trash => &mut self.trash_state,
        }
    }

    /// Selects the next item in the current list.
    pub fn next(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let state = self.current_state();
        let i = match state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    /// Selects the previous item in the current list.
    pub fn previous(&mut self) {
        let len = self.current_len();
        if len == 0 {
            return;
        }
        let state = self.current_state();
        let i = match state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    fn selected_task_id(&self) -> Option<String> {
        if self.view_mode != ViewMode::Tasks {
            return None;
        }
        self.state
            .selected()
            .and_then(|i| self.visible.get(i))
            .map(|t| t.id.clone())
    }

    fn selected_trash_id(&self) -> Option<String> {
        if self.view_mode != ViewMode::Trash {
            return None;
        }
        self.trash_state
            .selected()
            .and_then(|i| self.store.trashed_tasks().get(i))
            .map(|t| t.id.clone())
    }

    fn report(&mut self, result: Result<(), crate::error::StoreError>) {
        if let Err(e) = result {
            self.status = Some(e.to_string());
        }
    }

    /// Toggles the completed flag on the selected task.
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let res = self.store.toggle_completed(&id);
            self.report(res);
            self.reload();
        }
    }

    /// Moves the selected task to the trash.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let res = self.store.delete_task(&id).map(|_| ());
            self.report(res);
            self.reload();
        }
    }

    /// Restores the selected trashed task.
    pub fn restore_selected(&mut self) {
        if let Some(id) = self.selected_trash_id() {
            let res = self.store.restore_task(&id).map(|_| ());
            self.report(res);
            self.reload();
        }
    }

    /// Permanently deletes the selected trashed task.
    pub fn purge_selected(&mut self) {
        if let Some(id) = self.selected_trash_id() {
            let res = self.store.purge_task(&id);
            self.report(res);
            self.reload();
        }
    }

    /// Permanently deletes everything in the trash.
    pub fn empty_trash(&mut self) {
        let res = self.store.empty_trash();
        self.report(res);
        self.reload();
    }

    /// Sorts by due date; repeated presses flip the direction.
    pub fn sort_by_due_date(&mut self) {
        let res = self.store.sort_by_due_date();
        self.report(res);
        self.reload();
    }

    /// Toggles the visibility of completed tasks.
    pub fn toggle_completed_visibility(&mut self) {
        self.show_completed = !self.show_completed;
        self.reload();
    }

    /// Toggles between Tasks and Trash views.
    pub fn toggle_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Tasks => ViewMode::Trash,
            ViewMode::Trash => ViewMode::Tasks,
        };
    }

    /// Flips the theme and persists the choice.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        let res = self.storage.save_theme(self.theme);
        self.report(res);
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Initiates editing of the selected task's text.
    pub fn start_edit(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(t) = self.visible.get(i) {
                self.edit_target = Some(t.id.clone());
                self.input_mode = InputMode::Editing;
                self.input_buffer = t.text.clone();
            }
        }
    }

    /// Applies the pending reversal for the last edit, if still available.
    pub fn undo_edit(&mut self) {
        if let Some(edit) = self.undo.commit() {
            match self.store.revert_edit(edit) {
                Ok(()) => self.status = Some("Edit undone.".to_string()),
                Err(e) => self.status = Some(e.to_string()),
            }
            self.reload();
        }
    }

    /// Drops the undo affordance once its window has lapsed.
    pub fn tick(&mut self) {
        self.undo.tick();
    }

    /// Handles a confirmed line of input based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            _ => {}
        }
    }

    /// Handles input for the "Add Task" wizard.
    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Text
                if !self.input_buffer.trim().is_empty() {
                    self.add_state.text = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                // Due date, optional
                self.add_state.due = self.input_buffer.clone();
                if self.add_state.due.is_empty() {
                    // No date means no time either; finish here.
                    self.finish_add(None);
                } else {
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            2 => {
                // Due time, optional
                let time = if self.input_buffer.is_empty() {
                    None
                } else {
                    Some(self.input_buffer.clone())
                };
                self.finish_add(time);
            }
            _ => {}
        }
    }

    fn finish_add(&mut self, time: Option<String>) {
        let due_date = if self.add_state.due.is_empty() {
            None
        } else {
            match chrono::NaiveDate::parse_from_str(&self.add_state.due, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    self.status = Some(format!("Invalid due date: {}", self.add_state.due));
                    None
                }
            }
        };
        let due_time = time.and_then(|t| {
            match chrono::NaiveTime::parse_from_str(&t, "%H:%M") {
                Ok(t) => Some(t),
                Err(_) => {
                    self.status = Some(format!("Invalid time: {}", t));
                    None
                }
            }
        });

        let res = self
            .store
            .add_task(&self.add_state.text, due_date, due_time)
            .map(|_| ());
        self.report(res);
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.reload();
    }

    /// Handles input for the "Edit Task" mode. A real change arms the undo
    /// controller; an empty or identical buffer leaves everything untouched.
    fn handle_editing_input(&mut self) {
        if let Some(id) = self.edit_target.take() {
            match self.store.edit_text(&id, &self.input_buffer) {
                Ok(EditOutcome::Changed { previous_text }) => {
                    self.undo.arm(PendingEdit {
                        task_id: id,
                        previous_text,
                    });
                    self.status = Some("Task edited. Press u to undo.".to_string());
                }
                Ok(EditOutcome::Unchanged) => {}
                Err(e) => self.status = Some(e.to_string()),
            }
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.reload();
    }
}
