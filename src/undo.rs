use std::time::{Duration, Instant};

/// How long an edit remains reversible.
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(5);

/// The reversal for a committed text edit, held until applied or expired.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    /// Id of the edited task.
    pub task_id: String,
    /// The text the task had before the edit.
    pub previous_text: String,
}

/// Single-slot, time-bounded undo for the most recent text edit.
///
/// The controller is either idle or holding one pending reversal with a
/// deadline. Arming while pending discards the old reversal without applying
/// it; committing after the deadline yields nothing and the edit becomes
/// permanent. Every method has an `*_at` variant taking an explicit
/// [`Instant`], so the window can be exercised in tests without waiting.
#[derive(Debug)]
pub struct UndoController {
    pending: Option<(PendingEdit, Instant)>,
    window: Duration,
}

impl UndoController {
    /// Creates a controller with the given undo window.
    pub fn new(window: Duration) -> UndoController {
        UndoController { pending: None, window }
    }

    /// Arms the controller with a new reversal, replacing any pending one.
    pub fn arm(&mut self, edit: PendingEdit) {
        self.arm_at(edit, Instant::now());
    }

    /// Arms the controller as of `now`.
    pub fn arm_at(&mut self, edit: PendingEdit, now: Instant) {
        self.pending = Some((edit, now + self.window));
    }

    /// Takes the pending reversal if one is armed and still within its
    /// window. The slot is cleared either way.
    pub fn commit(&mut self) -> Option<PendingEdit> {
        self.commit_at(Instant::now())
    }

    /// Commits as of `now`.
    pub fn commit_at(&mut self, now: Instant) -> Option<PendingEdit> {
        match self.pending.take() {
            Some((edit, deadline)) if now <= deadline => Some(edit),
            _ => None,
        }
    }

    /// Clears the slot if the window has lapsed. Called from the event loop
    /// so the UI can drop its undo affordance without a keypress.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Expires as of `now`.
    pub fn tick_at(&mut self, now: Instant) {
        if let Some((_, deadline)) = &self.pending {
            if now > *deadline {
                self.pending = None;
            }
        }
    }

    /// Discards any pending reversal without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns the pending reversal, if any, without consuming it.
    pub fn pending(&self) -> Option<&PendingEdit> {
        self.pending.as_ref().map(|(edit, _)| edit)
    }

    /// Time left in the undo window as of `now`, if a reversal is pending.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}
