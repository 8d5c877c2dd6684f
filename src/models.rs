use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Represents a single task in the task manager.
///
/// The serialized form keeps the field names of the persisted layout
/// (`dueDate`, `dueTime`), so existing data files load unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation and never reused.
    pub id: String,
    /// The display text of the task.
    pub text: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Optional due date (date-only, local interpretation).
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Optional time-of-day, stored as "HH:MM"; only set when `due_date` is.
    #[serde(default, with = "hhmm")]
    pub due_time: Option<NaiveTime>,
}

impl Task {
    /// Creates a new active, not-completed task.
    ///
    /// A `due_time` without a `due_date` is dropped: the time field is only
    /// meaningful alongside a date.
    pub fn new(
        id: String,
        text: String,
        due_date: Option<NaiveDate>,
        due_time: Option<NaiveTime>,
    ) -> Task {
        Task {
            id,
            text,
            completed: false,
            due_date,
            due_time: if due_date.is_some() { due_time } else { None },
        }
    }

    /// Returns true if the task is past its due date and not yet completed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => !self.completed && due < today,
            None => false,
        }
    }
}

/// UI color scheme, persisted alongside the task collections.
///
/// An absent or unreadable persisted value means [`Theme::Dark`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Returns the other theme.
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Serde helper for `Option<NaiveTime>` in "HH:MM" form.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => s.serialize_str(&t.format(FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(d)?;
        match opt {
            Some(s) => NaiveTime::parse_from_str(&s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
