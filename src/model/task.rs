use std::fmt;

use chrono::Local;
use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort rank by urgency: High sorts before Medium before Low
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parse a stored priority name. Unrecognized names fall back to Medium
    /// rather than failing, so a hand-edited task file still loads.
    pub fn from_name(name: &str) -> Priority {
        match name {
            "Low" => Priority::Low,
            "Medium" => Priority::Medium,
            "High" => Priority::High,
            _ => Priority::Medium,
        }
    }

    /// Strict parse for user input (case-insensitive), `None` if unrecognized
    pub fn parse(input: &str) -> Option<Priority> {
        match input.to_ascii_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" | "med" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Next priority in the input cycle: Low → Medium → High → Low
    pub fn cycle(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Priority::from_name(&name))
    }
}

/// Task completion status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Status {
    pub fn toggled(self) -> Status {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Accepts the strict string form plus one legacy representation: very old
/// task files stored `status` as a boolean. Migrated once, on load.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Name(String),
        }
        match Repr::deserialize(deserializer) {
            Ok(Repr::Flag(true)) => Ok(Status::Completed),
            Ok(Repr::Flag(false)) => Ok(Status::Pending),
            Ok(Repr::Name(name)) => Ok(match name.as_str() {
                "Completed" => Status::Completed,
                _ => Status::Pending,
            }),
            Err(_) => Err(D::Error::custom("status must be a string or boolean")),
        }
    }
}

/// Stable runtime identifier for a task.
///
/// Assigned by the store when a task is loaded or created, never persisted:
/// the on-disk record stays the plain five-field layout. Using an id instead
/// of the `(text, date)` pair means editing a task's text cannot sever
/// selection or click resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Compound display key: the field values a display surface can hand back
/// when it has no task handle, only what is printed in the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskKey {
    pub text: String,
    pub date: String,
}

/// A single to-do item.
///
/// Field order matches the persisted record layout:
/// `favorite`, `text`, `priority`, `date`, `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub favorite: bool,
    pub text: String,
    pub priority: Priority,
    /// Creation timestamp, local time at minute precision, immutable
    pub date: String,
    pub status: Status,
    #[serde(skip)]
    pub id: TaskId,
}

impl Task {
    /// Create a new pending, non-favorite task stamped with the current
    /// local time at minute precision.
    pub fn new(text: String, priority: Priority) -> Self {
        Task {
            favorite: false,
            text,
            priority,
            date: creation_stamp(),
            status: Status::Pending,
            id: TaskId::default(),
        }
    }

    pub fn key(&self) -> TaskKey {
        TaskKey {
            text: self.text.clone(),
            date: self.date.clone(),
        }
    }

    pub fn matches_key(&self, key: &TaskKey) -> bool {
        self.text == key.text && self.date == key.date
    }
}

/// Current local time formatted to minute precision
pub fn creation_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}
