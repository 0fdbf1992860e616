//! Sprint and task statuses and the external status vocabulary.

use super::{ParseSprintStatusError, ParseStatusLabelError, ParseTaskStatusError};
use crate::ids::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a sprint still accepts new tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprintStatus {
    /// Tasks may be added.
    Open,
    /// The sprint is finished; existing tasks stay editable.
    Closed,
}

impl SprintStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl TryFrom<&str> for SprintStatus {
    type Error = ParseSprintStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseSprintStatusError(value.to_owned())),
        }
    }
}

/// Internal task status as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Pending,
    /// Being worked on or awaiting review.
    Review,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// All statuses in board order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Review, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Returns the external label for this status.
    #[must_use]
    pub const fn label(self) -> StatusLabel {
        match self {
            Self::Pending => StatusLabel::ToDo,
            Self::Review => StatusLabel::InProgress,
            Self::Done => StatusLabel::Completed,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl From<StatusLabel> for TaskStatus {
    fn from(label: StatusLabel) -> Self {
        label.status()
    }
}

/// Status vocabulary exchanged with clients.
///
/// Labels map one-to-one onto [`TaskStatus`] and are matched exactly, so
/// `"to do"` is rejected just like any other unknown label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusLabel {
    /// `"To Do"`, stored as pending.
    #[serde(rename = "To Do")]
    ToDo,
    /// `"In Progress"`, stored as review.
    #[serde(rename = "In Progress")]
    InProgress,
    /// `"Completed"`, stored as done.
    #[serde(rename = "Completed")]
    Completed,
}

impl StatusLabel {
    /// All labels in board order.
    pub const ALL: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Completed];

    /// Returns the label text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Returns the internal status this label stands for.
    #[must_use]
    pub const fn status(self) -> TaskStatus {
        match self {
            Self::ToDo => TaskStatus::Pending,
            Self::InProgress => TaskStatus::Review,
            Self::Completed => TaskStatus::Done,
        }
    }
}

impl TryFrom<&str> for StatusLabel {
    type Error = ParseStatusLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == value)
            .ok_or_else(|| ParseStatusLabelError(value.to_owned()))
    }
}

impl From<TaskStatus> for StatusLabel {
    fn from(status: TaskStatus) -> Self {
        status.label()
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named task transitions offered to clients.
///
/// Each transition has one target status; the client repeats its label and
/// a request naming any other label is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskTransition {
    /// Work begins on a task.
    Start,
    /// A task is finished.
    Complete,
    /// A finished task goes back on the board.
    Reopen,
}

impl TaskTransition {
    /// Returns the label this transition writes.
    #[must_use]
    pub const fn target(self) -> StatusLabel {
        match self {
            Self::Start => StatusLabel::InProgress,
            Self::Complete => StatusLabel::Completed,
            Self::Reopen => StatusLabel::ToDo,
        }
    }

    /// Returns the transition name used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Reopen => "reopen",
        }
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::Start => "moved to",
            Self::Complete => "marked as",
            Self::Reopen => "reopened to",
        }
    }

    /// Builds the confirmation message for a transition of `task_id`.
    #[must_use]
    pub fn confirmation(self, task_id: TaskId, label: StatusLabel) -> String {
        format!("Task {task_id} {} {label}.", self.verb())
    }
}

impl fmt::Display for TaskTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
