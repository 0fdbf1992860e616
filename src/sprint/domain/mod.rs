//! Domain model for sprints and their tasks.
//!
//! Sprints gate task creation through their open/closed status; tasks move
//! freely between statuses. The external `"To Do" | "In Progress" |
//! "Completed"` vocabulary is translated here and nowhere else.

mod error;
mod progress;
mod sprint;
mod status;
mod task;

pub use error::{
    ParseSprintStatusError, ParseStatusLabelError, ParseTaskStatusError, SprintDomainError,
};
pub use progress::ProjectProgress;
pub use sprint::{NewSprint, PersistedSprintData, Sprint, SprintNumber, SprintPeriod};
pub use status::{SprintStatus, StatusLabel, TaskStatus, TaskTransition};
pub use task::{NewTask, PersistedTaskData, StoryPoints, Task, TaskDraft, TaskEdit};
