//! Completion figures across all tasks of a project.

use super::{Task, TaskStatus};
use serde::Serialize;

/// Task counts and story point totals for a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectProgress {
    /// Number of tasks across all sprints.
    pub total_tasks: u64,
    /// Tasks still to do.
    pub pending_tasks: u64,
    /// Tasks in progress.
    pub review_tasks: u64,
    /// Completed tasks.
    pub done_tasks: u64,
    /// Sum of story points.
    pub total_points: u64,
    /// Sum of story points of completed tasks.
    pub completed_points: u64,
    /// Completed tasks as a whole percentage of all tasks, rounded down.
    pub completion_percent: u64,
}

impl ProjectProgress {
    /// Summarises `tasks`. A project without tasks reports all zeros.
    #[must_use]
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut progress = tasks.into_iter().fold(Self::default(), |mut acc, task| {
            let points = u64::from(task.points().value());
            acc.total_tasks += 1;
            acc.total_points += points;
            match task.status() {
                TaskStatus::Pending => acc.pending_tasks += 1,
                TaskStatus::Review => acc.review_tasks += 1,
                TaskStatus::Done => {
                    acc.done_tasks += 1;
                    acc.completed_points += points;
                }
            }
            acc
        });
        progress.completion_percent = progress
            .done_tasks
            .saturating_mul(100)
            .checked_div(progress.total_tasks)
            .unwrap_or(0);
        progress
    }

    /// Returns the count for `status`.
    #[must_use]
    pub const fn count(&self, status: TaskStatus) -> u64 {
        match status {
            TaskStatus::Pending => self.pending_tasks,
            TaskStatus::Review => self.review_tasks,
            TaskStatus::Done => self.done_tasks,
        }
    }
}
