//! Then steps for task status BDD scenarios.

use super::world::BoardWorld;
use cohort::sprint::{domain::SprintDomainError, services::SprintBoardServiceError};
use eyre::eyre;
use rstest_bdd_macros::then;

#[then(r#"the task status label is "{label}""#)]
fn task_status_label_is(world: &BoardWorld, label: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let task = world
        .tasks()?
        .into_iter()
        .find(|task| task.id() == task_id)
        .ok_or_else(|| eyre!("task {task_id} missing from the board"))?;
    let found = task.status().label();
    if found.as_str() != label {
        return Err(eyre!("expected label {label}, found {}", found.as_str()));
    }
    Ok(())
}

#[then(r#"the confirmation names the task and "{fragment}""#)]
fn confirmation_names_task(world: &BoardWorld, fragment: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let message = match world.last_transition.as_ref() {
        Some(Ok(outcome)) => outcome.message.as_str(),
        other => return Err(eyre!("expected a transition outcome, got {other:?}")),
    };
    let expected = format!("Task {task_id} {fragment}.");
    if message != expected {
        return Err(eyre!("expected confirmation {expected:?}, got {message:?}"));
    }
    Ok(())
}

#[then("the transition is rejected as an invalid status")]
fn transition_rejected(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_transition.as_ref() {
        Some(Err(SprintBoardServiceError::InvalidStatus(_))) => Ok(()),
        other => Err(eyre!("expected InvalidStatus, got {other:?}")),
    }
}

#[then("the transition is rejected for naming the wrong status")]
fn transition_rejected_wrong_status(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_transition.as_ref() {
        Some(Err(SprintBoardServiceError::LabelMismatch { .. })) => Ok(()),
        other => Err(eyre!("expected LabelMismatch, got {other:?}")),
    }
}

#[then("the task is rejected because the sprint is not open")]
fn task_rejected_sprint_not_open(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_added.as_ref() {
        Some(Err(SprintBoardServiceError::Domain(SprintDomainError::SprintNotOpen))) => Ok(()),
        other => Err(eyre!("expected SprintNotOpen, got {other:?}")),
    }
}

#[then("the sprint has no tasks")]
fn sprint_has_no_tasks(world: &BoardWorld) -> Result<(), eyre::Report> {
    let tasks = world.tasks()?;
    if !tasks.is_empty() {
        return Err(eyre!("expected no tasks, found {}", tasks.len()));
    }
    Ok(())
}
