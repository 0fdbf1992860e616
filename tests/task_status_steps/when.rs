//! When steps for task status BDD scenarios.

use super::world::{BoardWorld, run_async};
use cohort::sprint::domain::TaskTransition;
use eyre::eyre;
use rstest_bdd_macros::when;

#[when(r#"a task "{description}" worth {points:i64} points is added"#)]
fn add_task(world: &mut BoardWorld, description: String, points: i64) -> Result<(), eyre::Report> {
    let request = world.add_request(description, points)?;
    world.last_added = Some(run_async(world.service.add_task(request)));
    Ok(())
}

#[when(r#"the task is {transition} with label "{label}""#)]
fn transition_task(
    world: &mut BoardWorld,
    transition: String,
    label: String,
) -> Result<(), eyre::Report> {
    let named = match transition.as_str() {
        "started" => TaskTransition::Start,
        "completed" => TaskTransition::Complete,
        "reopened" => TaskTransition::Reopen,
        other => return Err(eyre!("unknown transition in scenario: {other}")),
    };
    let task_id = world.task_id()?;
    world.last_transition = Some(run_async(
        world.service.transition_task(task_id, named, &label),
    ));
    Ok(())
}
