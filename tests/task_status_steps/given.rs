//! Given steps for task status BDD scenarios.

use super::world::{BoardWorld, run_async};
use crate::test_helpers::OWNER_ROLL;
use cohort::sprint::services::CreateSprintRequest;
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::given;

#[given("an open sprint")]
fn open_sprint(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let request = CreateSprintRequest::new(
        world.project_id,
        "Sprint A",
        "2026-03-02",
        "2026-03-15",
        OWNER_ROLL,
    );
    let sprint = run_async(world.service.create_sprint(request)).wrap_err("open sprint")?;
    world.sprint = Some(sprint);
    Ok(())
}

#[given("the sprint is closed")]
fn sprint_is_closed(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let sprint_id = world
        .sprint
        .as_ref()
        .map(|sprint| sprint.id())
        .ok_or_else(|| eyre!("missing sprint in scenario world"))?;
    let closed = run_async(world.service.change_sprint_status(sprint_id, "closed"))
        .wrap_err("close sprint")?;
    world.sprint = Some(closed);
    Ok(())
}

#[given(r#"a task "{description}" worth {points:i64} points exists"#)]
fn task_exists(world: &mut BoardWorld, description: String, points: i64) -> Result<(), eyre::Report> {
    let request = world.add_request(description, points)?;
    let task = run_async(world.service.add_task(request)).wrap_err("add task in setup")?;
    world.last_added = Some(Ok(task));
    Ok(())
}
