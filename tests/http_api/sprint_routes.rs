//! Sprint and task endpoints.

use super::harness::Harness;
use crate::test_helpers::OWNER_ROLL;
use axum::http::StatusCode;
use eyre::Result;
use rstest::rstest;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn sprints_are_numbered_per_project() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    assert_eq!(harness.open_sprint(project_id, "Sprint A").await?, 1);
    assert_eq!(harness.open_sprint(project_id, "Sprint B").await?, 2);

    let listing = harness
        .get(&format!("/project/view_sprints?project_id={project_id}"))
        .await?;
    assert_eq!(listing.status, StatusCode::OK);
    let sprints = listing.body["sprints"].as_array().cloned().unwrap_or_default();
    assert_eq!(sprints.len(), 2);
    assert_eq!(sprints.first().map(|sprint| &sprint["Status"]), Some(&json!("open")));
    assert_eq!(sprints.first().map(|sprint| &sprint["Start"]), Some(&json!("2026-03-02")));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn sprint_for_unknown_project_is_not_found() -> Result<()> {
    let harness = Harness::new();

    let reply = harness
        .post(
            "/project/create_sprint",
            &json!({
                "user_id": OWNER_ROLL,
                "project_id": 999,
                "name": "Sprint A",
                "start_date": "2026-03-02",
                "end_date": "2026-03-15",
            }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn sprint_ending_before_it_starts_is_rejected() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    let reply = harness
        .post(
            "/project/create_sprint",
            &json!({
                "user_id": OWNER_ROLL,
                "project_id": project_id,
                "name": "Backwards",
                "start_date": "2026-03-15",
                "end_date": "2026-03-02",
            }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn new_tasks_enter_the_board_as_to_do() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let number = harness.open_sprint(project_id, "Sprint A").await?;
    let task_id = harness.add_task(project_id, number, "Draw floor plans").await?;

    let board = harness
        .get(&format!("/project/view_tasks?project_id={project_id}"))
        .await?;

    assert_eq!(board.status, StatusCode::OK);
    let task = &board.body["sprints"][0]["tasks"][0];
    assert_eq!(task["task_id"], json!(task_id));
    assert_eq!(task["status"], json!("To Do"));
    assert_eq!(task["assigned_to"], json!(OWNER_ROLL));
    assert_eq!(task["points"], json!(3));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn closed_sprint_accepts_no_tasks() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let number = harness.open_sprint(project_id, "Sprint A").await?;
    let sprint_id = harness
        .get(&format!("/project/view_sprints?project_id={project_id}"))
        .await?
        .body["sprints"][0]["sprint_id"]
        .clone();

    let closed = harness
        .post(
            "/change/sprint/status",
            &json!({ "sprint_id": sprint_id, "status": "closed" }),
        )
        .await?;
    assert_eq!(closed.status, StatusCode::OK);

    let reply = harness
        .post(
            "/project/edit_tasks/add_task",
            &json!({
                "project_id": project_id,
                "sprint_number": number,
                "description": "Late work",
                "assigned_to": OWNER_ROLL,
                "points": 2,
                "user_id": OWNER_ROLL,
            }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.text("error"),
        Some("Cannot add task. Sprint is not open.")
    );
    let board = harness
        .get(&format!("/project/view_tasks?project_id={project_id}"))
        .await?;
    assert_eq!(board.body["sprints"][0]["tasks"], json!([]));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn task_in_unknown_sprint_is_not_found() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    let reply = harness
        .post(
            "/project/edit_tasks/add_task",
            &json!({
                "project_id": project_id,
                "sprint_number": 7,
                "description": "Orphan",
                "assigned_to": OWNER_ROLL,
                "points": 2,
                "user_id": OWNER_ROLL,
            }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[rstest]
#[case("/project/task/start", "In Progress", "moved to")]
#[case("/project/task/complete", "Completed", "marked as")]
#[case("/project/task/reopen", "To Do", "reopened to")]
#[tokio::test(flavor = "multi_thread")]
async fn named_transitions_confirm_the_written_label(
    #[case] path: &'static str,
    #[case] label: &'static str,
    #[case] verb: &'static str,
) -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let number = harness.open_sprint(project_id, "Sprint A").await?;
    let task_id = harness.add_task(project_id, number, "Draw floor plans").await?;

    let reply = harness
        .post(path, &json!({ "task_id": task_id, "status": label }))
        .await?;

    assert_eq!(reply.status, StatusCode::OK);
    let expected = format!("Task {task_id} {verb} {label}.");
    assert_eq!(reply.text("message"), Some(expected.as_str()));
    let board = harness
        .get(&format!("/project/view_tasks?project_id={project_id}"))
        .await?;
    assert_eq!(board.body["sprints"][0]["tasks"][0]["status"], json!(label));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_label_leaves_the_task_untouched() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let number = harness.open_sprint(project_id, "Sprint A").await?;
    let task_id = harness.add_task(project_id, number, "Draw floor plans").await?;

    let reply = harness
        .post(
            "/project/task/start",
            &json!({ "task_id": task_id, "status": "Blocked" }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let board = harness
        .get(&format!("/project/view_tasks?project_id={project_id}"))
        .await?;
    assert_eq!(board.body["sprints"][0]["tasks"][0]["status"], json!("To Do"));
    Ok(())
}

#[rstest]
#[case("/project/task/start", "Completed", "Cannot start a task to Completed; expected In Progress")]
#[case("/project/task/complete", "To Do", "Cannot complete a task to To Do; expected Completed")]
#[case("/project/task/reopen", "In Progress", "Cannot reopen a task to In Progress; expected To Do")]
#[tokio::test(flavor = "multi_thread")]
async fn transitions_refuse_a_label_naming_another_status(
    #[case] path: &'static str,
    #[case] label: &'static str,
    #[case] error: &'static str,
) -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let number = harness.open_sprint(project_id, "Sprint A").await?;
    let task_id = harness.add_task(project_id, number, "Draw floor plans").await?;

    let reply = harness
        .post(path, &json!({ "task_id": task_id, "status": label }))
        .await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text("error"), Some(error));
    let board = harness
        .get(&format!("/project/view_tasks?project_id={project_id}"))
        .await?;
    assert_eq!(board.body["sprints"][0]["tasks"][0]["status"], json!("To Do"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn mismatched_label_is_refused_before_task_lookup() -> Result<()> {
    let harness = Harness::new();

    let reply = harness
        .post(
            "/project/task/start",
            &json!({ "task_id": 404, "status": "Completed" }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn transition_of_missing_task_is_not_found() -> Result<()> {
    let harness = Harness::new();

    let reply = harness
        .post(
            "/project/task/complete",
            &json!({ "task_id": 404, "status": "Completed" }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.text("error"), Some("Task ID does not exist"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn task_edits_require_a_field() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let number = harness.open_sprint(project_id, "Sprint A").await?;
    let task_id = harness.add_task(project_id, number, "Draw floor plans").await?;

    let empty = harness
        .post("/project/edit_tasks/update_task", &json!({ "task_id": task_id }))
        .await?;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.text("error"), Some("No fields provided to update"));

    let edited = harness
        .post(
            "/project/edit_tasks/update_task",
            &json!({ "task_id": task_id, "points": 8, "status": "In Progress" }),
        )
        .await?;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.text("message"), Some("Task updated successfully!"));

    let board = harness
        .get(&format!("/project/view_tasks?project_id={project_id}"))
        .await?;
    let task = &board.body["sprints"][0]["tasks"][0];
    assert_eq!(task["points"], json!(8));
    assert_eq!(task["status"], json!("In Progress"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn board_of_project_without_sprints_is_not_found() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    let reply = harness
        .get(&format!("/project/view_tasks?project_id={project_id}"))
        .await?;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.text("error"), Some("No sprints found for this project"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_query_parameter_is_a_bad_request() -> Result<()> {
    let harness = Harness::new();

    let reply = harness.get("/project/view_sprints").await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.text("error").is_some());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn analytics_summarise_task_progress() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let number = harness.open_sprint(project_id, "Sprint A").await?;
    let done = harness.add_task(project_id, number, "Draw floor plans").await?;
    harness.add_task(project_id, number, "Survey corridors").await?;
    harness
        .post(
            "/project/task/complete",
            &json!({ "task_id": done, "status": "Completed" }),
        )
        .await?;

    let reply = harness
        .get(&format!("/project/analytics?project_id={project_id}"))
        .await?;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["total_tasks"], json!(2));
    assert_eq!(reply.body["done_tasks"], json!(1));
    assert_eq!(reply.body["pending_tasks"], json!(1));
    assert_eq!(reply.body["completed_points"], json!(3));
    assert_eq!(reply.body["completion_percent"], json!(50));

    let missing = harness.get("/project/analytics?project_id=999").await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    Ok(())
}
