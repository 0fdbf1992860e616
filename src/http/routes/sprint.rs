//! Sprint and task endpoints.

use crate::http::{
    ApiError, AppState,
    extract::{ApiJson, ApiQuery},
};
use crate::ids::{ProjectId, SprintId, TaskId};
use crate::sprint::{
    domain::{ProjectProgress, Sprint, Task, TaskTransition},
    services::{AddTaskRequest, CreateSprintRequest, EditTaskRequest, SprintTasks},
};
use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub(super) struct ProjectQuery {
    project_id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateSprintBody {
    user_id: String,
    project_id: i64,
    name: String,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SprintStatusBody {
    sprint_id: i64,
    status: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddTaskBody {
    project_id: i64,
    sprint_number: i64,
    description: String,
    assigned_to: String,
    points: i64,
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskStatusBody {
    task_id: i64,
    status: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct EditTaskBody {
    task_id: i64,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    assigned_to: Option<String>,
    #[serde(default)]
    points: Option<i64>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Serialize)]
struct SprintView<'a> {
    sprint_id: SprintId,
    sprint_number: i32,
    name: &'a str,
    #[serde(rename = "Start")]
    start: NaiveDate,
    #[serde(rename = "End")]
    end: NaiveDate,
    #[serde(rename = "Status")]
    status: &'static str,
}

impl<'a> From<&'a Sprint> for SprintView<'a> {
    fn from(sprint: &'a Sprint) -> Self {
        Self {
            sprint_id: sprint.id(),
            sprint_number: sprint.number().value(),
            name: sprint.name(),
            start: sprint.period().starts_on(),
            end: sprint.period().ends_on(),
            status: sprint.status().as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TaskView<'a> {
    task_id: TaskId,
    description: &'a str,
    assigned_to: &'a str,
    points: u8,
    status: &'static str,
}

impl<'a> From<&'a Task> for TaskView<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            task_id: task.id(),
            description: task.description(),
            assigned_to: task.assignee().as_str(),
            points: task.points().value(),
            status: task.status().label().as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
struct BoardView<'a> {
    #[serde(flatten)]
    sprint: SprintView<'a>,
    tasks: Vec<TaskView<'a>>,
}

impl<'a> From<&'a SprintTasks> for BoardView<'a> {
    fn from(entry: &'a SprintTasks) -> Self {
        Self {
            sprint: SprintView::from(&entry.sprint),
            tasks: entry.tasks.iter().map(TaskView::from).collect(),
        }
    }
}

pub(super) async fn create_sprint(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateSprintBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let project_id = ProjectId::new(body.project_id)?;
    state.projects.project(project_id).await?;
    let sprint = state
        .boards
        .create_sprint(CreateSprintRequest::new(
            project_id,
            body.name,
            body.start_date,
            body.end_date,
            body.user_id,
        ))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Sprint created successfully!",
            "sprint_id": sprint.id(),
            "sprint_number": sprint.number().value(),
        })),
    ))
}

pub(super) async fn change_sprint_status(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SprintStatusBody>,
) -> Result<Json<Value>, ApiError> {
    let sprint = state
        .boards
        .change_sprint_status(SprintId::new(body.sprint_id)?, &body.status)
        .await?;
    Ok(Json(json!({
        "message": format!("Sprint {} is now {}.", sprint.id(), sprint.status().as_str()),
    })))
}

pub(super) async fn view_sprints(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> Result<Json<Value>, ApiError> {
    let sprints = state
        .boards
        .list_sprints(ProjectId::new(query.project_id)?)
        .await?;
    let views: Vec<SprintView<'_>> = sprints.iter().map(SprintView::from).collect();
    Ok(Json(json!({ "sprints": views })))
}

pub(super) async fn view_tasks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> Result<Json<Value>, ApiError> {
    let board = state
        .boards
        .sprint_board(ProjectId::new(query.project_id)?)
        .await?;
    let views: Vec<BoardView<'_>> = board.iter().map(BoardView::from).collect();
    Ok(Json(json!({ "sprints": views })))
}

pub(super) async fn analytics(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> Result<Json<ProjectProgress>, ApiError> {
    let project_id = ProjectId::new(query.project_id)?;
    state.projects.project(project_id).await?;
    Ok(Json(state.boards.project_progress(project_id).await?))
}

pub(super) async fn add_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AddTaskBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request = AddTaskRequest::new(
        ProjectId::new(body.project_id)?,
        body.sprint_number,
        body.description,
        body.assigned_to,
        body.points,
    )
    .requested_by(body.user_id);
    let task = state.boards.add_task(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Task added successfully!", "task_id": task.id() })),
    ))
}

pub(super) async fn update_task_status(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TaskStatusBody>,
) -> Result<Json<Value>, ApiError> {
    state
        .boards
        .update_task_status(TaskId::new(body.task_id)?, &body.status)
        .await?;
    Ok(Json(json!({ "message": "Task updated successfully!" })))
}

pub(super) async fn update_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<EditTaskBody>,
) -> Result<Json<Value>, ApiError> {
    let task_id = TaskId::new(body.task_id)?;
    let mut request = EditTaskRequest::new();
    if let Some(description) = body.description {
        request = request.with_description(description);
    }
    if let Some(assignee) = body.assigned_to {
        request = request.with_assigned_to(assignee);
    }
    if let Some(points) = body.points {
        request = request.with_points(points);
    }
    if let Some(label) = body.status {
        request = request.with_status(label);
    }
    state.boards.edit_task(task_id, request).await?;
    Ok(Json(json!({ "message": "Task updated successfully!" })))
}

async fn transition(
    state: &AppState,
    body: TaskStatusBody,
    transition: TaskTransition,
) -> Result<Json<Value>, ApiError> {
    let outcome = state
        .boards
        .transition_task(TaskId::new(body.task_id)?, transition, &body.status)
        .await?;
    Ok(Json(json!({ "message": outcome.message })))
}

pub(super) async fn start_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TaskStatusBody>,
) -> Result<Json<Value>, ApiError> {
    transition(&state, body, TaskTransition::Start).await
}

pub(super) async fn complete_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TaskStatusBody>,
) -> Result<Json<Value>, ApiError> {
    transition(&state, body, TaskTransition::Complete).await
}

pub(super) async fn reopen_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<TaskStatusBody>,
) -> Result<Json<Value>, ApiError> {
    transition(&state, body, TaskTransition::Reopen).await
}
