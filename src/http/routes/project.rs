//! Project, membership, application, rating and profile endpoints.

use crate::http::{
    ApiError, AppState,
    extract::{ApiJson, ApiQuery},
    middleware::AuthenticatedOwner,
};
use crate::ids::{ApplicationId, ProjectId};
use crate::project::services::{
    AddProjectRequest, AdminRequest, NamedMember, ProjectFilter, RateMemberRequest,
    RateProjectRequest, UpdateProfileRequest,
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub(super) struct ProjectQuery {
    project_id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddProjectBody {
    title: String,
    description: String,
    owner_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserBody {
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateProfileBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProjectBody {
    project_id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProjectUserBody {
    project_id: i64,
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DecisionBody {
    application_id: i64,
    status: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AdminRequestBody {
    project_id: i64,
    admin_id: String,
    user_id: String,
    #[serde(default)]
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AdminAcceptBody {
    application_id: i64,
    user_id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RateMemberBody {
    rated_by: String,
    rated_user: String,
    project_id: i64,
    score: i64,
    #[serde(default)]
    comment: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RateProjectBody {
    user_id: String,
    project_id: i64,
    score: i64,
    #[serde(default)]
    comment: String,
}

pub(super) async fn add_project(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AddProjectBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let project = state
        .projects
        .add_project(AddProjectRequest::new(body.title, body.description, body.owner_id))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Project added successfully", "project_id": project.id() })),
    ))
}

pub(super) async fn best_projects(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let ranking = state.projects.best_projects().await?;
    Ok(Json(json!({ "projects": ranking })))
}

pub(super) async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let users = state.profiles.list_profiles().await?;
    Ok(Json(json!({ "users": users })))
}

pub(super) async fn view_profile(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UserBody>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles.profile(&body.user_id).await?;
    Ok(Json(json!({ "profile": profile })))
}

pub(super) async fn update_profile(
    State(state): State<AppState>,
    Extension(AuthenticatedOwner(owner)): Extension<AuthenticatedOwner>,
    ApiJson(body): ApiJson<UpdateProfileBody>,
) -> Result<Json<Value>, ApiError> {
    let mut request = UpdateProfileRequest::new();
    if let Some(name) = body.name {
        request = request.with_name(name);
    }
    if let Some(bio) = body.bio {
        request = request.with_bio(bio);
    }
    let profile = state
        .profiles
        .update_own_profile(owner.as_str(), request)
        .await?;
    Ok(Json(json!({ "message": "Profile updated", "profile": profile })))
}

async fn listing(state: &AppState, filter: ProjectFilter) -> Result<Json<Value>, ApiError> {
    let projects = state.projects.list_projects(filter).await?;
    Ok(Json(json!({ "projects": projects })))
}

pub(super) async fn list_projects(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    listing(&state, ProjectFilter::All).await
}

pub(super) async fn list_current_projects(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    listing(&state, ProjectFilter::Current).await
}

pub(super) async fn list_past_projects(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    listing(&state, ProjectFilter::Past).await
}

pub(super) async fn list_my_projects(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UserBody>,
) -> Result<Json<Value>, ApiError> {
    let projects = state.projects.list_user_projects(&body.user_id).await?;
    Ok(Json(json!({ "projects": projects })))
}

pub(super) async fn apply(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let application = state
        .projects
        .apply(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Application submitted",
            "application_id": application.id(),
            "status": application.status(),
        })),
    ))
}

pub(super) async fn application_status(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<Json<Value>, ApiError> {
    let application = state
        .projects
        .application_status(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok(Json(json!({
        "application_id": application.id(),
        "status": application.status(),
    })))
}

pub(super) async fn withdraw_application(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<Json<Value>, ApiError> {
    let application = state
        .projects
        .withdraw_application(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok(Json(json!({
        "message": "Application withdrawn",
        "status": application.status(),
    })))
}

pub(super) async fn list_applications(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectBody>,
) -> Result<Json<Value>, ApiError> {
    let applications = state
        .projects
        .list_applications(ProjectId::new(body.project_id)?)
        .await?;
    Ok(Json(json!({ "applications": applications })))
}

pub(super) async fn decide_application(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DecisionBody>,
) -> Result<Json<Value>, ApiError> {
    let application = state
        .projects
        .decide_application(ApplicationId::new(body.application_id)?, &body.status)
        .await?;
    Ok(Json(json!({
        "message": format!("Application {}", application.status().as_str()),
        "status": application.status(),
    })))
}

pub(super) async fn verify_member(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<Json<Value>, ApiError> {
    let membership = state
        .projects
        .verify_member(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok(Json(json!({
        "is_member": membership.is_some(),
        "role": membership.map(|member| member.role()),
    })))
}

pub(super) async fn view_details(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> Result<Json<Value>, ApiError> {
    let details = state
        .projects
        .project_details(ProjectId::new(query.project_id)?)
        .await?;
    Ok(Json(json!({
        "project": details.project,
        "members": details.members,
    })))
}

pub(super) async fn eligible_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> Result<Json<Value>, ApiError> {
    let eligible = state
        .projects
        .eligible_moderators(ProjectId::new(query.project_id)?)
        .await?;
    Ok(Json(json!({ "eligible_users": named_json(eligible) })))
}

fn named_json(members: Vec<NamedMember>) -> Vec<Value> {
    members
        .into_iter()
        .map(|member| json!({ "roll_no": member.user_id, "name": member.name }))
        .collect()
}

pub(super) async fn list_mentors(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectBody>,
) -> Result<Json<Value>, ApiError> {
    let mentors = state
        .projects
        .list_mentors(ProjectId::new(body.project_id)?)
        .await?;
    Ok(Json(json!({ "mentors": named_json(mentors) })))
}

pub(super) async fn apply_mentor(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let application = state
        .projects
        .apply_as_mentor(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Mentor application submitted",
            "application_id": application.id(),
            "status": application.status(),
        })),
    ))
}

pub(super) async fn withdraw_mentor_application(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<Json<Value>, ApiError> {
    let application = state
        .projects
        .withdraw_mentor_application(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok(Json(json!({
        "message": "Mentor application withdrawn",
        "status": application.status(),
    })))
}

pub(super) async fn accept_mentor(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<Json<Value>, ApiError> {
    let application = state
        .projects
        .accept_mentor(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok(Json(json!({
        "message": format!(
            "User {} is now a mentor of project {}.",
            application.applicant(),
            application.project_id()
        ),
        "status": application.status(),
    })))
}

pub(super) async fn admin_request(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AdminRequestBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut request = AdminRequest::new(ProjectId::new(body.project_id)?, body.admin_id, body.user_id);
    if let Some(role) = body.role {
        request = request.with_role(role);
    }
    let application = state.projects.send_admin_request(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Request sent",
            "application_id": application.id(),
            "role": application.role(),
            "status": application.status(),
        })),
    ))
}

pub(super) async fn accept_admin_request(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<AdminAcceptBody>,
) -> Result<Json<Value>, ApiError> {
    let application = state
        .projects
        .accept_admin_request(ApplicationId::new(body.application_id)?, &body.user_id)
        .await?;
    Ok(Json(json!({
        "message": "Request accepted",
        "role": application.role(),
        "status": application.status(),
    })))
}

pub(super) async fn promote(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<Json<Value>, ApiError> {
    let membership = state
        .projects
        .promote(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok(Json(json!({
        "message": format!("User {} promoted to Moderator.", membership.user_id()),
    })))
}

pub(super) async fn demote(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProjectUserBody>,
) -> Result<Json<Value>, ApiError> {
    let membership = state
        .projects
        .demote(ProjectId::new(body.project_id)?, &body.user_id)
        .await?;
    Ok(Json(json!({
        "message": format!("User {} demoted to Member.", membership.user_id()),
    })))
}

pub(super) async fn rate_member(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RateMemberBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request = RateMemberRequest::new(
        ProjectId::new(body.project_id)?,
        body.rated_by,
        body.rated_user,
        body.score,
    )
    .with_comment(body.comment);
    state.projects.rate_member(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Rating added successfully" })),
    ))
}

pub(super) async fn rate_project(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RateProjectBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let request =
        RateProjectRequest::new(ProjectId::new(body.project_id)?, body.user_id, body.score)
            .with_comment(body.comment);
    state.projects.rate_project(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Project rating added successfully" })),
    ))
}
