//! Route table.

mod project;
mod session;
mod sprint;

use super::{AppState, middleware::require_session};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

/// Builds every route over `state`.
///
/// Routes in the protected group only run after the session gate has
/// revalidated the caller's cookies.
#[must_use]
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/add/project", post(project::add_project))
        .route("/update/profile", post(project::update_profile))
        .route("/apply/project/status", post(project::application_status))
        .route(
            "/apply/project/status/takeback",
            post(project::withdraw_application),
        )
        .route("/list/apply/status", post(project::list_applications))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .route("/verify/user_id", post(session::verify_user))
        .route("/verify/google", post(session::verify_google))
        .route("/auto_login", post(session::auto_login))
        .route("/logout", get(session::logout))
        .route("/best_projects", get(project::best_projects))
        .route("/list/users", get(project::list_users))
        .route("/profile/view", post(project::view_profile))
        .route("/list/projects", post(project::list_projects))
        .route("/list/current/projects", post(project::list_current_projects))
        .route("/list/past/projects", post(project::list_past_projects))
        .route("/list/myprojects", post(project::list_my_projects))
        .route("/apply/project", post(project::apply))
        .route("/update/project/app/status", post(project::decide_application))
        .route("/verify/member", post(project::verify_member))
        .route("/project/view_details", get(project::view_details))
        .route("/project/add_mod/eligible_users", get(project::eligible_users))
        .route("/project/add_mod/promote", post(project::promote))
        .route("/project/add_mod/demote", post(project::demote))
        .route("/list/mentors", post(project::list_mentors))
        .route("/apply/mentors", post(project::apply_mentor))
        .route(
            "/apply/mentors/status/takeback",
            post(project::withdraw_mentor_application),
        )
        .route("/accept/mentors", post(project::accept_mentor))
        .route("/admin/request", post(project::admin_request))
        .route("/admin/request/accept", post(project::accept_admin_request))
        .route("/rate_member", post(project::rate_member))
        .route("/rate_project", post(project::rate_project))
        .route("/change/sprint/status", post(sprint::change_sprint_status))
        .route("/project/create_sprint", post(sprint::create_sprint))
        .route("/project/view_sprints", get(sprint::view_sprints))
        .route("/project/view_tasks", get(sprint::view_tasks))
        .route("/project/analytics", get(sprint::analytics))
        .route("/project/edit_tasks/add_task", post(sprint::add_task))
        .route(
            "/project/edit_tasks/update_task_status",
            post(sprint::update_task_status),
        )
        .route("/project/edit_tasks/update_task", post(sprint::update_task))
        .route("/project/task/start", post(sprint::start_task))
        .route("/project/task/complete", post(sprint::complete_task))
        .route("/project/task/reopen", post(sprint::reopen_task))
        .merge(protected)
        .with_state(state)
}
