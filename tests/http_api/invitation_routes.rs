//! Mentor applications and admin requests.

use super::harness::Harness;
use crate::test_helpers::{OWNER_ROLL, STUDENT_ROLL};
use axum::http::StatusCode;
use eyre::{Result, eyre};
use serde_json::{Value, json};

const MENTOR: &str = "21cs5678";

fn application_id(body: &Value) -> Result<i64> {
    body.get("application_id")
        .and_then(Value::as_i64)
        .ok_or_else(|| eyre!("application id missing from {body}"))
}

#[tokio::test(flavor = "multi_thread")]
async fn mentor_application_lifecycle() -> Result<()> {
    let harness = Harness::new();
    let cookies = harness.sign_in_owner().await?;
    let project_id = harness.owned_project().await?;
    let body = json!({ "project_id": project_id, "user_id": MENTOR });

    let empty = harness
        .post("/list/mentors", &json!({ "project_id": project_id }))
        .await?;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body, json!({ "mentors": [] }));

    let applied = harness.post("/apply/mentors", &body).await?;
    assert_eq!(applied.status, StatusCode::CREATED);
    assert_eq!(applied.text("message"), Some("Mentor application submitted"));

    let listed = harness
        .post_as("/list/apply/status", &json!({ "project_id": project_id }), &cookies)
        .await?;
    assert_eq!(listed.body["applications"][0]["role"], json!("mentor"));
    assert_eq!(listed.body["applications"][0]["applied"], json!("user"));

    let accepted = harness.post("/accept/mentors", &body).await?;
    assert_eq!(accepted.status, StatusCode::OK);
    let expected = format!("User {MENTOR} is now a mentor of project {project_id}.");
    assert_eq!(accepted.text("message"), Some(expected.as_str()));

    let mentors = harness
        .post("/list/mentors", &json!({ "project_id": project_id }))
        .await?;
    assert_eq!(mentors.body["mentors"][0]["roll_no"], json!(MENTOR));
    let membership = harness.post("/verify/member", &body).await?;
    assert_eq!(membership.body, json!({ "is_member": true, "role": "mentor" }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn mentor_application_can_be_taken_back() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let body = json!({ "project_id": project_id, "user_id": MENTOR });
    harness.post("/apply/mentors", &body).await?;

    let withdrawn = harness
        .post("/apply/mentors/status/takeback", &body)
        .await?;
    assert_eq!(withdrawn.status, StatusCode::OK);
    assert_eq!(withdrawn.body["status"], json!("withdrawn"));

    let accepted = harness.post("/accept/mentors", &body).await?;
    assert_eq!(accepted.status, StatusCode::BAD_REQUEST);
    let membership = harness.post("/verify/member", &body).await?;
    assert_eq!(membership.body["is_member"], json!(false));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn mentor_routes_need_a_mentor_application() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let body = json!({ "project_id": project_id, "user_id": STUDENT_ROLL });
    harness.post("/apply/project", &body).await?;

    let takeback = harness
        .post("/apply/mentors/status/takeback", &body)
        .await?;
    let accept = harness.post("/accept/mentors", &body).await?;
    let missing = harness
        .post("/list/mentors", &json!({ "project_id": 999 }))
        .await?;

    assert_eq!(takeback.status, StatusCode::NOT_FOUND);
    assert_eq!(accept.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_request_is_accepted_by_the_invitee() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    let sent = harness
        .post(
            "/admin/request",
            &json!({
                "project_id": project_id,
                "admin_id": OWNER_ROLL,
                "user_id": STUDENT_ROLL,
                "role": "mentor",
            }),
        )
        .await?;
    assert_eq!(sent.status, StatusCode::CREATED);
    assert_eq!(sent.body["role"], json!("mentor"));
    let request_id = application_id(&sent.body)?;

    let by_other = harness
        .post(
            "/admin/request/accept",
            &json!({ "application_id": request_id, "user_id": MENTOR }),
        )
        .await?;
    assert_eq!(by_other.status, StatusCode::FORBIDDEN);

    let by_reviewer = harness
        .post(
            "/update/project/app/status",
            &json!({ "application_id": request_id, "status": "accepted" }),
        )
        .await?;
    assert_eq!(by_reviewer.status, StatusCode::BAD_REQUEST);

    let accepted = harness
        .post(
            "/admin/request/accept",
            &json!({ "application_id": request_id, "user_id": STUDENT_ROLL }),
        )
        .await?;
    assert_eq!(accepted.status, StatusCode::OK);
    assert_eq!(accepted.body["status"], json!("accepted"));

    let membership = harness
        .post(
            "/verify/member",
            &json!({ "project_id": project_id, "user_id": STUDENT_ROLL }),
        )
        .await?;
    assert_eq!(membership.body, json!({ "is_member": true, "role": "mentor" }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_requests_need_a_project_admin() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    let reply = harness
        .post(
            "/admin/request",
            &json!({ "project_id": project_id, "admin_id": MENTOR, "user_id": STUDENT_ROLL }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    let expected = format!("User {MENTOR} is not an admin of project {project_id}");
    assert_eq!(reply.text("error"), Some(expected.as_str()));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_requests_cannot_grant_moderation() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    let reply = harness
        .post(
            "/admin/request",
            &json!({
                "project_id": project_id,
                "admin_id": OWNER_ROLL,
                "user_id": STUDENT_ROLL,
                "role": "moderator",
            }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.text("error"), Some("Cannot request the moderator role"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn own_application_is_not_an_admin_request() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let applied = harness
        .post(
            "/apply/project",
            &json!({ "project_id": project_id, "user_id": STUDENT_ROLL }),
        )
        .await?;

    let reply = harness
        .post(
            "/admin/request/accept",
            &json!({ "application_id": application_id(&applied.body)?, "user_id": STUDENT_ROLL }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    Ok(())
}
