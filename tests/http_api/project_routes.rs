//! Project, membership, application, rating and profile endpoints.

use super::harness::Harness;
use crate::test_helpers::{OWNER_ROLL, STUDENT_ROLL};
use axum::http::StatusCode;
use eyre::{Result, eyre};
use serde_json::{Value, json};

const OUTSIDER: &str = "21cs9999";

async fn accepted_member(harness: &Harness) -> Result<i64> {
    let project_id = harness.owned_project().await?;
    let applied = harness
        .post(
            "/apply/project",
            &json!({ "project_id": project_id, "user_id": STUDENT_ROLL }),
        )
        .await?;
    let application_id = applied
        .body
        .get("application_id")
        .and_then(Value::as_i64)
        .ok_or_else(|| eyre!("application id missing from {}", applied.body))?;
    let decided = harness
        .post(
            "/update/project/app/status",
            &json!({ "application_id": application_id, "status": "accepted" }),
        )
        .await?;
    if decided.status != StatusCode::OK {
        return Err(eyre!("decision failed with {}: {}", decided.status, decided.body));
    }
    Ok(project_id)
}

#[tokio::test(flavor = "multi_thread")]
async fn project_details_list_the_owner() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    let reply = harness
        .get(&format!("/project/view_details?project_id={project_id}"))
        .await?;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["project"]["title"], json!("Campus Navigator"));
    assert_eq!(reply.body["members"][0]["user_id"], json!(OWNER_ROLL));
    assert_eq!(reply.body["members"][0]["role"], json!("owner"));

    let missing = harness.get("/project/view_details?project_id=999").await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.text("error"), Some("Project not found"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn listings_filter_by_status() -> Result<()> {
    let harness = Harness::new();
    harness.owned_project().await?;

    let all = harness.post("/list/projects", &json!({})).await?;
    let current = harness.post("/list/current/projects", &json!({})).await?;
    let past = harness.post("/list/past/projects", &json!({})).await?;

    assert_eq!(all.body["projects"].as_array().map(Vec::len), Some(1));
    assert_eq!(current.body["projects"].as_array().map(Vec::len), Some(1));
    assert_eq!(past.body["projects"], json!([]));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn application_lifecycle_ends_in_membership() -> Result<()> {
    let harness = Harness::new();
    let cookies = harness.sign_in_owner().await?;
    let project_id = accepted_member(&harness).await?;

    let status = harness
        .post_as(
            "/apply/project/status",
            &json!({ "project_id": project_id, "user_id": STUDENT_ROLL }),
            &cookies,
        )
        .await?;
    assert_eq!(status.status, StatusCode::OK);
    assert_eq!(status.body["status"], json!("accepted"));

    let membership = harness
        .post(
            "/verify/member",
            &json!({ "project_id": project_id, "user_id": STUDENT_ROLL }),
        )
        .await?;
    assert_eq!(membership.body, json!({ "is_member": true, "role": "member" }));

    let mine = harness
        .post("/list/myprojects", &json!({ "user_id": STUDENT_ROLL }))
        .await?;
    assert_eq!(mine.body["projects"][0]["id"], json!(project_id));

    let again = harness
        .post(
            "/apply/project",
            &json!({ "project_id": project_id, "user_id": STUDENT_ROLL }),
        )
        .await?;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn pending_application_can_be_taken_back() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;
    let cookies = harness.sign_in_owner().await?;
    let body = json!({ "project_id": project_id, "user_id": STUDENT_ROLL });

    let applied = harness.post("/apply/project", &body).await?;
    assert_eq!(applied.status, StatusCode::CREATED);
    let duplicate = harness.post("/apply/project", &body).await?;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.text("error"), Some("Application already pending"));

    let listed = harness
        .post_as("/list/apply/status", &json!({ "project_id": project_id }), &cookies)
        .await?;
    assert_eq!(listed.body["applications"].as_array().map(Vec::len), Some(1));

    let withdrawn = harness
        .post_as("/apply/project/status/takeback", &body, &cookies)
        .await?;
    assert_eq!(withdrawn.status, StatusCode::OK);
    assert_eq!(withdrawn.body["status"], json!("withdrawn"));

    let twice = harness
        .post_as("/apply/project/status/takeback", &body, &cookies)
        .await?;
    assert_eq!(twice.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn application_routes_behind_the_gate_need_cookies() -> Result<()> {
    let harness = Harness::new();

    let reply = harness
        .post("/list/apply/status", &json!({ "project_id": 1 }))
        .await?;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_decision_is_a_bad_request() -> Result<()> {
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
            "/update/project/app/status",
            &json!({ "application_id": applied.body["application_id"], "status": "maybe" }),
        )
        .await?;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn moderators_are_promoted_from_plain_members() -> Result<()> {
    let harness = Harness::new();
    let project_id = accepted_member(&harness).await?;

    let eligible = harness
        .get(&format!("/project/add_mod/eligible_users?project_id={project_id}"))
        .await?;
    assert_eq!(eligible.status, StatusCode::OK);
    assert_eq!(
        eligible.body["eligible_users"],
        json!([{ "roll_no": STUDENT_ROLL, "name": STUDENT_ROLL }])
    );

    let body = json!({ "project_id": project_id, "user_id": STUDENT_ROLL });
    let promoted = harness.post("/project/add_mod/promote", &body).await?;
    assert_eq!(
        promoted.text("message"),
        Some(format!("User {STUDENT_ROLL} promoted to Moderator.").as_str())
    );

    let none_left = harness
        .get(&format!("/project/add_mod/eligible_users?project_id={project_id}"))
        .await?;
    assert_eq!(none_left.status, StatusCode::NOT_FOUND);

    let promoted_again = harness.post("/project/add_mod/promote", &body).await?;
    assert_eq!(promoted_again.status, StatusCode::BAD_REQUEST);

    let demoted = harness.post("/project/add_mod/demote", &body).await?;
    assert_eq!(
        demoted.text("message"),
        Some(format!("User {STUDENT_ROLL} demoted to Member.").as_str())
    );

    let demoted_again = harness.post("/project/add_mod/demote", &body).await?;
    assert_eq!(demoted_again.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        demoted_again.text("error"),
        Some("User is not a moderator or demotion failed.")
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn member_ratings_stay_within_the_team() -> Result<()> {
    let harness = Harness::new();
    let project_id = accepted_member(&harness).await?;
    let rating = |rated_by: &str, rated_user: &str| {
        json!({
            "rated_by": rated_by,
            "rated_user": rated_user,
            "project_id": project_id,
            "score": 4,
            "comment": "reliable",
        })
    };

    let teammate = harness
        .post("/rate_member", &rating(OWNER_ROLL, STUDENT_ROLL))
        .await?;
    assert_eq!(teammate.status, StatusCode::CREATED);
    assert_eq!(teammate.text("message"), Some("Rating added successfully"));

    let outsider = harness
        .post("/rate_member", &rating(OUTSIDER, STUDENT_ROLL))
        .await?;
    assert_eq!(outsider.status, StatusCode::FORBIDDEN);

    let own = harness
        .post("/rate_member", &rating(STUDENT_ROLL, STUDENT_ROLL))
        .await?;
    assert_eq!(own.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn only_outsiders_rate_projects_and_feed_the_ranking() -> Result<()> {
    let harness = Harness::new();
    let project_id = harness.owned_project().await?;

    let member = harness
        .post(
            "/rate_project",
            &json!({ "user_id": OWNER_ROLL, "project_id": project_id, "score": 5 }),
        )
        .await?;
    assert_eq!(member.status, StatusCode::FORBIDDEN);
    assert_eq!(
        member.text("error"),
        Some("You are a team member and cannot rate this project.")
    );

    let outsider = harness
        .post(
            "/rate_project",
            &json!({ "user_id": OUTSIDER, "project_id": project_id, "score": 4 }),
        )
        .await?;
    assert_eq!(outsider.status, StatusCode::CREATED);
    assert_eq!(outsider.text("message"), Some("Project rating added successfully"));

    let out_of_range = harness
        .post(
            "/rate_project",
            &json!({ "user_id": "21cs8888", "project_id": project_id, "score": 9 }),
        )
        .await?;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);

    let ranking = harness.get("/best_projects").await?;
    assert_eq!(ranking.status, StatusCode::OK);
    let top = &ranking.body["projects"][0];
    assert_eq!(top["project"]["id"], json!(project_id));
    assert_eq!(top["rating_count"], json!(1));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn profiles_are_listed_and_edited_by_their_owner() -> Result<()> {
    let harness = Harness::new();
    let signed_in = harness
        .post(
            "/verify/google",
            &json!({
                "idToken": crate::test_helpers::OWNER_TOKEN,
                "uid": crate::test_helpers::OWNER_UID,
                "fingerprint": super::harness::DEVICE,
                "email": format!("{OWNER_ROLL}@iiitkottayam.ac.in"),
            }),
        )
        .await?;
    let cookies = signed_in.cookie_header();

    let updated = harness
        .post_as("/update/profile", &json!({ "bio": "Maps and mazes" }), &cookies)
        .await?;
    assert_eq!(updated.status, StatusCode::OK);

    let empty = harness.post_as("/update/profile", &json!({}), &cookies).await?;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let users = harness.get("/list/users").await?;
    assert_eq!(users.body["users"][0]["user_id"], json!(OWNER_ROLL));
    assert_eq!(users.body["users"][0]["bio"], json!("Maps and mazes"));

    let unknown = harness
        .post("/profile/view", &json!({ "user_id": OUTSIDER }))
        .await?;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    Ok(())
}
