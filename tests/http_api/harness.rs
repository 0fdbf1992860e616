//! Router harness driving requests through `tower::ServiceExt::oneshot`.

use crate::test_helpers::{
    ManualClock, OWNER_ROLL, OWNER_TOKEN, OWNER_UID, STUDENT_TOKEN, owner_identity,
    student_identity,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use cohort::config::SameSitePolicy;
use cohort::http::{Adapters, AppState, CookiePolicy, SharedClock, app};
use cohort::session::adapters::memory::StaticIdentityProvider;
use eyre::{Result, WrapErr, eyre};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

/// Fingerprint used by signed-in test clients.
pub const DEVICE: &str = "device-a";

/// Decoded response.
#[derive(Debug)]
pub struct Reply {
    /// Status code.
    pub status: StatusCode,
    /// JSON body, `Null` when empty.
    pub body: Value,
    /// Raw response headers.
    pub headers: HeaderMap,
}

impl Reply {
    /// Returns every `Set-Cookie` header value.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect()
    }

    /// Returns the `Set-Cookie` header for `name`.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.set_cookies()
            .into_iter()
            .find(|cookie| cookie.starts_with(&prefix))
    }

    /// Folds the issued cookies into a `Cookie` request header value.
    pub fn cookie_header(&self) -> String {
        self.set_cookies()
            .iter()
            .filter_map(|cookie| cookie.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Returns the string under `key` in the body.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }
}

/// Application wired to in-memory stores and a manual clock.
pub struct Harness {
    app: Router,
    /// Clock shared with every service.
    pub clock: ManualClock,
}

impl Harness {
    /// Builds a fresh application.
    pub fn new() -> Self {
        let identity = StaticIdentityProvider::new()
            .with_token(OWNER_TOKEN, owner_identity())
            .with_token(STUDENT_TOKEN, student_identity());
        let clock = ManualClock::reference();
        let state = AppState::new(
            Adapters::in_memory(Arc::new(identity)),
            SharedClock::new(clock.clone()),
            CookiePolicy::new(SameSitePolicy::Strict),
            "-IIITK",
        );
        Self {
            app: app(state, &["https://cohort.example".to_owned()]),
            clock,
        }
    }

    /// Sends a request and decodes the reply.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<&Value>,
        cookies: Option<&str>,
    ) -> Result<Reply> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(header_value) = cookies {
            builder = builder.header(header::COOKIE, header_value);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .wrap_err("build request")?;

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .wrap_err("route request")?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .wrap_err("read response body")?;
        let decoded = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).wrap_err("decode response body")?
        };
        Ok(Reply {
            status,
            body: decoded,
            headers,
        })
    }

    /// Sends a JSON `POST`.
    pub async fn post(&self, uri: &str, body: &Value) -> Result<Reply> {
        self.send(Method::POST, uri, Some(body), None).await
    }

    /// Sends a JSON `POST` carrying session cookies.
    pub async fn post_as(&self, uri: &str, body: &Value, cookies: &str) -> Result<Reply> {
        self.send(Method::POST, uri, Some(body), Some(cookies)).await
    }

    /// Sends a `GET`.
    pub async fn get(&self, uri: &str) -> Result<Reply> {
        self.send(Method::GET, uri, None, None).await
    }

    /// Runs the handshake for the owner and returns the cookie header.
    pub async fn sign_in_owner(&self) -> Result<String> {
        let reply = self
            .post(
                "/verify/user_id",
                &json!({ "idToken": OWNER_TOKEN, "uid": OWNER_UID, "fingerprint": DEVICE }),
            )
            .await?;
        if reply.status != StatusCode::OK {
            return Err(eyre!("sign-in failed with {}: {}", reply.status, reply.body));
        }
        Ok(reply.cookie_header())
    }

    /// Signs the owner in and creates a project they own.
    pub async fn owned_project(&self) -> Result<i64> {
        let cookies = self.sign_in_owner().await?;
        let reply = self
            .post_as(
                "/add/project",
                &json!({
                    "title": "Campus Navigator",
                    "description": "Indoor maps for the academic block",
                    "owner_id": OWNER_ROLL,
                }),
                &cookies,
            )
            .await?;
        if reply.status != StatusCode::CREATED {
            return Err(eyre!("project creation failed with {}: {}", reply.status, reply.body));
        }
        reply
            .body
            .get("project_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| eyre!("project id missing from {}", reply.body))
    }

    /// Opens a sprint in `project_id` and returns its number.
    pub async fn open_sprint(&self, project_id: i64, name: &str) -> Result<i64> {
        let reply = self
            .post(
                "/project/create_sprint",
                &json!({
                    "user_id": OWNER_ROLL,
                    "project_id": project_id,
                    "name": name,
                    "start_date": "2026-03-02",
                    "end_date": "2026-03-15",
                }),
            )
            .await?;
        if reply.status != StatusCode::CREATED {
            return Err(eyre!("sprint creation failed with {}: {}", reply.status, reply.body));
        }
        reply
            .body
            .get("sprint_number")
            .and_then(Value::as_i64)
            .ok_or_else(|| eyre!("sprint number missing from {}", reply.body))
    }

    /// Adds a task to sprint `number` and returns its id.
    pub async fn add_task(&self, project_id: i64, number: i64, description: &str) -> Result<i64> {
        let reply = self
            .post(
                "/project/edit_tasks/add_task",
                &json!({
                    "project_id": project_id,
                    "sprint_number": number,
                    "description": description,
                    "assigned_to": OWNER_ROLL,
                    "points": 3,
                    "user_id": OWNER_ROLL,
                }),
            )
            .await?;
        if reply.status != StatusCode::CREATED {
            return Err(eyre!("task creation failed with {}: {}", reply.status, reply.body));
        }
        reply
            .body
            .get("task_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| eyre!("task id missing from {}", reply.body))
    }
}
