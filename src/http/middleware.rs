//! Session gate for protected routes.

use super::{ApiError, AppState, cookies::SessionCookies};
use crate::session::{domain::OwnerId, services::SessionServiceError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Owner id of the session that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOwner(pub OwnerId);

/// Revalidates the session cookies before the route body runs.
///
/// On success the owner is attached to the request as an
/// [`AuthenticatedOwner`] extension.
///
/// # Errors
///
/// Returns a 401 [`ApiError`] when the cookies are missing, stale or do not
/// match, and a 500 when the session store fails.
pub async fn require_session(
    State(state): State<AppState>,
    SessionCookies { owner, fingerprint }: SessionCookies,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let record = state
        .sessions
        .revalidate(owner.as_deref(), fingerprint.as_deref())
        .await
        .map_err(|err| match err {
            SessionServiceError::SessionExpired => {
                debug!(path = %request.uri().path(), "request refused by session gate");
                ApiError::unauthorized()
            }
            other => ApiError::from(other),
        })?;

    request
        .extensions_mut()
        .insert(AuthenticatedOwner(record.owner_id().clone()));
    Ok(next.run(request).await)
}
