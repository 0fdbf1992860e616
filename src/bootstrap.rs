//! Builds the application state from configuration.

use crate::config::AppConfig;
use crate::http::{Adapters, AppState, CookiePolicy, SharedClock};
use crate::persistence::build_pool;
use crate::project::adapters::postgres::{PostgresProjectRepository, PostgresUserDirectory};
use crate::session::{
    adapters::{
        firebase::FirebaseIdentityProvider, memory::StaticIdentityProvider,
        postgres::PostgresSessionStore,
    },
    ports::IdentityProvider,
};
use crate::sprint::adapters::postgres::PostgresSprintBoard;
use diesel::r2d2::PoolError;
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{info, warn};

/// Errors raised while wiring the service together.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The database pool could not be opened.
    #[error("failed to open database pool: {0}")]
    Pool(#[from] PoolError),

    /// The pool builder task panicked or was cancelled.
    #[error("database pool task failed: {0}")]
    PoolTask(#[from] JoinError),

    /// The identity provider HTTP client could not be built.
    #[error("failed to build identity client: {0}")]
    IdentityClient(#[from] reqwest::Error),
}

/// Builds the identity provider described by `config`.
///
/// Without an API key every token is rejected.
///
/// # Errors
///
/// Returns [`BootstrapError::IdentityClient`] when the HTTP client cannot be
/// built.
pub fn identity_provider(config: &AppConfig) -> Result<Arc<dyn IdentityProvider>, BootstrapError> {
    let Some(api_key) = config.identity.api_key.as_deref() else {
        warn!("FIREBASE_API_KEY not set, every sign-in will be rejected");
        return Ok(Arc::new(StaticIdentityProvider::new()));
    };
    let client = reqwest::Client::builder()
        .timeout(config.identity.timeout)
        .build()?;
    Ok(Arc::new(FirebaseIdentityProvider::new(
        client,
        config.identity.endpoint.as_str(),
        api_key,
    )))
}

/// Selects `PostgreSQL` adapters when a database URL is configured and
/// in-memory ones otherwise.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the pool or identity client cannot be
/// built.
pub async fn adapters(config: &AppConfig) -> Result<Adapters, BootstrapError> {
    let identity = identity_provider(config)?;
    let Some(database_url) = config.database_url.clone() else {
        warn!("DATABASE_URL not set, using in-memory stores");
        return Ok(Adapters::in_memory(identity));
    };

    let pool_size = config.db_pool_size;
    let pool =
        tokio::task::spawn_blocking(move || build_pool(&database_url, pool_size)).await??;
    info!(pool_size, "database pool ready");

    Ok(Adapters {
        identity,
        sessions: Arc::new(PostgresSessionStore::new(pool.clone())),
        boards: Arc::new(PostgresSprintBoard::new(pool.clone())),
        projects: Arc::new(PostgresProjectRepository::new(pool.clone())),
        directory: Arc::new(PostgresUserDirectory::new(pool)),
    })
}

/// Builds the full application state on the system clock.
///
/// # Errors
///
/// Returns [`BootstrapError`] when adapters cannot be built.
pub async fn state(config: &AppConfig) -> Result<AppState, BootstrapError> {
    Ok(AppState::new(
        adapters(config).await?,
        SharedClock::new(DefaultClock),
        CookiePolicy::new(config.cookie_same_site),
        config.name_suffix.as_str(),
    ))
}
