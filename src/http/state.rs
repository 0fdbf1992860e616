//! Shared application state handed to every handler.

use super::cookies::CookiePolicy;
use crate::project::{
    adapters::memory::{InMemoryProjectRepository, InMemoryUserDirectory},
    ports::{ProjectRepository, UserDirectory},
    services::{ProfileService, ProjectService},
};
use crate::session::{
    adapters::memory::InMemorySessionStore,
    ports::{IdentityProvider, SessionStore},
    services::SessionService,
};
use crate::sprint::{
    adapters::memory::InMemorySprintBoard, ports::SprintBoardRepository,
    services::SprintBoardService,
};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Clock handle shared by every service.
#[derive(Clone)]
pub struct SharedClock(Arc<dyn Clock + Send + Sync>);

impl SharedClock {
    /// Wraps a clock implementation.
    #[must_use]
    pub fn new(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self(Arc::new(clock))
    }
}

impl std::fmt::Debug for SharedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedClock").finish_non_exhaustive()
    }
}

impl Clock for SharedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.local()
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0.utc()
    }
}

/// Session service over the adapters chosen at startup.
pub type Sessions = SessionService<dyn IdentityProvider, dyn SessionStore, SharedClock>;
/// Sprint board service over the adapter chosen at startup.
pub type Boards = SprintBoardService<dyn SprintBoardRepository, SharedClock>;
/// Project service over the adapters chosen at startup.
pub type Projects = ProjectService<dyn ProjectRepository, dyn UserDirectory, SharedClock>;
/// Profile service over the adapter chosen at startup.
pub type Profiles = ProfileService<dyn UserDirectory, SharedClock>;

/// Port implementations the services are built on.
#[derive(Clone)]
pub struct Adapters {
    /// Token verifier.
    pub identity: Arc<dyn IdentityProvider>,
    /// Session record store.
    pub sessions: Arc<dyn SessionStore>,
    /// Sprint and task store.
    pub boards: Arc<dyn SprintBoardRepository>,
    /// Project store.
    pub projects: Arc<dyn ProjectRepository>,
    /// Profile store.
    pub directory: Arc<dyn UserDirectory>,
}

impl Adapters {
    /// In-memory stores around the given identity provider.
    #[must_use]
    pub fn in_memory(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            sessions: Arc::new(InMemorySessionStore::new()),
            boards: Arc::new(InMemorySprintBoard::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            directory: Arc::new(InMemoryUserDirectory::new()),
        }
    }
}

/// Read-only state shared across requests.
#[derive(Clone)]
pub struct AppState {
    /// Handshake and revalidation.
    pub sessions: Arc<Sessions>,
    /// Sprints and tasks.
    pub boards: Arc<Boards>,
    /// Projects, membership, applications and ratings.
    pub projects: Arc<Projects>,
    /// User profiles.
    pub profiles: Arc<Profiles>,
    /// Session cookie attributes.
    pub cookies: CookiePolicy,
    /// Institution suffix stripped from provider display names.
    pub name_suffix: Arc<str>,
}

impl AppState {
    /// Builds every service over `adapters`.
    #[must_use]
    pub fn new(
        adapters: Adapters,
        clock: SharedClock,
        cookies: CookiePolicy,
        name_suffix: impl Into<Arc<str>>,
    ) -> Self {
        let shared = Arc::new(clock);
        Self {
            sessions: Arc::new(SessionService::new(
                adapters.identity,
                adapters.sessions,
                Arc::clone(&shared),
            )),
            boards: Arc::new(SprintBoardService::new(adapters.boards, Arc::clone(&shared))),
            projects: Arc::new(ProjectService::new(
                adapters.projects,
                Arc::clone(&adapters.directory),
                Arc::clone(&shared),
            )),
            profiles: Arc::new(ProfileService::new(adapters.directory, shared)),
            cookies,
            name_suffix: name_suffix.into(),
        }
    }
}
