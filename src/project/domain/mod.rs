//! Domain model for projects and the people around them.
//!
//! Covers project records, membership roles, join applications, peer and
//! project ratings, and user profiles.

mod application;
mod error;
mod membership;
mod profile;
mod project;
mod rating;

pub use application::{
    Application, ApplicationDecision, ApplicationOrigin, ApplicationStatus, NewApplication,
    PersistedApplicationData,
};
pub use error::{
    ParseApplicationOriginError, ParseApplicationStatusError, ParseMemberRoleError,
    ParseProjectStatusError, ProjectDomainError,
};
pub use membership::{MemberRole, Membership};
pub use profile::{PersistedProfileData, ProfileUpdate, UserProfile};
pub use project::{NewProject, PersistedProjectData, Project, ProjectStatus};
pub use rating::{MemberRating, ProjectRating, RankedProject, Score, sort_rankings};
