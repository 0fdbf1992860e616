//! Application services for projects and profiles.

mod profiles;
mod projects;

pub use profiles::{
    ProfileService, ProfileServiceError, ProfileServiceResult, SignInProfile, UpdateProfileRequest,
};
pub use projects::{
    AddProjectRequest, AdminRequest, NamedMember, ProjectDetails, ProjectFilter, ProjectService,
    ProjectServiceError, ProjectServiceResult, RateMemberRequest, RateProjectRequest,
};
