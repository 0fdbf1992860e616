//! Peer ratings, project ratings and the rating-based ranking.

use super::{Project, ProjectDomainError};
use crate::ids::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Rating score between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Creates a validated score.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidScore`] outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, ProjectDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|score| (1..=5).contains(score))
            .map(Self)
            .ok_or(ProjectDomainError::InvalidScore(value))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// One member's rating of a teammate within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRating {
    project_id: ProjectId,
    rated_by: UserId,
    rated_user: UserId,
    score: Score,
    comment: String,
    created_at: DateTime<Utc>,
}

impl MemberRating {
    /// Creates a rating of `rated_user` by `rated_by`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::SelfRating`] when both users are the
    /// same.
    pub fn new(
        project_id: ProjectId,
        rated_by: UserId,
        rated_user: UserId,
        score: Score,
        comment: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        if rated_by == rated_user {
            return Err(ProjectDomainError::SelfRating);
        }
        Ok(Self {
            project_id,
            rated_by,
            rated_user,
            score,
            comment: comment.into().trim().to_owned(),
            created_at: clock.utc(),
        })
    }

    /// Returns the project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the rater.
    #[must_use]
    pub const fn rated_by(&self) -> &UserId {
        &self.rated_by
    }

    /// Returns the rated member.
    #[must_use]
    pub const fn rated_user(&self) -> &UserId {
        &self.rated_user
    }

    /// Returns the score.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Returns the comment, possibly empty.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the rating timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// An outsider's rating of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRating {
    project_id: ProjectId,
    user_id: UserId,
    score: Score,
    comment: String,
    created_at: DateTime<Utc>,
}

impl ProjectRating {
    /// Creates a project rating.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        user_id: UserId,
        score: Score,
        comment: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            project_id,
            user_id,
            score,
            comment: comment.into().trim().to_owned(),
            created_at: clock.utc(),
        }
    }

    /// Returns the project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the rater.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the score.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Returns the comment, possibly empty.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the rating timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A rated project with its average score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProject {
    /// The project.
    pub project: Project,
    /// Mean of all project ratings.
    pub average_score: f64,
    /// Number of ratings the mean is taken over.
    pub rating_count: u32,
}

impl RankedProject {
    /// Ranks `project` by `scores`, or returns `None` when it has none.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "average scores are reported as fractional values"
    )]
    pub fn from_scores(project: Project, scores: &[Score]) -> Option<Self> {
        let rating_count = u32::try_from(scores.len()).ok().filter(|count| *count > 0)?;
        let total: u32 = scores.iter().map(|score| u32::from(score.value())).sum();
        Some(Self {
            project,
            average_score: f64::from(total) / f64::from(rating_count),
            rating_count,
        })
    }
}

/// Orders rankings best first; ties go to the project with more ratings,
/// then to the lower project id.
pub fn sort_rankings(rankings: &mut [RankedProject]) {
    rankings.sort_by(|left, right| {
        right
            .average_score
            .total_cmp(&left.average_score)
            .then_with(|| right.rating_count.cmp(&left.rating_count))
            .then_with(|| left.project.id().cmp(&right.project.id()))
    });
}
