// Course store trait — backend-agnostic read-only queries.
//
// All id queries return Vec<i64> rather than sets on purpose: a user can
// qualify through several paths at once (cohort member and staff, say),
// and the audience step owns the single deduplication pass.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{CohortSettings, DiscussionSettings, ForumRole};

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// User ids with an active enrollment in the course.
    async fn active_enrollments(&self, course_id: &str) -> Result<Vec<i64>>;

    /// Members of one cohort group within the course.
    async fn cohort_members(&self, course_id: &str, group_id: i64) -> Result<Vec<i64>>;

    /// Holders of any of the given discussion roles for the course.
    async fn forum_role_holders(&self, course_id: &str, roles: &[ForumRole]) -> Result<Vec<i64>>;

    /// Users with the course staff role.
    async fn staff(&self, course_id: &str) -> Result<Vec<i64>>;

    /// Users with the course instructor role.
    async fn instructors(&self, course_id: &str) -> Result<Vec<i64>>;

    /// Discussion division settings for the course.
    async fn discussion_settings(&self, course_id: &str) -> Result<DiscussionSettings>;

    /// Cohort settings for the course.
    async fn cohort_settings(&self, course_id: &str) -> Result<CohortSettings>;
}
