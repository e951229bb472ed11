// Cohort/role audience computation for new-thread notifications.
//
// Decides who hears about a brand-new thread: everyone actively enrolled,
// or — when the course divides this topic by cohort — the thread's cohort
// plus every privileged, staff, and instructor user.

use std::collections::HashSet;

use anyhow::Result;
use tracing::debug;

use crate::forum::models::{Actor, Thread};

use super::models::{Course, ForumRole};
use super::traits::CourseStore;

/// Computes new-thread audiences from the course store.
pub struct AudienceProvider<'a> {
    store: &'a dyn CourseStore,
}

impl<'a> AudienceProvider<'a> {
    pub fn new(store: &'a dyn CourseStore) -> Self {
        Self { store }
    }

    /// The set of users who should hear that `thread` was created,
    /// excluding its creator.
    ///
    /// A user can qualify through several paths at once — cohort member
    /// and staff, say — so the candidate list is collected first and
    /// deduplicated in one pass at the end.
    pub async fn audience_for(
        &self,
        thread: &Thread,
        course: &Course,
        creator: &Actor,
    ) -> Result<HashSet<i64>> {
        let discussion_settings = self.store.discussion_settings(&course.id).await?;
        let cohort_settings = self.store.cohort_settings(&course.id).await?;

        let discussion_cohorted =
            cohort_settings.is_cohorted && discussion_settings.always_divide_inline_discussions;

        // Course-wide and inline divided topics are checked together
        let topic_divided = discussion_settings
            .divided_inline_discussions
            .iter()
            .chain(discussion_settings.divided_course_wide_discussions.iter())
            .any(|topic| topic == &thread.topic_id)
            || discussion_settings.always_divide_inline_discussions;

        let mut candidates: Vec<i64> = Vec::new();
        match thread.group_id {
            Some(group_id) if discussion_cohorted && topic_divided => {
                candidates.extend(self.store.cohort_members(&course.id, group_id).await?);
                candidates.extend(
                    self.store
                        .forum_role_holders(&course.id, &ForumRole::PRIVILEGED)
                        .await?,
                );
                candidates.extend(self.store.staff(&course.id).await?);
                candidates.extend(self.store.instructors(&course.id).await?);
                debug!(
                    group_id = group_id,
                    candidates = candidates.len(),
                    "Cohort-divided audience for thread {}",
                    thread.id
                );
            }
            // A thread with no cohort assignment widens to the whole
            // course, never to an empty set.
            _ => {
                candidates.extend(self.store.active_enrollments(&course.id).await?);
                debug!(
                    candidates = candidates.len(),
                    "Course-wide audience for thread {}",
                    thread.id
                );
            }
        }

        let mut audience: HashSet<i64> = candidates.into_iter().collect();
        audience.remove(&creator.id);
        Ok(audience)
    }
}
