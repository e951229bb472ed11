// SqliteCourseStore — rusqlite backend implementing the CourseStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work, and
// return. The lock is never held across .await points — Rust enforces
// this because MutexGuard is !Send.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use super::models::{CohortSettings, DiscussionSettings, ForumRole};
use super::traits::CourseStore;

pub struct SqliteCourseStore {
    conn: Mutex<Connection>,
}

impl SqliteCourseStore {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

fn user_ids(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map(params, |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<i64>>>()?;
    Ok(ids)
}

#[async_trait]
impl CourseStore for SqliteCourseStore {
    async fn active_enrollments(&self, course_id: &str) -> Result<Vec<i64>> {
        let conn = self.conn.lock().await;
        user_ids(
            &conn,
            "SELECT user_id FROM enrollments WHERE course_id = ?1 AND is_active = 1",
            params![course_id],
        )
    }

    async fn cohort_members(&self, course_id: &str, group_id: i64) -> Result<Vec<i64>> {
        let conn = self.conn.lock().await;
        user_ids(
            &conn,
            "SELECT user_id FROM cohort_memberships WHERE course_id = ?1 AND group_id = ?2",
            params![course_id, group_id],
        )
    }

    async fn forum_role_holders(&self, course_id: &str, roles: &[ForumRole]) -> Result<Vec<i64>> {
        // rusqlite has no array binds; the role list is tiny, so one query per role.
        let conn = self.conn.lock().await;
        let mut ids = Vec::new();
        for role in roles {
            ids.extend(user_ids(
                &conn,
                "SELECT user_id FROM forum_role_grants WHERE course_id = ?1 AND role = ?2",
                params![course_id, role.as_str()],
            )?);
        }
        Ok(ids)
    }

    async fn staff(&self, course_id: &str) -> Result<Vec<i64>> {
        let conn = self.conn.lock().await;
        user_ids(
            &conn,
            "SELECT user_id FROM course_access_roles WHERE course_id = ?1 AND role = 'staff'",
            params![course_id],
        )
    }

    async fn instructors(&self, course_id: &str) -> Result<Vec<i64>> {
        let conn = self.conn.lock().await;
        user_ids(
            &conn,
            "SELECT user_id FROM course_access_roles WHERE course_id = ?1 AND role = 'instructor'",
            params![course_id],
        )
    }

    async fn discussion_settings(&self, course_id: &str) -> Result<DiscussionSettings> {
        let conn = self.conn.lock().await;
        let row = conn
            .query_row(
                "SELECT divided_course_wide_discussions, divided_inline_discussions,
                        always_divide_inline_discussions
                 FROM discussion_settings WHERE course_id = ?1",
                params![course_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, bool>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((course_wide, inline, always_divide)) => Ok(DiscussionSettings {
                divided_course_wide_discussions: serde_json::from_str(&course_wide)
                    .context("Malformed divided_course_wide_discussions JSON")?,
                divided_inline_discussions: serde_json::from_str(&inline)
                    .context("Malformed divided_inline_discussions JSON")?,
                always_divide_inline_discussions: always_divide,
            }),
            None => Ok(DiscussionSettings::default()),
        }
    }

    async fn cohort_settings(&self, course_id: &str) -> Result<CohortSettings> {
        let conn = self.conn.lock().await;
        let is_cohorted = conn
            .query_row(
                "SELECT is_cohorted FROM cohort_settings WHERE course_id = ?1",
                params![course_id],
                |row| row.get::<_, bool>(0),
            )
            .optional()?;

        Ok(CohortSettings {
            is_cohorted: is_cohorted.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::schema::create_tables;

    async fn test_store() -> SqliteCourseStore {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn.execute_batch(
            "
            INSERT INTO enrollments (course_id, user_id, is_active) VALUES
                ('cs101', 1, 1), ('cs101', 2, 1), ('cs101', 3, 0), ('other', 4, 1);
            INSERT INTO cohort_memberships (course_id, group_id, user_id) VALUES
                ('cs101', 7, 1), ('cs101', 7, 2), ('cs101', 8, 5);
            INSERT INTO forum_role_grants (course_id, role, user_id) VALUES
                ('cs101', 'administrator', 10),
                ('cs101', 'moderator', 11),
                ('cs101', 'community_ta', 12),
                ('cs101', 'student', 13);
            INSERT INTO course_access_roles (course_id, role, user_id) VALUES
                ('cs101', 'staff', 20), ('cs101', 'instructor', 21);
            INSERT INTO discussion_settings
                (course_id, divided_course_wide_discussions, divided_inline_discussions,
                 always_divide_inline_discussions)
            VALUES ('cs101', '[\"topic-a\"]', '[\"topic-b\"]', 1);
            INSERT INTO cohort_settings (course_id, is_cohorted) VALUES ('cs101', 1);
            ",
        )
        .unwrap();
        SqliteCourseStore::new(conn)
    }

    #[tokio::test]
    async fn active_enrollments_filters_inactive_and_other_courses() {
        let store = test_store().await;
        let mut ids = store.active_enrollments("cs101").await.unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn cohort_members_scoped_to_group() {
        let store = test_store().await;
        let mut ids = store.cohort_members("cs101", 7).await.unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.cohort_members("cs101", 9).await.unwrap(), Vec::<i64>::new());
    }

    #[tokio::test]
    async fn forum_role_holders_only_requested_roles() {
        let store = test_store().await;
        let mut ids = store
            .forum_role_holders("cs101", &ForumRole::PRIVILEGED)
            .await
            .unwrap();
        ids.sort_unstable();
        // The 'student' grant is not privileged and stays out
        assert_eq!(ids, vec![10, 11, 12]);
    }

    #[tokio::test]
    async fn settings_default_when_missing() {
        let store = test_store().await;
        let settings = store.discussion_settings("unknown").await.unwrap();
        assert!(!settings.always_divide_inline_discussions);
        assert!(settings.divided_course_wide_discussions.is_empty());
        let cohorts = store.cohort_settings("unknown").await.unwrap();
        assert!(!cohorts.is_cohorted);
    }

    #[tokio::test]
    async fn settings_parse_topic_lists() {
        let store = test_store().await;
        let settings = store.discussion_settings("cs101").await.unwrap();
        assert_eq!(settings.divided_course_wide_discussions, vec!["topic-a"]);
        assert_eq!(settings.divided_inline_discussions, vec!["topic-b"]);
        assert!(settings.always_divide_inline_discussions);
        assert!(store.cohort_settings("cs101").await.unwrap().is_cohorted);
    }
}
