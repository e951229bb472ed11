// Course mirror schema — table creation for the read-only LMS mirror.
//
// Herald does not own these records; the mirror exists so audience queries
// run locally against the synced tables.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Active course enrollments
        CREATE TABLE IF NOT EXISTS enrollments (
            course_id TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            PRIMARY KEY (course_id, user_id)
        );

        -- Cohort group membership, keyed by the forum's numeric group id
        CREATE TABLE IF NOT EXISTS cohort_memberships (
            course_id TEXT NOT NULL,
            group_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            PRIMARY KEY (course_id, group_id, user_id)
        );

        -- Discussion role grants: administrator / moderator / community_ta
        CREATE TABLE IF NOT EXISTS forum_role_grants (
            course_id TEXT NOT NULL,
            role TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            PRIMARY KEY (course_id, role, user_id)
        );

        -- Course-level access roles: staff / instructor
        CREATE TABLE IF NOT EXISTS course_access_roles (
            course_id TEXT NOT NULL,
            role TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            PRIMARY KEY (course_id, role, user_id)
        );

        -- Per-course discussion division settings
        -- Topic lists are JSON arrays so the layout matches the LMS export
        CREATE TABLE IF NOT EXISTS discussion_settings (
            course_id TEXT PRIMARY KEY,
            divided_course_wide_discussions TEXT NOT NULL DEFAULT '[]',
            divided_inline_discussions TEXT NOT NULL DEFAULT '[]',
            always_divide_inline_discussions INTEGER NOT NULL DEFAULT 0
        );

        -- Per-course cohort settings
        CREATE TABLE IF NOT EXISTS cohort_settings (
            course_id TEXT PRIMARY KEY,
            is_cohorted INTEGER NOT NULL DEFAULT 0
        );

        -- Index for the course-wide enrollment audience query
        CREATE INDEX IF NOT EXISTS idx_enrollments_course
            ON enrollments(course_id, is_active);

        -- Index for cohort member lookups by group
        CREATE INDEX IF NOT EXISTS idx_cohort_memberships_group
            ON cohort_memberships(course_id, group_id);
        ",
    )
    .context("Failed to create course mirror tables")?;

    Ok(())
}

/// Count the number of tables in the mirror (useful for init confirmation).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
