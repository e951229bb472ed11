// Course-side models — courses, division settings, and role names.
//
// These are the types that flow through audience computation. They're
// separate from the store queries so other modules can use them without
// depending on rusqlite directly.

use serde::Deserialize;

/// A course, as much of it as notification framing needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    /// Opaque course key, e.g. "course-v1:Org+CS101+2026".
    pub id: String,
    pub display_name: String,
}

/// Privileged discussion roles scoped to one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForumRole {
    Administrator,
    Moderator,
    CommunityTa,
}

impl ForumRole {
    /// The roles whose holders always see divided discussions.
    pub const PRIVILEGED: [ForumRole; 3] = [
        ForumRole::Administrator,
        ForumRole::Moderator,
        ForumRole::CommunityTa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForumRole::Administrator => "administrator",
            ForumRole::Moderator => "moderator",
            ForumRole::CommunityTa => "community_ta",
        }
    }
}

/// Per-course discussion division settings.
///
/// Courses with no stored settings behave as undivided — the default.
#[derive(Debug, Clone, Default)]
pub struct DiscussionSettings {
    pub divided_course_wide_discussions: Vec<String>,
    pub divided_inline_discussions: Vec<String>,
    pub always_divide_inline_discussions: bool,
}

/// Per-course cohort settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CohortSettings {
    pub is_cohorted: bool,
}
