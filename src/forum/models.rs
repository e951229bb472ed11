// Boundary models for the discussion service.
//
// The forum service hands back loosely-typed JSON; everything the engine
// needs is parsed into these structs once, at the edge, instead of poking
// at raw attribute maps at each decision site.

use serde::Deserialize;

/// Discussion thread kind, as declared by the forum service.
///
/// Unknown values are preserved rather than rejected at parse time —
/// replies on an oddly-typed thread still fan out normally; only the
/// new-thread rule refuses them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ThreadType {
    Question,
    Discussion,
    Other(String),
}

impl From<String> for ThreadType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "question" => ThreadType::Question,
            "discussion" => ThreadType::Discussion,
            _ => ThreadType::Other(raw),
        }
    }
}

impl ThreadType {
    pub fn as_str(&self) -> &str {
        match self {
            ThreadType::Question => "question",
            ThreadType::Discussion => "discussion",
            ThreadType::Other(raw) => raw,
        }
    }
}

/// The root discussion post a reply/comment chain attaches to.
#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    /// User id of the thread author.
    pub user_id: i64,
    pub thread_type: ThreadType,
    /// Cohort group the thread is assigned to, if any.
    pub group_id: Option<i64>,
    /// Topic the thread lives under.
    #[serde(rename = "commentable_id")]
    pub topic_id: String,
}

/// A top-level reply to a thread — the "parent response" when the
/// triggering event is a comment one level deeper.
#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    pub id: String,
    pub user_id: i64,
    pub username: String,
}

/// The user whose action triggered the fan-out. Never a recipient of
/// notifications for their own action.
#[derive(Debug, Clone, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub username: String,
}
