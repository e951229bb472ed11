// Notification payload types.
//
// NotificationKind tags match the wire values the notification platform
// routes on. Notification is what the rules produce; UserNotification is
// the envelope handed to the event bus.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Every notification kind the engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewResponse,
    NewComment,
    NewCommentOnResponse,
    ResponseOnFollowedPost,
    CommentOnFollowedPost,
    NewQuestionPost,
    NewDiscussionPost,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::NewResponse => "new_response",
            NotificationKind::NewComment => "new_comment",
            NotificationKind::NewCommentOnResponse => "new_comment_on_response",
            NotificationKind::ResponseOnFollowedPost => "response_on_followed_post",
            NotificationKind::CommentOnFollowedPost => "comment_on_followed_post",
            NotificationKind::NewQuestionPost => "new_question_post",
            NotificationKind::NewDiscussionPost => "new_discussion_post",
        }
    }
}

/// A resolved notification before framing: who, what kind, and the
/// kind-specific context the rule attached.
#[derive(Debug, Clone)]
pub struct Notification {
    pub recipients: Vec<i64>,
    pub kind: NotificationKind,
    pub extra_context: HashMap<String, String>,
}

/// The envelope handed to the event bus. The bus owns delivery from here.
#[derive(Debug, Clone, Serialize)]
pub struct UserNotification {
    pub user_ids: Vec<i64>,
    pub notification_type: NotificationKind,
    pub context: HashMap<String, String>,
    pub content_url: String,
    pub app_name: String,
    pub course_key: String,
    pub created_at: DateTime<Utc>,
}
