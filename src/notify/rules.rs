// Notification decision rules.
//
// Each rule is a pure function from the event context to at most one
// notification. A single reply event runs all four reply rules; they are
// independent, so order only affects dispatch order, never outcomes.

use std::collections::{HashMap, HashSet};

use anyhow::Result;

use crate::forum::models::{Thread, ThreadType};

use super::context::EventContext;
use super::types::{Notification, NotificationKind};

/// Context key naming the response author in comment notifications.
const AUTHOR_NAME: &str = "author_name";

/// Notify the thread author that their thread got a top-level response.
pub fn new_response(ctx: &EventContext) -> Option<Notification> {
    if ctx.parent_response.is_none() && ctx.creator.id != ctx.thread.user_id {
        return Some(Notification {
            recipients: vec![ctx.thread.user_id],
            kind: NotificationKind::NewResponse,
            extra_context: HashMap::new(),
        });
    }
    None
}

/// Notify the thread author that a response on their thread got a comment.
///
/// `author_name` is the literal "your" when the thread author also wrote
/// the response, so the message reads "your response" instead of echoing
/// their own username back at them.
pub fn new_comment(ctx: &EventContext) -> Option<Notification> {
    let parent = ctx.parent_response.as_ref()?;
    if ctx.creator.id == ctx.thread.user_id {
        return None;
    }

    let author_name = if parent.user_id == ctx.thread.user_id {
        "your".to_string()
    } else {
        parent.username.clone()
    };
    Some(Notification {
        recipients: vec![ctx.thread.user_id],
        kind: NotificationKind::NewComment,
        extra_context: HashMap::from([(AUTHOR_NAME.to_string(), author_name)]),
    })
}

/// Notify the response author that their response got a comment.
///
/// Skipped when the response author is the thread author — they already
/// get `new_comment` for the same event.
pub fn new_comment_on_response(ctx: &EventContext) -> Option<Notification> {
    let parent = ctx.parent_response.as_ref()?;
    if ctx.creator.id != parent.user_id && parent.user_id != ctx.thread.user_id {
        return Some(Notification {
            recipients: vec![parent.user_id],
            kind: NotificationKind::NewCommentOnResponse,
            extra_context: HashMap::new(),
        });
    }
    None
}

/// Notify everyone following the thread, except the thread author, the
/// acting user, and (for comments) the response author.
///
/// Always produces a notification — the dispatcher drops it when the
/// exclusions leave nobody. Recipients are sorted for stable dispatch.
pub fn followed_post(ctx: &EventContext, subscribers: &HashSet<i64>) -> Notification {
    let mut recipients: Vec<i64> = subscribers
        .iter()
        .copied()
        .filter(|&id| {
            id != ctx.thread.user_id
                && id != ctx.creator.id
                && ctx.parent_response.as_ref().is_none_or(|p| id != p.user_id)
        })
        .collect();
    recipients.sort_unstable();

    match &ctx.parent_response {
        None => Notification {
            recipients,
            kind: NotificationKind::ResponseOnFollowedPost,
            extra_context: HashMap::new(),
        },
        Some(parent) => Notification {
            recipients,
            kind: NotificationKind::CommentOnFollowedPost,
            extra_context: HashMap::from([(AUTHOR_NAME.to_string(), parent.username.clone())]),
        },
    }
}

/// Map a brand-new thread to its notification kind.
///
/// Anything other than a question or discussion thread is a data error:
/// the event is rejected rather than dispatched under a default kind.
pub fn thread_created_kind(thread: &Thread) -> Result<NotificationKind> {
    match &thread.thread_type {
        ThreadType::Question => Ok(NotificationKind::NewQuestionPost),
        ThreadType::Discussion => Ok(NotificationKind::NewDiscussionPost),
        ThreadType::Other(raw) => anyhow::bail!(
            "Invalid thread type {raw:?} on thread {} — expected question or discussion",
            thread.id
        ),
    }
}
