// Recorded discussion events — the replay envelope.
//
// Mirrors the payload the forum emits when a thread, response, or comment
// is created, so operators can re-run a fan-out from a captured event.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::course::models::Course;
use crate::forum::models::{Actor, Thread};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DiscussionEvent {
    ThreadCreated {
        thread: Thread,
        course: Course,
        creator: Actor,
        occurred_at: Option<DateTime<Utc>>,
    },
    ResponseCreated {
        thread: Thread,
        course: Course,
        creator: Actor,
        occurred_at: Option<DateTime<Utc>>,
    },
    CommentCreated {
        thread: Thread,
        course: Course,
        creator: Actor,
        /// The response being commented on.
        parent_id: String,
        occurred_at: Option<DateTime<Utc>>,
    },
}

impl DiscussionEvent {
    /// Wire tag for logs and replay output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DiscussionEvent::ThreadCreated { .. } => "thread_created",
            DiscussionEvent::ResponseCreated { .. } => "response_created",
            DiscussionEvent::CommentCreated { .. } => "comment_created",
        }
    }

    pub fn thread(&self) -> &Thread {
        match self {
            DiscussionEvent::ThreadCreated { thread, .. }
            | DiscussionEvent::ResponseCreated { thread, .. }
            | DiscussionEvent::CommentCreated { thread, .. } => thread,
        }
    }

    pub fn course(&self) -> &Course {
        match self {
            DiscussionEvent::ThreadCreated { course, .. }
            | DiscussionEvent::ResponseCreated { course, .. }
            | DiscussionEvent::CommentCreated { course, .. } => course,
        }
    }

    pub fn creator(&self) -> &Actor {
        match self {
            DiscussionEvent::ThreadCreated { creator, .. }
            | DiscussionEvent::ResponseCreated { creator, .. }
            | DiscussionEvent::CommentCreated { creator, .. } => creator,
        }
    }

    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        match self {
            DiscussionEvent::ThreadCreated { occurred_at, .. }
            | DiscussionEvent::ResponseCreated { occurred_at, .. }
            | DiscussionEvent::CommentCreated { occurred_at, .. } => *occurred_at,
        }
    }
}
