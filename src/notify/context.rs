// Per-event context — one immutable value threaded through every rule.
//
// The four reply rules are independent pure computations over the same
// data; nothing here mutates between them.

use crate::course::models::Course;
use crate::forum::models::{Actor, Response, Thread};

#[derive(Debug, Clone)]
pub struct EventContext {
    pub thread: Thread,
    pub course: Course,
    /// The user whose post triggered the fan-out.
    pub creator: Actor,
    /// Present only when the triggering event is a comment on a response.
    pub parent_response: Option<Response>,
}
