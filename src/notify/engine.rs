// Fan-out orchestration — the entry points a forum event handler calls.
//
// One engine invocation is request-scoped and sequential: resolve the
// parent response once, evaluate the rules, materialize whichever
// audience each needs, and dispatch. The subscriber walk is the only
// repeated external call, and page N+1 depends on page 1's declared
// total, so nothing here runs concurrently.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::course::audience::AudienceProvider;
use crate::course::models::Course;
use crate::course::traits::CourseStore;
use crate::forum::models::{Actor, Thread};
use crate::forum::subscriptions;
use crate::forum::traits::ForumService;

use super::context::EventContext;
use super::dispatch::{EventBus, NotificationDispatcher};
use super::event::DiscussionEvent;
use super::rules;
use super::types::Notification;

pub struct NotificationEngine {
    forum: Arc<dyn ForumService>,
    courses: Arc<dyn CourseStore>,
    bus: Arc<dyn EventBus>,
    frontend_url: String,
}

impl NotificationEngine {
    pub fn new(
        forum: Arc<dyn ForumService>,
        courses: Arc<dyn CourseStore>,
        bus: Arc<dyn EventBus>,
        frontend_url: &str,
    ) -> Self {
        Self {
            forum,
            courses,
            bus,
            frontend_url: frontend_url.to_string(),
        }
    }

    /// Run the fan-out for a recorded discussion event.
    pub async fn process(&self, event: DiscussionEvent) -> Result<()> {
        match event {
            DiscussionEvent::ThreadCreated {
                thread,
                course,
                creator,
                ..
            } => self.send_new_thread_notifications(thread, course, creator).await,
            DiscussionEvent::ResponseCreated {
                thread,
                course,
                creator,
                ..
            } => {
                self.send_response_notifications(thread, course, creator, None)
                    .await
            }
            DiscussionEvent::CommentCreated {
                thread,
                course,
                creator,
                parent_id,
                ..
            } => {
                self.send_response_notifications(thread, course, creator, Some(&parent_id))
                    .await
            }
        }
    }

    /// Fan out a new response or comment on `thread` posted by `creator`.
    ///
    /// `parent_id` is set when the event is a comment on an existing
    /// response; the response is resolved once, up front, and a missing
    /// one fails the whole sequence.
    pub async fn send_response_notifications(
        &self,
        thread: Thread,
        course: Course,
        creator: Actor,
        parent_id: Option<&str>,
    ) -> Result<()> {
        let parent_response = match parent_id {
            Some(id) => Some(
                self.forum
                    .response(id)
                    .await
                    .with_context(|| format!("Failed to retrieve parent response {id}"))?,
            ),
            None => None,
        };

        let ctx = EventContext {
            thread,
            course,
            creator,
            parent_response,
        };
        let dispatcher = NotificationDispatcher::new(self.bus.as_ref(), &self.frontend_url);

        let direct = [
            rules::new_comment(&ctx),
            rules::new_response(&ctx),
            rules::new_comment_on_response(&ctx),
        ];
        for notification in direct.into_iter().flatten() {
            dispatcher.dispatch(notification, &ctx).await?;
        }

        let subscribers =
            subscriptions::fetch_subscribers(self.forum.as_ref(), &ctx.thread.id).await?;
        dispatcher
            .dispatch(rules::followed_post(&ctx, &subscribers), &ctx)
            .await?;

        info!(thread_id = %ctx.thread.id, "Response fan-out complete");
        Ok(())
    }

    /// Fan out a brand-new thread to its cohort/role audience.
    pub async fn send_new_thread_notifications(
        &self,
        thread: Thread,
        course: Course,
        creator: Actor,
    ) -> Result<()> {
        let kind = rules::thread_created_kind(&thread)?;

        let provider = AudienceProvider::new(self.courses.as_ref());
        let audience = provider.audience_for(&thread, &course, &creator).await?;
        let mut recipients: Vec<i64> = audience.into_iter().collect();
        recipients.sort_unstable();

        let notification = Notification {
            recipients,
            kind,
            extra_context: HashMap::from([
                ("username".to_string(), creator.username.clone()),
                ("post_title".to_string(), thread.title.clone()),
            ]),
        };

        let ctx = EventContext {
            thread,
            course,
            creator,
            parent_response: None,
        };
        let dispatcher = NotificationDispatcher::new(self.bus.as_ref(), &self.frontend_url);
        dispatcher.dispatch(notification, &ctx).await?;

        info!(thread_id = %ctx.thread.id, "New-thread fan-out complete");
        Ok(())
    }
}
