// Notification dispatch — envelope construction and event-bus hand-off.
//
// The bus owns delivery; the engine's contract ends at a successful
// hand-off. No retries, no delivery inspection.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use super::context::EventContext;
use super::types::{Notification, UserNotification};

/// Routing tag the notification platform files these envelopes under.
pub const APP_NAME: &str = "discussion";

/// Fire-and-forget sink for notification envelopes.
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, notification: &UserNotification) -> Result<()>;
}

/// HTTP relay implementation — POSTs each envelope to the bus endpoint.
pub struct HttpEventBus {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEventBus {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("herald/0.1 (discussion-notifications)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl EventBus for HttpEventBus {
    async fn publish(&self, notification: &UserNotification) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(notification)
            .send()
            .await
            .context("Event bus request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Event bus returned {}: {}", status, body);
        }
        Ok(())
    }
}

/// Builds envelopes and hands them to the bus.
pub struct NotificationDispatcher<'a> {
    bus: &'a dyn EventBus,
    frontend_url: String,
}

impl<'a> NotificationDispatcher<'a> {
    pub fn new(bus: &'a dyn EventBus, frontend_url: &str) -> Self {
        Self {
            bus,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Frame and publish one notification. Returns without touching the
    /// bus when there is nobody left to notify.
    pub async fn dispatch(&self, notification: Notification, ctx: &EventContext) -> Result<()> {
        if notification.recipients.is_empty() {
            debug!(
                kind = notification.kind.as_str(),
                "No recipients, skipping dispatch"
            );
            return Ok(());
        }

        // Base framing every kind shares; rule-supplied keys win.
        let mut context: HashMap<String, String> = HashMap::from([
            ("replier_name".to_string(), ctx.creator.username.clone()),
            ("post_title".to_string(), ctx.thread.title.clone()),
            ("course_name".to_string(), ctx.course.display_name.clone()),
        ]);
        context.extend(notification.extra_context);

        let envelope = UserNotification {
            user_ids: notification.recipients,
            notification_type: notification.kind,
            context,
            content_url: format!(
                "{}/{}/posts/{}",
                self.frontend_url, ctx.course.id, ctx.thread.id
            ),
            app_name: APP_NAME.to_string(),
            course_key: ctx.course.id.clone(),
            created_at: Utc::now(),
        };

        info!(
            kind = envelope.notification_type.as_str(),
            recipients = envelope.user_ids.len(),
            thread_id = %ctx.thread.id,
            "Dispatching notification"
        );

        self.bus.publish(&envelope).await
    }
}
