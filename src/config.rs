use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All endpoints come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Forum/comment service REST API base URL (subscriber pages, responses).
    pub forum_api_url: String,
    /// Notification front-end base URL — content links in every payload
    /// point into this app.
    pub frontend_url: String,
    /// Event-bus relay endpoint that accepts notification payloads.
    pub event_bus_url: String,
    /// Path to the read-only course mirror (enrollments, cohorts, roles).
    pub course_db_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the course DB path has a default — the service URLs are
    /// required for anything beyond `init` and audience dry-runs.
    pub fn load() -> Result<Self> {
        Ok(Self {
            forum_api_url: env::var("FORUM_API_URL").unwrap_or_default(),
            frontend_url: env::var("NOTIFICATION_FRONTEND_URL").unwrap_or_default(),
            event_bus_url: env::var("EVENT_BUS_URL").unwrap_or_default(),
            course_db_path: env::var("HERALD_DB_PATH")
                .unwrap_or_else(|_| "./herald.db".to_string()),
        })
    }

    /// Check that the forum API endpoint is configured.
    /// Call this before any operation that fetches subscribers or responses.
    pub fn require_forum(&self) -> Result<()> {
        if self.forum_api_url.is_empty() {
            anyhow::bail!(
                "FORUM_API_URL not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that both dispatch endpoints are configured.
    /// Call this before any operation that actually sends notifications.
    pub fn require_dispatch(&self) -> Result<()> {
        if self.event_bus_url.is_empty() {
            anyhow::bail!(
                "EVENT_BUS_URL not set. Notifications cannot be handed off.\n\
                 Add it to your .env file."
            );
        }
        if self.frontend_url.is_empty() {
            anyhow::bail!(
                "NOTIFICATION_FRONTEND_URL not set. Content links cannot be built.\n\
                 Add it to your .env file."
            );
        }
        Ok(())
    }
}
