// HTTP client for the forum/comment service REST API.
//
// A thin reqwest wrapper with a generic GET helper. Responses and
// subscriber pages both come from this service, so a single client
// implements the whole ForumService trait.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::Response;
use super::traits::{ForumService, SubscriberPage};

/// HTTP implementation of `ForumService`.
pub struct HttpForumClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpForumClient {
    /// Create a new forum client pointing at the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("herald/0.1 (discussion-notifications)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to a forum API path and deserialize the response.
    ///
    /// `params` are query string key-value pairs.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        debug!(path = path, "Forum API GET request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Forum API request failed: {path}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Forum API returned {} for {}: {}", status, path, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse forum response from {path}"))
    }
}

#[async_trait]
impl ForumService for HttpForumClient {
    async fn response(&self, response_id: &str) -> Result<Response> {
        self.get_json(&format!("/api/v1/comments/{response_id}"), &[])
            .await
            .with_context(|| format!("Failed to retrieve response {response_id}"))
    }

    async fn subscriber_page(&self, thread_id: &str, page: u32) -> Result<SubscriberPage> {
        self.get_json(
            &format!("/api/v1/threads/{thread_id}/subscriptions"),
            &[("page", &page.to_string())],
        )
        .await
    }
}
