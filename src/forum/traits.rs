// Forum service trait — the swap-ready seam to the discussion backend.
//
// The HTTP client is the production implementation; tests script the
// responses in-process.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use super::models::Response;

/// One page of a thread's subscriber listing. The source declares the
/// total page count on every page; the pager trusts the latest value.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriberPage {
    pub num_pages: u32,
    pub collection: Vec<SubscriberRecord>,
}

/// A single subscription record. Only the subscriber matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriberRecord {
    pub subscriber_id: i64,
}

/// Read-only access to the discussion service.
#[async_trait]
pub trait ForumService: Send + Sync {
    /// Look up a response by id. A missing response is an error — the
    /// caller referenced it, so the engine does not invent substitute data.
    async fn response(&self, response_id: &str) -> Result<Response>;

    /// Fetch one page of a thread's subscriber listing. Pages are 1-based.
    async fn subscriber_page(&self, thread_id: &str, page: u32) -> Result<SubscriberPage>;
}
