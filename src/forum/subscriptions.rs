// Subscriber traversal with pagination.
//
// Materializes the complete subscriber set for a thread from the forum
// service's paged listing. The source declares the total page count on
// every page, and that declared total drives termination — truncating the
// walk would under-notify, so any transport or decode failure aborts the
// whole fetch instead.

use std::collections::HashSet;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::traits::ForumService;

/// Fetch all subscribers of a thread, handling pagination.
///
/// Issues one request per declared page, in order, never re-requesting a
/// page. Duplicate subscriber records collapse via set semantics. A
/// listing that declares zero pages yields an empty set — the first
/// page's contents only count when the declared total covers it.
pub async fn fetch_subscribers(forum: &dyn ForumService, thread_id: &str) -> Result<HashSet<i64>> {
    let mut subscribers = HashSet::new();
    let mut page: u32 = 1;

    loop {
        let listing = forum.subscriber_page(thread_id, page).await.with_context(|| {
            format!("Failed to fetch subscriber page {page} for thread {thread_id}")
        })?;

        if page > listing.num_pages {
            break;
        }

        for record in &listing.collection {
            subscribers.insert(record.subscriber_id);
        }

        debug!(
            page = page,
            num_pages = listing.num_pages,
            page_size = listing.collection.len(),
            total = subscribers.len(),
            "Fetched subscriber page for thread {}",
            thread_id
        );

        if page >= listing.num_pages {
            break;
        }
        page += 1;
    }

    info!(
        count = subscribers.len(),
        thread_id = thread_id,
        "Collected subscribers"
    );

    Ok(subscribers)
}
