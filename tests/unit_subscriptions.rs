use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use herald::forum::models::Response;
use herald::forum::subscriptions::fetch_subscribers;
use herald::forum::traits::{ForumService, SubscriberPage, SubscriberRecord};

/// A forum whose subscriber listing is scripted page by page.
/// Records every page number requested.
struct ScriptedForum {
    pages: Vec<SubscriberPage>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedForum {
    fn new(pages: Vec<SubscriberPage>) -> Self {
        Self {
            pages,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn requested_pages(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ForumService for ScriptedForum {
    async fn response(&self, response_id: &str) -> Result<Response> {
        anyhow::bail!("no response {response_id} scripted")
    }

    async fn subscriber_page(&self, _thread_id: &str, page: u32) -> Result<SubscriberPage> {
        self.calls.lock().unwrap().push(page);
        self.pages
            .get((page - 1) as usize)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unscripted page {page}"))
    }
}

fn page(num_pages: u32, ids: &[i64]) -> SubscriberPage {
    SubscriberPage {
        num_pages,
        collection: ids
            .iter()
            .map(|&subscriber_id| SubscriberRecord { subscriber_id })
            .collect(),
    }
}

#[tokio::test]
async fn fetches_exactly_the_declared_number_of_pages() {
    let forum = ScriptedForum::new(vec![
        page(3, &[1, 2]),
        page(3, &[3, 4]),
        page(3, &[5]),
    ]);

    let subscribers = fetch_subscribers(&forum, "t1").await.unwrap();

    assert_eq!(forum.requested_pages(), vec![1, 2, 3]);
    assert_eq!(subscribers, [1, 2, 3, 4, 5].into_iter().collect());
}

#[tokio::test]
async fn single_page_listing_issues_one_request() {
    let forum = ScriptedForum::new(vec![page(1, &[7, 8])]);

    let subscribers = fetch_subscribers(&forum, "t1").await.unwrap();

    assert_eq!(forum.requested_pages(), vec![1]);
    assert_eq!(subscribers, [7, 8].into_iter().collect());
}

#[tokio::test]
async fn zero_page_listing_yields_empty_set() {
    // The first request is unavoidable, but a declared total of zero
    // means its contents don't count.
    let forum = ScriptedForum::new(vec![page(0, &[99])]);

    let subscribers = fetch_subscribers(&forum, "t1").await.unwrap();

    assert_eq!(forum.requested_pages(), vec![1]);
    assert!(subscribers.is_empty());
}

#[tokio::test]
async fn duplicates_across_pages_collapse() {
    let forum = ScriptedForum::new(vec![page(2, &[1, 2, 3]), page(2, &[2, 3, 4])]);

    let subscribers = fetch_subscribers(&forum, "t1").await.unwrap();

    assert_eq!(subscribers, [1, 2, 3, 4].into_iter().collect());
}

#[tokio::test]
async fn duplicate_within_one_page_collapses() {
    let forum = ScriptedForum::new(vec![page(1, &[5, 5, 5])]);

    let subscribers = fetch_subscribers(&forum, "t1").await.unwrap();

    assert_eq!(subscribers, HashSet::from([5]));
}

#[tokio::test]
async fn never_rerequests_a_consumed_page() {
    let forum = ScriptedForum::new(vec![
        page(4, &[1]),
        page(4, &[2]),
        page(4, &[3]),
        page(4, &[4]),
    ]);

    fetch_subscribers(&forum, "t1").await.unwrap();

    let requested = forum.requested_pages();
    let unique: HashSet<u32> = requested.iter().copied().collect();
    assert_eq!(requested.len(), unique.len());
}

#[tokio::test]
async fn a_failing_page_fails_the_whole_fetch() {
    // Page 2 is declared but unscripted, so fetching it errors; the
    // traversal must not silently truncate to page 1's contents.
    let forum = ScriptedForum::new(vec![page(3, &[1, 2])]);

    let result = fetch_subscribers(&forum, "t1").await;

    assert!(result.is_err());
    assert_eq!(forum.requested_pages(), vec![1, 2]);
}

#[tokio::test]
async fn respects_a_shrinking_declared_total() {
    // The source re-declares the total on every page; if page 2 says
    // there are only 2 pages, page 3 is never requested.
    let forum = ScriptedForum::new(vec![page(3, &[1]), page(2, &[2]), page(3, &[3])]);

    let subscribers = fetch_subscribers(&forum, "t1").await.unwrap();

    assert_eq!(forum.requested_pages(), vec![1, 2]);
    assert_eq!(subscribers, [1, 2].into_iter().collect());
}
