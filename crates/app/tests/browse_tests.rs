//! Browse-screen behaviour against a scripted catalog source.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cinemawala_app::BrowseSession;
use cinemawala_catalog::{CatalogSource, ListResult};
use cinemawala_core::movie::CatalogItem;

/// Answers every search with `count` movies titled after the query.
/// Queries named `slow*` take two seconds; `broken` fails.
struct ScriptedSource {
    calls: Mutex<Vec<String>>,
    count: usize,
}

impl ScriptedSource {
    fn new(count: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            count,
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn items(&self, prefix: &str) -> Vec<CatalogItem> {
        (1..=self.count)
            .map(|i| CatalogItem::new(i as i64, format!("{prefix} {i}")))
            .collect()
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    async fn search(&self, text: &str) -> ListResult {
        self.calls.lock().unwrap().push(text.to_string());
        if text.starts_with("slow") {
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
        match text {
            "broken" => ListResult::failed(),
            "nothing" => ListResult::success(Vec::new()),
            _ => ListResult::success(self.items(text)),
        }
    }

    async fn popular(&self) -> ListResult {
        self.calls.lock().unwrap().push("<popular>".to_string());
        ListResult::success(self.items("Popular"))
    }
}

fn session(source: Arc<ScriptedSource>) -> BrowseSession {
    BrowseSession::new(source, Duration::from_millis(500), 3).unwrap()
}

fn titles(browse: &BrowseSession) -> Vec<String> {
    browse.page().iter().map(|m| m.title.clone()).collect()
}

#[tokio::test(start_paused = true)]
async fn typing_burst_loads_one_result_list() {
    let source = ScriptedSource::new(2);
    let mut browse = session(source.clone());

    for text in ["b", "ba", "bat"] {
        browse.on_text_changed(text);
        tokio::time::sleep(Duration::from_millis(120)).await;
    }
    assert!(browse.state().loading);
    assert_eq!(browse.state().search_text, "bat");

    assert!(browse.next_outcome().await);
    assert!(!browse.state().loading);
    assert_eq!(titles(&browse), vec!["bat 1", "bat 2"]);
    assert_eq!(source.calls(), vec!["bat"]);
}

#[tokio::test(start_paused = true)]
async fn refresh_with_empty_text_lists_popular() {
    let source = ScriptedSource::new(1);
    let mut browse = session(source.clone());

    browse.refresh();
    assert!(browse.next_outcome().await);
    assert_eq!(titles(&browse), vec!["Popular 1"]);
    assert_eq!(source.calls(), vec!["<popular>"]);
}

#[tokio::test(start_paused = true)]
async fn late_response_for_an_older_query_is_discarded() {
    let source = ScriptedSource::new(1);
    let mut browse = session(source.clone());

    browse.on_text_changed("slow search");
    // Let the first query go out, then type again while it is in flight.
    tokio::time::sleep(Duration::from_millis(600)).await;
    browse.on_text_changed("fast");

    assert!(browse.next_outcome().await);
    assert_eq!(titles(&browse), vec!["fast 1"]);

    // The slow response still arrives, but no longer applies.
    assert!(!browse.next_outcome().await);
    assert_eq!(titles(&browse), vec!["fast 1"]);
    assert_eq!(source.calls(), vec!["slow search", "fast"]);
}

#[tokio::test(start_paused = true)]
async fn failed_or_empty_responses_show_no_results() {
    let source = ScriptedSource::new(4);
    let mut browse = session(source);

    browse.on_text_changed("dune");
    browse.next_outcome().await;
    assert!(!browse.state().no_results);
    assert_eq!(browse.page().len(), 3);

    browse.on_text_changed("broken");
    browse.next_outcome().await;
    assert!(browse.state().no_results);
    assert!(browse.page().is_empty());
    assert_eq!(browse.total_pages(), 1);

    browse.on_text_changed("nothing");
    browse.next_outcome().await;
    assert!(browse.state().no_results);

    browse.on_text_changed("dune");
    browse.next_outcome().await;
    assert!(!browse.state().no_results);
}

#[tokio::test(start_paused = true)]
async fn pages_walk_forward_and_back() {
    let source = ScriptedSource::new(7);
    let mut browse = session(source);
    browse.on_text_changed("alien");
    browse.next_outcome().await;

    assert_eq!(browse.total_pages(), 3);
    assert_eq!(titles(&browse), vec!["alien 1", "alien 2", "alien 3"]);
    assert!(!browse.prev_page());

    assert!(browse.next_page());
    assert!(browse.next_page());
    assert_eq!(titles(&browse), vec!["alien 7"]);
    assert!(!browse.next_page());
    assert_eq!(browse.page_index(), 2);

    assert!(browse.prev_page());
    assert_eq!(titles(&browse), vec!["alien 4", "alien 5", "alien 6"]);
    assert_eq!(browse.select(1).map(|m| m.id), Some(5));
    assert!(browse.select(3).is_none());
}

#[tokio::test(start_paused = true)]
async fn new_results_return_to_the_first_page() {
    let source = ScriptedSource::new(7);
    let mut browse = session(source);
    browse.on_text_changed("alien");
    browse.next_outcome().await;
    browse.next_page();
    browse.next_page();

    browse.on_text_changed("aliens");
    browse.next_outcome().await;
    assert_eq!(browse.page_index(), 0);
    assert_eq!(titles(&browse)[0], "aliens 1");
}

#[test]
fn zero_page_size_is_rejected() {
    let source = ScriptedSource::new(1);
    assert!(BrowseSession::new(source, Duration::from_millis(500), 0).is_err());
}
