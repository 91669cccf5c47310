//! Keystroke debouncing for catalog queries.
//!
//! [`DebouncedQueryController::on_text_changed`] records the new text and
//! (re)starts a quiet-interval timer. Only when the timer runs out without
//! another keystroke is a query sent to the [`CatalogSource`]; its result
//! arrives on the channel returned by [`DebouncedQueryController::new`].
//!
//! Every scheduled query carries a generation number. Once a query has
//! been sent it is not cancelled, so an older response can arrive after a
//! newer query was scheduled; receivers compare generations with
//! [`DebouncedQueryController::is_current`] and drop stale outcomes.

use std::sync::Arc;
use std::time::Duration;

use cinemawala_core::search::{CatalogQuery, DEFAULT_DEBOUNCE_MS};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::source::{CatalogSource, ListResult};

/// A completed catalog query, tagged with the generation that issued it.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub generation: u64,
    pub query: CatalogQuery,
    pub result: ListResult,
}

/// Coalesces rapid text changes into one catalog query per quiet period.
pub struct DebouncedQueryController {
    source: Arc<dyn CatalogSource>,
    quiet_interval: Duration,
    text: String,
    generation: u64,
    /// Timer of the currently scheduled (not yet sent) query.
    pending: Option<CancellationToken>,
    outcomes: mpsc::UnboundedSender<QueryOutcome>,
}

impl DebouncedQueryController {
    /// Create a controller and the receiver its query outcomes arrive on.
    pub fn new(
        source: Arc<dyn CatalogSource>,
        quiet_interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<QueryOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        let controller = Self {
            source,
            quiet_interval,
            text: String::new(),
            generation: 0,
            pending: None,
            outcomes,
        };
        (controller, rx)
    }

    /// Controller with the default 500 ms quiet interval.
    pub fn with_default_interval(
        source: Arc<dyn CatalogSource>,
    ) -> (Self, mpsc::UnboundedReceiver<QueryOutcome>) {
        Self::new(source, Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    /// Record `text` and schedule a query after the quiet interval,
    /// superseding any query still waiting for its timer.
    ///
    /// Must be called from within a Tokio runtime. Returns the generation
    /// of the newly scheduled query.
    pub fn on_text_changed(&mut self, text: impl Into<String>) -> u64 {
        self.text = text.into();
        self.schedule(self.quiet_interval)
    }

    /// Send a query for the current text without waiting, superseding any
    /// pending one. Used for the initial listing and explicit refreshes.
    pub fn submit_now(&mut self) -> u64 {
        self.schedule(Duration::ZERO)
    }

    /// Drop the pending query, if any. Queries already sent still complete.
    pub fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Latest text recorded, whether or not its query has been sent yet.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Generation of the most recently scheduled query.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an outcome belongs to the most recently scheduled query.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    fn schedule(&mut self, delay: Duration) -> u64 {
        self.cancel_pending();
        self.generation += 1;

        let generation = self.generation;
        let query = CatalogQuery::from_input(&self.text);
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let source = Arc::clone(&self.source);
        let outcomes = self.outcomes.clone();

        tracing::trace!(generation, %query, delay_ms = delay.as_millis() as u64, "Scheduling catalog query");

        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::select! {
                    _ = cancelled.cancelled() => {
                        tracing::trace!(generation, "Superseded before the quiet interval elapsed");
                        return;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
            } else if cancelled.is_cancelled() {
                return;
            }

            tracing::debug!(generation, %query, "Issuing catalog query");
            let result = source.fetch(&query).await;

            // The receiver is gone once the owning screen has been closed.
            let _ = outcomes.send(QueryOutcome {
                generation,
                query,
                result,
            });
        });

        self.pending = Some(token);
        generation
    }
}

impl Drop for DebouncedQueryController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use cinemawala_core::movie::CatalogItem;

    use super::*;

    /// Records every call and answers with one item named after the query.
    #[derive(Default)]
    struct RecordingSource {
        calls: Mutex<Vec<CatalogQuery>>,
    }

    impl RecordingSource {
        fn calls(&self) -> Vec<CatalogQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogSource for RecordingSource {
        async fn search(&self, text: &str) -> ListResult {
            self.calls
                .lock()
                .unwrap()
                .push(CatalogQuery::Search(text.to_string()));
            ListResult::success(vec![CatalogItem::new(1, text)])
        }

        async fn popular(&self) -> ListResult {
            self.calls.lock().unwrap().push(CatalogQuery::Popular);
            ListResult::success(vec![CatalogItem::new(2, "Popular")])
        }
    }

    fn controller() -> (
        Arc<RecordingSource>,
        DebouncedQueryController,
        mpsc::UnboundedReceiver<QueryOutcome>,
    ) {
        let source = Arc::new(RecordingSource::default());
        let (controller, rx) = DebouncedQueryController::with_default_interval(source.clone());
        (source, controller, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_issue_one_query_for_the_last_text() {
        let (source, mut controller, mut rx) = controller();

        controller.on_text_changed("b");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.on_text_changed("ba");
        tokio::time::sleep(Duration::from_millis(100)).await;
        let last = controller.on_text_changed("bat");

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.generation, last);
        assert_eq!(outcome.query, CatalogQuery::Search("bat".to_string()));
        assert!(controller.is_current(outcome.generation));

        // Nothing else arrives, however long we wait.
        let more = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(more.is_err());
        assert_eq!(source.calls(), vec![CatalogQuery::Search("bat".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn text_is_recorded_immediately() {
        let (source, mut controller, _rx) = controller();
        controller.on_text_changed("ma");
        assert_eq!(controller.text(), "ma");
        assert!(source.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_text_issues_popular_listing() {
        let (source, mut controller, mut rx) = controller();
        controller.on_text_changed("   ");

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.query, CatalogQuery::Popular);
        assert_eq!(source.calls(), vec![CatalogQuery::Popular]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_quiet_periods_issue_separate_queries() {
        let (source, mut controller, mut rx) = controller();

        controller.on_text_changed("alien");
        assert_eq!(rx.recv().await.unwrap().query, CatalogQuery::Search("alien".into()));

        controller.on_text_changed("aliens");
        assert_eq!(rx.recv().await.unwrap().query, CatalogQuery::Search("aliens".into()));

        assert_eq!(source.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_now_skips_the_quiet_interval() {
        let (_source, mut controller, mut rx) = controller();
        let start = tokio::time::Instant::now();

        controller.submit_now();
        let outcome = rx.recv().await.unwrap();

        assert_eq!(outcome.query, CatalogQuery::Popular);
        assert!(start.elapsed() < Duration::from_millis(DEFAULT_DEBOUNCE_MS));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_pending_drops_the_scheduled_query() {
        let (source, mut controller, mut rx) = controller();
        controller.on_text_changed("dune");
        controller.cancel_pending();

        let outcome = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(outcome.is_err());
        assert!(source.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn older_generations_are_not_current() {
        let (_source, mut controller, _rx) = controller();
        let first = controller.on_text_changed("a");
        let second = controller.on_text_changed("ab");
        assert!(!controller.is_current(first));
        assert!(controller.is_current(second));
    }
}
