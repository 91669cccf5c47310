//! Browse screen: debounced catalog search over a paginated result list.

use std::sync::Arc;
use std::time::Duration;

use cinemawala_catalog::{CatalogSource, DebouncedQueryController, QueryOutcome};
use cinemawala_core::error::CoreError;
use cinemawala_core::movie::CatalogItem;
use cinemawala_core::pagination::ListPaginator;
use cinemawala_core::search::QueryState;
use tokio::sync::mpsc;

pub struct BrowseSession {
    controller: DebouncedQueryController,
    outcomes: mpsc::UnboundedReceiver<QueryOutcome>,
    paginator: ListPaginator<CatalogItem>,
    state: QueryState,
}

impl BrowseSession {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        debounce: Duration,
        page_size: usize,
    ) -> Result<Self, CoreError> {
        let paginator = ListPaginator::new(page_size)?;
        let (controller, outcomes) = DebouncedQueryController::new(source, debounce);
        Ok(Self {
            controller,
            outcomes,
            paginator,
            state: QueryState::default(),
        })
    }

    /// Record a keystroke; the query goes out once typing pauses.
    pub fn on_text_changed(&mut self, text: impl Into<String>) {
        let generation = self.controller.on_text_changed(text);
        self.state.search_text = self.controller.text().to_string();
        self.mark_issued(generation);
    }

    /// Query the current text immediately (initial listing, manual refresh).
    pub fn refresh(&mut self) {
        let generation = self.controller.submit_now();
        self.mark_issued(generation);
    }

    /// Wait for the next query outcome and apply it.
    ///
    /// Returns `true` when the outcome replaced the list, `false` when it
    /// was stale and discarded.
    pub async fn next_outcome(&mut self) -> bool {
        match self.outcomes.recv().await {
            Some(outcome) => self.apply_outcome(outcome),
            // The controller owns a sender for as long as the session lives.
            None => false,
        }
    }

    /// Apply one outcome unless a newer query has been scheduled since.
    pub fn apply_outcome(&mut self, outcome: QueryOutcome) -> bool {
        if !self.controller.is_current(outcome.generation) {
            tracing::debug!(
                generation = outcome.generation,
                current = self.controller.generation(),
                query = %outcome.query,
                "Discarding stale catalog response"
            );
            return false;
        }

        self.state.loading = false;
        if outcome.result.is_empty_or_failed() {
            self.state.no_results = true;
            self.paginator.set_results(Vec::new());
        } else {
            self.state.no_results = false;
            self.paginator.set_results(outcome.result.items);
        }
        tracing::debug!(
            generation = outcome.generation,
            query = %outcome.query,
            results = self.paginator.items().len(),
            "Applied catalog response"
        );
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.paginator.prev_page()
    }

    /// Movies on the current page.
    pub fn page(&self) -> &[CatalogItem] {
        self.paginator.page()
    }

    /// Movie at `index` on the current page, for opening its detail screen.
    pub fn select(&self, index: usize) -> Option<&CatalogItem> {
        self.paginator.item_on_page(index)
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn page_index(&self) -> usize {
        self.paginator.page_index()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages()
    }

    fn mark_issued(&mut self, generation: u64) {
        self.state.last_issued = generation;
        self.state.loading = true;
    }
}
