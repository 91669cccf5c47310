//! Client-side paging over an in-memory result set.
//!
//! [`ListPaginator`] owns the full result list of the current query and a
//! page cursor. The visible page is always derived from
//! `(items, page_index, page_size)`, so two paginators holding the same
//! inputs render the same page.

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::error::CoreError;

/// Number of movies shown per page on the browse screen.
pub const DEFAULT_PAGE_SIZE: usize = 3;

/// Total page count for `len` items, never less than one.
///
/// An empty result set still has a single (empty) page so that page
/// arithmetic never underflows.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Index range of page `page_index`, clipped to `len`.
pub fn page_bounds(len: usize, page_index: usize, page_size: NonZeroUsize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size.get()).min(len);
    let end = start.saturating_add(page_size.get()).min(len);
    start..end
}

/// Fixed-size page cursor over the current query's results.
#[derive(Debug, Clone)]
pub struct ListPaginator<T> {
    items: Vec<T>,
    page_index: usize,
    page_size: NonZeroUsize,
}

impl<T> ListPaginator<T> {
    /// Create an empty paginator. A page size of zero is rejected.
    pub fn new(page_size: usize) -> Result<Self, CoreError> {
        let page_size = NonZeroUsize::new(page_size)
            .ok_or_else(|| CoreError::Validation("Page size must be at least 1".to_string()))?;
        Ok(Self {
            items: Vec::new(),
            page_index: 0,
            page_size,
        })
    }

    /// Replace the whole result set and rewind to the first page.
    pub fn set_results(&mut self, items: Vec<T>) {
        self.items = items;
        self.page_index = 0;
    }

    /// The items on the current page.
    pub fn page(&self) -> &[T] {
        &self.items[page_bounds(self.items.len(), self.page_index, self.page_size)]
    }

    /// Advance one page. Returns `false` (and does nothing) on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page_index + 1 < self.total_pages() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns `false` (and does nothing) on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.page_size)
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    /// The full result set backing every page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item `index` of the current page, if present.
    pub fn item_on_page(&self, index: usize) -> Option<&T> {
        self.page().get(index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
