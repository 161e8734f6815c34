//! Pagination state for the sales table.
//!
//! The descriptor is server-truth in Browse mode: it is replaced wholesale
//! from each successful page response, never mutated field-by-field by the
//! request coordinator. In Search mode it is synthesized as a single page
//! covering all results.

use serde::Serialize;

use crate::endpoint::WirePage;

/// Page sizes the UI offers.
pub const ALLOWED_PAGE_SIZES: &[usize] = &[5, 10, 20, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    /// 0-based page index.
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_elements: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Default for PageDescriptor {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            total_elements: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

impl PageDescriptor {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Build the descriptor for a successful Browse response.
    pub fn from_browse(page_index: usize, page_size: usize, wire: &WirePage) -> Self {
        Self {
            page_index,
            page_size,
            total_pages: wire.total_pages,
            total_elements: wire.total_elements,
            has_next: !wire.last,
            has_previous: !wire.first,
        }
    }

    /// Synthesize the descriptor for Search mode: one page covering all
    /// results, navigation disabled.
    pub fn search_results(result_count: usize, page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
            total_pages: 1,
            total_elements: result_count,
            has_next: false,
            has_previous: false,
        }
    }

    /// Change the page size, resetting to the first page: a page implied by
    /// the old size may not exist under the new one. Rejects sizes outside
    /// the allowed set; re-selecting the active size is a no-op so the
    /// current page position is kept.
    pub fn set_page_size(&mut self, size: usize, allowed: &[usize]) -> bool {
        if size == self.page_size || !allowed.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page_index = 0;
        true
    }

    /// Jump to a page, clamped to the last known page.
    pub fn goto(&mut self, index: usize) {
        self.page_index = index.min(self.total_pages.saturating_sub(1));
    }

    pub fn next(&mut self) {
        if self.has_next {
            self.goto(self.page_index + 1);
        }
    }

    pub fn previous(&mut self) {
        if self.has_previous {
            self.page_index = self.page_index.saturating_sub(1);
        }
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    pub fn last(&mut self) {
        self.page_index = self.total_pages.saturating_sub(1);
    }
}
