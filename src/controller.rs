//! Dataset controller for the sales table view.
//!
//! Mediates between the remote, paginated, server-sortable endpoint and the
//! free-text search mode. Owns the visible row set and page descriptor; the
//! embedding view only reads them. Overlapping fetches are allowed to
//! complete and are discarded unless theirs is the highest generation issued
//! so far, which is the system's only correctness-critical concurrency
//! invariant.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::ControllerConfig;
use crate::debounce::DebounceGate;
use crate::endpoint::{DatasetEndpoint, flatten_rows};
use crate::error::Result;
use crate::pagination::PageDescriptor;
use crate::sort::{self, ResolvedSort};
use crate::types::{Mode, Row, SortDescriptor, SortField};

/// What kind of fetch is in flight, so the view can show distinct
/// affordances: full-screen loading, an inline spinner on the active sort
/// column, or a small spinner inside the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Initial load, manual reload, and retry after an error.
    FullReload,
    /// Sort clicks, page navigation, and page-size changes.
    SortReload,
    /// Settled-query search.
    Search,
}

/// Loading indicators derived from the set of in-flight fetches. Derived,
/// not stored, so one operation's indicator can never mask or contradict
/// another's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indicators {
    pub full_reload: bool,
    pub sort_reload: bool,
    pub searching: bool,
}

/// Everything the view reads, guarded by one lock and mutated only by the
/// controller's apply step.
struct VisibleState {
    rows: Vec<Row>,
    page: PageDescriptor,
    sort: SortDescriptor,
    raw_query: String,
    settled_query: String,
    /// Human-readable message for the error banner; cleared by retry.
    error: Option<String>,
    in_flight: BTreeMap<u64, FetchKind>,
}

pub struct DatasetController<E: DatasetEndpoint> {
    endpoint: E,
    config: ControllerConfig,
    /// Highest generation issued so far. Stamped before each fetch; a
    /// completed fetch applies only if it still holds the highest stamp.
    generation: AtomicU64,
    state: Mutex<VisibleState>,
    gate: Mutex<DebounceGate>,
    /// Self-handle for spawning refresh tasks from `&self` methods.
    weak: Weak<Self>,
}

impl<E: DatasetEndpoint + 'static> DatasetController<E> {
    /// Create the controller and wire the debounce gate to mode
    /// re-evaluation. Must be called within a tokio runtime; the settled
    /// query is delivered by a background task that exits when the
    /// controller is dropped.
    ///
    /// No fetch is issued here; call [`reload`](Self::reload) once the view
    /// is mounted.
    pub fn new(endpoint: E, config: ControllerConfig) -> Arc<Self> {
        let (gate, settled_rx) = DebounceGate::new(Duration::from_millis(config.debounce_ms));

        let controller = Arc::new_cyclic(|weak| Self {
            generation: AtomicU64::new(0),
            state: Mutex::new(VisibleState {
                rows: Vec::new(),
                page: PageDescriptor::new(config.default_page_size),
                sort: config.default_sort,
                raw_query: String::new(),
                settled_query: String::new(),
                error: None,
                in_flight: BTreeMap::new(),
            }),
            gate: Mutex::new(gate),
            weak: weak.clone(),
            endpoint,
            config,
        });

        Self::spawn_settled_driver(Arc::downgrade(&controller), settled_rx);
        controller
    }

    /// Forward settled queries from the debounce gate to the controller.
    /// Holds only a weak reference so a dropped controller ends the task.
    fn spawn_settled_driver(weak: Weak<Self>, mut rx: mpsc::UnboundedReceiver<String>) {
        tokio::spawn(async move {
            while let Some(settled) = rx.recv().await {
                let Some(controller) = weak.upgrade() else {
                    break;
                };
                controller.settle_search(settled);
            }
        });
    }

    // --- user actions ------------------------------------------------------

    /// Full reload of the current mode/page/sort/query combination
    /// (the "refresh" button).
    pub fn reload(&self) {
        self.spawn_refresh(FetchKind::FullReload);
    }

    /// Clear the error banner and re-issue the failed fetch. The controller
    /// never retries on its own.
    pub fn retry(&self) {
        self.state.lock().error = None;
        self.spawn_refresh(FetchKind::FullReload);
    }

    /// Header click: cycle direction on the active field, select a new
    /// field ascending. Resets to the first page either way.
    pub fn toggle_sort(&self, field: SortField) {
        {
            let mut state = self.state.lock();
            state.sort = state.sort.toggled(field);
            state.page.first();
        }
        self.spawn_refresh(FetchKind::SortReload);
    }

    pub fn set_page(&self, index: usize) {
        self.navigate(|page| page.goto(index));
    }

    pub fn next_page(&self) {
        self.navigate(PageDescriptor::next);
    }

    pub fn previous_page(&self) {
        self.navigate(PageDescriptor::previous);
    }

    pub fn first_page(&self) {
        self.navigate(PageDescriptor::first);
    }

    pub fn last_page(&self) {
        self.navigate(PageDescriptor::last);
    }

    /// Change the page size, resetting to the first page. Sizes outside the
    /// configured set are ignored, as is re-selecting the active size.
    pub fn set_page_size(&self, size: usize) {
        {
            let mut state = self.state.lock();
            if !state.page.set_page_size(size, &self.config.allowed_page_sizes) {
                return;
            }
        }
        self.spawn_refresh(FetchKind::SortReload);
    }

    /// Feed one keystroke of the search box. The fetch fires only after the
    /// input has been static for the debounce window.
    pub fn input_search(&self, raw: impl Into<String>) {
        let raw = raw.into();
        self.state.lock().raw_query = raw.clone();
        self.gate.lock().input(raw);
    }

    // --- accessors ---------------------------------------------------------

    pub fn rows(&self) -> Vec<Row> {
        self.state.lock().rows.clone()
    }

    pub fn page(&self) -> PageDescriptor {
        self.state.lock().page
    }

    pub fn sort(&self) -> SortDescriptor {
        self.state.lock().sort
    }

    pub fn mode(&self) -> Mode {
        Mode::for_query(&self.state.lock().settled_query)
    }

    pub fn raw_query(&self) -> String {
        self.state.lock().raw_query.clone()
    }

    pub fn settled_query(&self) -> String {
        self.state.lock().settled_query.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn indicators(&self) -> Indicators {
        let state = self.state.lock();
        let mut indicators = Indicators::default();
        for kind in state.in_flight.values() {
            match kind {
                FetchKind::FullReload => indicators.full_reload = true,
                FetchKind::SortReload => indicators.sort_reload = true,
                FetchKind::Search => indicators.searching = true,
            }
        }
        indicators
    }

    /// Sum of the visible rows' total values (the table footer).
    pub fn visible_total_value(&self) -> f64 {
        self.state.lock().rows.iter().map(|r| r.total_value).sum()
    }

    // --- coordination ------------------------------------------------------

    /// Navigation is meaningful only in Browse mode; pagination controls are
    /// hidden during search, so a stray call there is ignored.
    fn navigate(&self, mutate: impl FnOnce(&mut PageDescriptor)) {
        {
            let mut state = self.state.lock();
            if Mode::for_query(&state.settled_query) == Mode::Search {
                return;
            }
            let before = state.page.page_index;
            mutate(&mut state.page);
            if state.page.page_index == before {
                return;
            }
        }
        self.spawn_refresh(FetchKind::SortReload);
    }

    /// The debounce gate settled a query: re-evaluate the mode and issue an
    /// authoritative fetch. Leaving Search resets Browse to the first page
    /// rather than resuming, since the pre-search page may no longer exist.
    fn settle_search(&self, settled: String) {
        let settled = settled.trim().to_string();
        let kind;
        {
            let mut state = self.state.lock();
            if settled == state.settled_query {
                return;
            }
            let was = Mode::for_query(&state.settled_query);
            state.settled_query = settled;
            let now = Mode::for_query(&state.settled_query);
            if was == Mode::Search && now == Mode::Browse {
                state.page.first();
            }
            kind = match now {
                Mode::Search => FetchKind::Search,
                Mode::Browse => FetchKind::SortReload,
            };
        }
        self.spawn_refresh(kind);
    }

    fn spawn_refresh(&self, kind: FetchKind) {
        // Upgrade can only fail during teardown, when no fetch is wanted.
        let Some(controller) = self.weak.upgrade() else {
            return;
        };
        tokio::spawn(async move {
            controller.refresh(kind).await;
        });
    }

    /// Issue the single authoritative fetch for the current
    /// mode/page/sort/query combination. Public so embedders that want to
    /// await completion (tests, SSR) can drive it directly.
    pub async fn refresh(&self, kind: FetchKind) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (mode, page_index, page_size, sort, query) = {
            let mut state = self.state.lock();
            state.in_flight.insert(generation, kind);
            (
                Mode::for_query(&state.settled_query),
                state.page.page_index,
                state.page.page_size,
                state.sort,
                state.settled_query.clone(),
            )
        };

        debug!(generation, ?kind, ?mode, page_index, "issuing fetch");

        let outcome = match mode {
            Mode::Browse => self.fetch_page(page_index, page_size, sort).await,
            Mode::Search => self.fetch_search(&query, sort, page_size).await,
        };

        let mut state = self.state.lock();
        state.in_flight.remove(&generation);

        // A slow earlier request must never overwrite a faster later one.
        if generation != self.generation.load(Ordering::SeqCst) {
            debug!(generation, "discarding superseded response");
            return;
        }

        match outcome {
            Ok((rows, page)) => {
                state.rows = rows;
                state.page = page;
                state.error = None;
            }
            Err(err) => {
                // Stale rows next to an error banner would be misleading, so
                // the dataset is cleared; pagination, sort, and search state
                // stay valid for a retry.
                warn!(%err, generation, "fetch failed");
                state.rows.clear();
                state.error = Some(err.to_string());
            }
        }
    }

    async fn fetch_page(
        &self,
        page_index: usize,
        page_size: usize,
        sort: SortDescriptor,
    ) -> Result<(Vec<Row>, PageDescriptor)> {
        let wire_key = sort::wire_sort_key(sort.field);
        let wire = self
            .endpoint
            .list_page(page_index, page_size, wire_key, sort.direction)
            .await?;

        let page = PageDescriptor::from_browse(page_index, page_size, &wire);
        let mut rows = flatten_rows(wire.content);
        if let ResolvedSort::ClientSide = sort::resolve(sort.field) {
            sort::apply_client_sort(&mut rows, sort);
        }
        Ok((rows, page))
    }

    /// Search results come back unordered, so the active sort is always
    /// applied client-side over the full result set.
    async fn fetch_search(
        &self,
        query: &str,
        sort: SortDescriptor,
        page_size: usize,
    ) -> Result<(Vec<Row>, PageDescriptor)> {
        let wire = self.endpoint.search(query).await?;
        let mut rows = flatten_rows(wire);
        sort::apply_client_sort(&mut rows, sort);
        let page = PageDescriptor::search_results(rows.len(), page_size);
        Ok((rows, page))
    }
}
