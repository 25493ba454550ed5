//! Client state store — the single source of truth for the UI.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::catalog::model::WorkerRecord;
use crate::catalog::query::{DEFAULT_LIMIT, PageInfo};

/// Default upper bound of the price slider; a max at the ceiling means
/// "unbounded" and is not sent to the server.
pub const DEFAULT_PRICE_CEILING: i64 = 1000;

/// Inclusive price range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: DEFAULT_PRICE_CEILING,
        }
    }
}

/// Full client-side state: current filters, pagination, last received
/// page, and request status.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub workers: Vec<WorkerRecord>,
    pub loading: bool,
    pub error: Option<String>,

    // Pagination
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,

    // Filters
    pub selected_service: String,
    pub price_range: PriceRange,
    pub search_query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            workers: Vec::new(),
            loading: false,
            error: None,
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            items_per_page: DEFAULT_LIMIT,
            selected_service: "all".to_string(),
            price_range: PriceRange::default(),
            search_query: String::new(),
        }
    }
}

/// Session-scoped store. Every mutator is a single atomic transition on
/// a `watch` channel, so observers never see a partially applied update.
pub struct WorkersStore {
    tx: watch::Sender<FilterState>,
}

impl WorkersStore {
    pub fn new() -> Arc<Self> {
        let (tx, _rx) = watch::channel(FilterState::default());
        Arc::new(Self { tx })
    }

    /// Subscribe to state changes. Each mutator publishes the new state.
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.tx.subscribe()
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> FilterState {
        self.tx.borrow().clone()
    }

    fn mutate(&self, f: impl FnOnce(&mut FilterState)) {
        self.tx.send_modify(f);
    }

    pub fn set_workers(&self, workers: Vec<WorkerRecord>) {
        self.mutate(|s| s.workers = workers);
    }

    pub fn set_loading(&self, loading: bool) {
        self.mutate(|s| s.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.mutate(|s| s.error = error);
    }

    pub fn set_current_page(&self, page: usize) {
        self.mutate(|s| s.current_page = page.max(1));
    }

    /// Apply the pagination block of a server response in one transition.
    pub fn set_pagination(&self, info: &PageInfo) {
        self.mutate(|s| {
            s.current_page = info.current_page;
            s.total_pages = info.total_pages;
            s.total_items = info.total_items;
            s.items_per_page = info.items_per_page;
        });
    }

    pub fn set_selected_service(&self, service: impl Into<String>) {
        self.mutate(|s| s.selected_service = service.into());
    }

    pub fn set_price_range(&self, range: PriceRange) {
        self.mutate(|s| s.price_range = range);
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.mutate(|s| s.search_query = query.into());
    }

    /// Restore all filter fields and the page in one transition, so no
    /// observer can see a half-reset state.
    pub fn reset_filters(&self) {
        self.mutate(|s| {
            s.selected_service = "all".to_string();
            s.price_range = PriceRange::default();
            s.search_query.clear();
            s.current_page = 1;
        });
    }
}
