//! Query engine — pure filtering, search, sort, and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::model::WorkerRecord;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 12;

/// Normalized query parameters for a catalog page.
///
/// `page` and `limit` are clamped to at least 1 by [`run_query`]; a
/// `service` of `"all"` and a blank `search` are treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub page: usize,
    pub limit: usize,
    pub service: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub search: Option<String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            service: None,
            min_price: None,
            max_price: None,
            search: None,
        }
    }
}

impl QueryParams {
    /// Collapse sentinel values: `"all"` (any casing) means no service
    /// filter, and an empty or whitespace-only search means no search.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.max(1);
        self.service = self
            .service
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"));
        self.search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }
}

/// Pagination metadata for a served page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageInfo {
    pub fn new(current_page: usize, items_per_page: usize, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(items_per_page);
        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub items: Vec<WorkerRecord>,
    pub page: PageInfo,
}

/// Run a query over the full record set.
///
/// Pure function: never fails on well-formed input, never mutates the
/// dataset. An out-of-range page yields an empty `items`, not an error.
pub fn run_query(records: &[WorkerRecord], params: &QueryParams) -> PageResult {
    let page = params.page.max(1);
    let limit = params.limit.max(1);

    let mut filtered: Vec<&WorkerRecord> = records.iter().filter(|w| w.is_listable()).collect();

    if let Some(service) = &params.service {
        filtered.retain(|w| w.matches_service(service));
    }
    if let Some(min) = params.min_price {
        filtered.retain(|w| w.price_per_day >= min);
    }
    if let Some(max) = params.max_price {
        filtered.retain(|w| w.price_per_day <= max);
    }
    if let Some(search) = &params.search {
        let needle = search.to_lowercase();
        filtered.retain(|w| w.matches_search(&needle));
    }

    // Ascending by name, case-insensitive, raw name as tiebreaker so the
    // order is total and deterministic for identical inputs.
    filtered.sort_by_cached_key(|w| (w.name.to_lowercase(), w.name.clone()));

    let total_items = filtered.len();
    let items: Vec<WorkerRecord> = filtered
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .cloned()
        .collect();

    PageResult {
        items,
        page: PageInfo::new(page, limit, total_items),
    }
}
