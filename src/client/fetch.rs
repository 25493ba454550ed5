//! Debounced fetch controller — keeps the store eventually consistent
//! with the server while suppressing superseded requests.
//!
//! Every input change starts a new request cycle that atomically
//! replaces and cancels the previous one: the old task is aborted, and a
//! generation counter guarantees that a response which slipped past the
//! abort can never overwrite state belonging to a newer request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::cache::ResponseCache;
use crate::client::store::{DEFAULT_PRICE_CEILING, PriceRange, WorkersStore};
use crate::client::transport::Transport;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::server::response::WorkersEnvelope;

/// Lifecycle of a request cycle.
///
/// `Idle → Debouncing → InFlight → (Resolved | Failed | Superseded)`;
/// immediate fetches skip `Debouncing`. A settled phase starts a new
/// cycle when the next input arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Debouncing,
    InFlight,
    Resolved,
    Failed,
    Superseded,
}

impl FetchPhase {
    /// Check if this phase allows transitioning to another phase.
    pub fn can_transition_to(&self, target: FetchPhase) -> bool {
        use FetchPhase::*;

        matches!(
            (self, target),
            (Idle, Debouncing) | (Idle, InFlight) |
            // Debounce window: the timer fires, or newer input supersedes
            (Debouncing, InFlight) | (Debouncing, Superseded) |
            // In flight: response, failure, or newer input
            (InFlight, Resolved) | (InFlight, Failed) | (InFlight, Superseded) |
            // A settled cycle is replaced by the next input
            (Resolved, Debouncing) | (Resolved, InFlight) |
            (Failed, Debouncing) | (Failed, InFlight) |
            (Superseded, Debouncing) | (Superseded, InFlight)
        )
    }

    /// A settled phase: the cycle produced a result, an error, or was
    /// replaced by a newer one.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Resolved | Self::Failed | Self::Superseded)
    }
}

impl std::fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Debouncing => "debouncing",
            Self::InFlight => "in_flight",
            Self::Resolved => "resolved",
            Self::Failed => "failed",
            Self::Superseded => "superseded",
        };
        write!(f, "{s}")
    }
}

/// Orchestrates requests against the workers endpoint: debounce on
/// filter input, immediate fetch on pagination, replace-and-cancel for
/// in-flight requests, and a TTL cache short-circuiting the network.
pub struct FetchController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    store: Arc<WorkersStore>,
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
    base_url: String,
    debounce: Duration,
    generation: AtomicU64,
    current: Mutex<Option<JoinHandle<()>>>,
    phase_tx: watch::Sender<FetchPhase>,
}

impl FetchController {
    pub fn new(
        store: Arc<WorkersStore>,
        transport: Arc<dyn Transport>,
        config: ClientConfig,
    ) -> Self {
        let (phase_tx, _rx) = watch::channel(FetchPhase::Idle);
        Self {
            inner: Arc::new(ControllerInner {
                store,
                transport,
                cache: ResponseCache::new(config.cache_ttl),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                debounce: config.debounce,
                generation: AtomicU64::new(0),
                current: Mutex::new(None),
                phase_tx,
            }),
        }
    }

    /// Phase of the most recent request cycle.
    pub fn phase(&self) -> FetchPhase {
        *self.inner.phase_tx.borrow()
    }

    /// Subscribe to phase changes.
    pub fn subscribe_phase(&self) -> watch::Receiver<FetchPhase> {
        self.inner.phase_tx.subscribe()
    }

    // ── Inputs ──────────────────────────────────────────────────────

    /// Initial fetch for the current state. Immediate.
    pub fn load(&self) {
        self.schedule(false);
    }

    /// Manual retry after a failure. Immediate.
    pub fn retry(&self) {
        self.schedule(false);
    }

    /// Select a service category. Filter change: page resets to 1 and
    /// the fetch is debounced.
    pub fn set_service(&self, service: impl Into<String>) {
        self.inner.store.set_selected_service(service);
        self.inner.store.set_current_page(1);
        self.schedule(true);
    }

    /// Adjust the price range. Filter change semantics.
    pub fn set_price_range(&self, range: PriceRange) {
        self.inner.store.set_price_range(range);
        self.inner.store.set_current_page(1);
        self.schedule(true);
    }

    /// Update the free-text search. Filter change semantics.
    pub fn set_search(&self, query: impl Into<String>) {
        self.inner.store.set_search_query(query);
        self.inner.store.set_current_page(1);
        self.schedule(true);
    }

    /// Navigate to a page. Pagination-only change: no debounce.
    pub fn set_page(&self, page: usize) {
        self.inner.store.set_current_page(page);
        self.schedule(false);
    }

    /// Restore default filters and refetch page 1 immediately.
    pub fn reset_filters(&self) {
        self.inner.store.reset_filters();
        self.schedule(false);
    }

    /// Fetch the distinct service categories (filter dropdown). Not part
    /// of the debounced cycle and not cached.
    pub async fn fetch_services(&self) -> crate::error::Result<Vec<String>> {
        let url = format!("{}/api/services", self.inner.base_url);
        let envelope = self.inner.transport.get_services(&url).await?;
        if !envelope.success {
            let message = envelope
                .error
                .unwrap_or_else(|| "API request failed".to_string());
            return Err(ClientError::Api(message).into());
        }
        Ok(envelope.data.unwrap_or_default())
    }

    // ── Request cycle ───────────────────────────────────────────────

    /// Start a new request cycle, atomically superseding the previous one.
    fn schedule(&self, debounced: bool) {
        let inner = &self.inner;
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut current = inner.current.lock().expect("request handle mutex poisoned");
        if let Some(previous) = current.take() {
            previous.abort();
        }

        // The superseded cycle settles before the new one starts.
        let phase = *inner.phase_tx.borrow();
        if !phase.is_settled() && phase != FetchPhase::Idle {
            inner.advance_phase(FetchPhase::Superseded);
        }
        inner.advance_phase(if debounced {
            FetchPhase::Debouncing
        } else {
            FetchPhase::InFlight
        });

        let task = Arc::clone(inner);
        let handle = tokio::spawn(async move {
            if debounced {
                tokio::time::sleep(task.debounce).await;
                if !task.is_current(generation) {
                    return;
                }
                task.advance_phase(FetchPhase::InFlight);
            }
            task.perform(generation).await;
        });
        *current = Some(handle);
    }
}

impl ControllerInner {
    async fn perform(&self, generation: u64) {
        let url = match self.request_url() {
            Ok(url) => url,
            Err(err) => {
                self.settle_failure(generation, err.to_string());
                return;
            }
        };

        // Cache hit short-circuits the network entirely.
        if let Some(envelope) = self.cache.get(&url) {
            if self.is_current(generation) {
                self.apply(envelope);
                self.advance_phase(FetchPhase::Resolved);
            }
            return;
        }

        self.store.set_loading(true);
        self.store.set_error(None);

        let result = self.transport.get_workers(&url).await;

        // A newer request was issued while we were waiting: this
        // response is stale and must not touch the store.
        if !self.is_current(generation) {
            debug!(%url, "Discarding stale response");
            return;
        }

        match result {
            Ok(envelope) if envelope.success => {
                self.cache.insert(url, envelope.clone());
                self.apply(envelope);
                self.advance_phase(FetchPhase::Resolved);
            }
            Ok(envelope) => {
                let message = envelope
                    .error
                    .unwrap_or_else(|| "API request failed".to_string());
                self.settle_failure(generation, message);
            }
            Err(err) => {
                self.settle_failure(generation, err.to_string());
            }
        }
    }

    /// Apply a successful envelope to the store. Prior error state is
    /// cleared; results and pagination are replaced.
    fn apply(&self, envelope: WorkersEnvelope) {
        self.store.set_workers(envelope.data.unwrap_or_default());
        if let Some(pagination) = &envelope.pagination {
            self.store.set_pagination(pagination);
        }
        self.store.set_error(None);
        self.store.set_loading(false);
    }

    /// Record a failure: error message set, prior results untouched.
    fn settle_failure(&self, generation: u64, message: String) {
        if !self.is_current(generation) {
            return;
        }
        warn!(error = %message, "Workers fetch failed");
        self.store.set_error(Some(message));
        self.store.set_loading(false);
        self.advance_phase(FetchPhase::Failed);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn advance_phase(&self, to: FetchPhase) {
        let from = *self.phase_tx.borrow();
        if !from.can_transition_to(to) {
            warn!(%from, %to, "Unexpected fetch phase transition");
        }
        let _ = self.phase_tx.send(to);
    }

    /// Build the request URL from the current store state. Parameters at
    /// their defaults are omitted, mirroring what a browser client sends.
    fn request_url(&self) -> Result<String, ClientError> {
        let state = self.store.snapshot();

        let mut params: Vec<(&str, String)> = vec![
            ("page", state.current_page.to_string()),
            ("limit", state.items_per_page.to_string()),
        ];
        if !state.selected_service.eq_ignore_ascii_case("all") {
            params.push(("service", state.selected_service.clone()));
        }
        if state.price_range.min > 0 {
            params.push(("minPrice", state.price_range.min.to_string()));
        }
        if state.price_range.max < DEFAULT_PRICE_CEILING {
            params.push(("maxPrice", state.price_range.max.to_string()));
        }
        if !state.search_query.trim().is_empty() {
            params.push(("search", state.search_query.clone()));
        }

        let url =
            reqwest::Url::parse_with_params(&format!("{}/api/workers", self.base_url), &params)
                .map_err(|e| ClientError::Url(e.to_string()))?;
        Ok(url.to_string())
    }
}
