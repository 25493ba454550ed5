//! REST endpoints for the worker catalog.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rand::Rng;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

use crate::catalog::dataset::Dataset;
use crate::catalog::query::{DEFAULT_LIMIT, DEFAULT_PAGE, QueryParams, run_query};
use crate::config::LatencyConfig;
use crate::server::response::{EchoedFilters, ServicesEnvelope, WorkersEnvelope};

/// Results are deterministic for identical parameters within the dataset's
/// lifetime, so short public caching is safe.
const CACHE_POLICY: &str = "public, max-age=60";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub latency: LatencyConfig,
}

/// Build the Axum router with catalog REST routes.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/workers", get(list_workers))
        .route("/api/services", get(list_services))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "workfinder"
    }))
}

// ── Workers ─────────────────────────────────────────────────────────────

/// Raw query parameters as they arrive on the wire. Everything is an
/// optional string: malformed numerics silently coerce to defaults and
/// are never surfaced as errors.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWorkerQuery {
    page: Option<String>,
    limit: Option<String>,
    service: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
    search: Option<String>,
}

impl RawWorkerQuery {
    fn into_params(self) -> QueryParams {
        QueryParams {
            page: parse_or(self.page, DEFAULT_PAGE),
            limit: parse_or(self.limit, DEFAULT_LIMIT),
            service: self.service,
            min_price: self.min_price.and_then(|s| s.trim().parse().ok()),
            max_price: self.max_price.and_then(|s| s.trim().parse().ok()),
            search: self.search,
        }
        .normalized()
    }
}

fn parse_or(raw: Option<String>, default: usize) -> usize {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

/// GET /api/workers
///
/// Filter, search, sort, and paginate the catalog. Always answers with an
/// envelope: `success:true` with data and pagination, or `success:false`
/// with an error string if the query task dies.
async fn list_workers(
    State(state): State<AppState>,
    Query(raw): Query<RawWorkerQuery>,
) -> Response {
    simulate_latency(&state.latency).await;

    let params = raw.into_params();
    let dataset = Arc::clone(&state.dataset);
    let query = params.clone();
    let joined = tokio::task::spawn_blocking(move || run_query(dataset.records(), &query)).await;

    match joined {
        Ok(result) => {
            debug!(
                page = params.page,
                total = result.page.total_items,
                service = params.service.as_deref().unwrap_or("all"),
                "Workers query served"
            );
            let envelope = WorkersEnvelope::ok(result.items, result.page, EchoedFilters::from(&params));
            (
                [(header::CACHE_CONTROL, CACHE_POLICY)],
                Json(envelope),
            )
                .into_response()
        }
        Err(err) => {
            error!(error = %err, "Workers query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WorkersEnvelope::err("Failed to fetch workers data")),
            )
                .into_response()
        }
    }
}

// ── Services ────────────────────────────────────────────────────────────

/// GET /api/services
///
/// Distinct service categories, for populating the filter dropdown.
async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    Json(ServicesEnvelope::ok(state.dataset.services()))
}

// ── Simulated latency ───────────────────────────────────────────────────

/// Sleep a uniformly random duration within the configured window.
async fn simulate_latency(cfg: &LatencyConfig) {
    if !cfg.enabled {
        return;
    }
    let lo = cfg.min_ms.min(cfg.max_ms);
    let hi = cfg.min_ms.max(cfg.max_ms);
    let ms = if lo == hi {
        lo
    } else {
        rand::thread_rng().gen_range(lo..=hi)
    };
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
