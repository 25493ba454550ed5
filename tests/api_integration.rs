//! Integration tests for the catalog REST endpoints.
//!
//! Each test spins up an Axum server on a random port and exercises the
//! real HTTP contract with reqwest, asserting on the raw JSON wire
//! format rather than internal types.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::time::timeout;

use workfinder::catalog::{Dataset, WorkerRecord};
use workfinder::config::LatencyConfig;
use workfinder::server::{AppState, api_routes};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

fn worker(id: Option<i64>, name: &str, service: &str, price: i64) -> WorkerRecord {
    WorkerRecord {
        id,
        name: name.to_string(),
        service: service.to_string(),
        price_per_day: price,
        image: format!("/images/{}.jpg", name.to_lowercase().replace(' ', "-")),
    }
}

/// Four listable workers plus two rows that must never surface.
fn test_records() -> Vec<WorkerRecord> {
    vec![
        worker(Some(1), "Alice Johnson", "Plumbing", 500),
        worker(Some(2), "Bob Placeholder", "Plumbing", 0),
        worker(Some(3), "Carol Smith", "Electrical", 300),
        worker(Some(4), "Dave Miller", "plumbing", 250),
        worker(None, "Eve Ghost", "Roofing", 400),
        worker(Some(6), "Plumber Joe", "Handyman", 200),
    ]
}

/// Start a server on a random port with latency disabled, return its base URL.
async fn start_server(records: Vec<WorkerRecord>) -> String {
    let state = AppState {
        dataset: Arc::new(Dataset::from_records(records)),
        latency: LatencyConfig::disabled(),
    };
    let app = api_routes(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

async fn get_json(url: &str) -> Value {
    reqwest::get(url).await.unwrap().json().await.unwrap()
}

fn names(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn default_page_is_sorted_and_excludes_unlistable() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!("{base}/api/workers")).await;

        assert_eq!(body["success"], true);
        assert_eq!(
            names(&body),
            vec!["Alice Johnson", "Carol Smith", "Dave Miller", "Plumber Joe"]
        );
        assert_eq!(body["pagination"]["totalItems"], 4);
        assert_eq!(body["pagination"]["totalPages"], 1);
        assert_eq!(body["pagination"]["currentPage"], 1);
        assert_eq!(body["pagination"]["itemsPerPage"], 12);
        assert!(body["timestamp"].is_string());
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn responses_allow_short_public_caching() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let response = reqwest::get(format!("{base}/api/workers")).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["cache-control"].to_str().unwrap(),
            "public, max-age=60"
        );
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn junk_numeric_params_coerce_to_defaults() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!(
            "{base}/api/workers?page=abc&limit=zero&minPrice=ten"
        ))
        .await;

        assert_eq!(body["success"], true);
        assert_eq!(body["pagination"]["currentPage"], 1);
        assert_eq!(body["pagination"]["itemsPerPage"], 12);
        assert_eq!(body["pagination"]["totalItems"], 4, "junk minPrice is ignored");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn zero_page_clamps_to_first() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!("{base}/api/workers?page=0")).await;

        assert_eq!(body["pagination"]["currentPage"], 1);
        assert_eq!(names(&body).len(), 4);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn service_filter_matches_case_insensitively() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!("{base}/api/workers?service=PLUMBING")).await;

        assert_eq!(names(&body), vec!["Alice Johnson", "Dave Miller"]);
        assert_eq!(body["filters"]["service"], "PLUMBING");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn service_all_means_no_filter() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!("{base}/api/workers?service=all")).await;

        assert_eq!(body["pagination"]["totalItems"], 4);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn price_bounds_are_inclusive() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!(
            "{base}/api/workers?minPrice=250&maxPrice=300"
        ))
        .await;

        assert_eq!(names(&body), vec!["Carol Smith", "Dave Miller"]);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn search_matches_name_or_service() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!("{base}/api/workers?search=plu")).await;

        // Two by service category, one by name.
        assert_eq!(
            names(&body),
            vec!["Alice Johnson", "Dave Miller", "Plumber Joe"]
        );
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn empty_search_is_treated_as_absent() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!("{base}/api/workers?search=")).await;

        assert_eq!(body["pagination"]["totalItems"], 4);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn second_page_of_two_items_at_limit_one() {
    timeout(TEST_TIMEOUT, async {
        let records = vec![
            worker(Some(1), "Alice Johnson", "Plumbing", 500),
            worker(Some(3), "Carol Smith", "Electrical", 300),
        ];
        let base = start_server(records).await;
        let body = get_json(&format!("{base}/api/workers?limit=1&page=2")).await;

        assert_eq!(names(&body), vec!["Carol Smith"]);
        assert_eq!(body["pagination"]["hasNextPage"], false);
        assert_eq!(body["pagination"]["hasPrevPage"], true);
        assert_eq!(body["pagination"]["totalPages"], 2);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn out_of_range_page_returns_empty_not_error() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!("{base}/api/workers?page=99")).await;

        assert_eq!(body["success"], true);
        assert_eq!(names(&body).len(), 0);
        assert_eq!(body["pagination"]["totalItems"], 4);
        assert_eq!(body["pagination"]["hasNextPage"], false);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn services_endpoint_lists_distinct_sorted_categories() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(test_records()).await;
        let body = get_json(&format!("{base}/api/services")).await;

        assert_eq!(body["success"], true);
        // Deduplicated case-insensitively, first-seen casing, sorted;
        // unlistable rows contribute nothing.
        assert_eq!(
            body["data"],
            serde_json::json!(["Electrical", "Handyman", "Plumbing"])
        );
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn health_reports_ok() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(vec![]).await;
        let body = get_json(&format!("{base}/health")).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "workfinder");
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn empty_dataset_yields_zero_pages() {
    timeout(TEST_TIMEOUT, async {
        let base = start_server(vec![]).await;
        let body = get_json(&format!("{base}/api/workers")).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["pagination"]["totalItems"], 0);
        assert_eq!(body["pagination"]["totalPages"], 0);
        assert_eq!(body["pagination"]["hasNextPage"], false);
    })
    .await
    .unwrap();
}
