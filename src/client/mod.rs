//! Client layer — session state and server synchronization.
//!
//! Core components:
//! - `store` — single source of truth for filter/pagination/result state
//! - `cache` — TTL response cache keyed by request URL
//! - `transport` — HTTP seam over `reqwest`, stubbable in tests
//! - `fetch` — debounced fetch controller with replace-and-cancel
//!   request semantics

pub mod cache;
pub mod fetch;
pub mod store;
pub mod transport;

pub use cache::ResponseCache;
pub use fetch::{FetchController, FetchPhase};
pub use store::{FilterState, PriceRange, WorkersStore};
pub use transport::{HttpTransport, Transport};
