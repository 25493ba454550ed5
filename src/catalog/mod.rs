//! Worker catalog — the immutable dataset and the pure query engine.
//!
//! Core components:
//! - `model` — the `WorkerRecord` wire type and listability rules
//! - `dataset` — one-shot JSON loading into an immutable in-memory set
//! - `query` — filtering, search, sort, and pagination over the set

pub mod dataset;
pub mod model;
pub mod query;

pub use dataset::Dataset;
pub use model::WorkerRecord;
pub use query::{DEFAULT_LIMIT, DEFAULT_PAGE, PageInfo, PageResult, QueryParams, run_query};
