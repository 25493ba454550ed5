//! HTTP surface for the worker catalog.

pub mod response;
pub mod routes;

pub use routes::{AppState, api_routes};
