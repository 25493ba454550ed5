//! Error types for workfinder.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Dataset loading/parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse dataset {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Client-side fetch errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid request URL: {0}")]
    Url(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error, status {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("API error: {0}")]
    Api(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
