//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub address: String,
    /// Bind port.
    pub port: u16,
    /// Path to the worker dataset JSON file.
    pub data_path: PathBuf,
    /// Simulated latency applied to the workers endpoint.
    pub latency: LatencyConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 8080,
            data_path: PathBuf::from("./data/workers.json"),
            latency: LatencyConfig::default(),
        }
    }
}

/// Simulated network latency for the workers endpoint.
///
/// Emulates realistic loading conditions for front ends developed
/// against a local server. Disabled in tests.
#[derive(Debug, Clone, Copy)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_ms: 100,
            max_ms: 300,
        }
    }
}

impl LatencyConfig {
    /// A latency config that sleeps not at all.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_ms: 0,
            max_ms: 0,
        }
    }

    /// Parse the `WORKFINDER_LATENCY_MS` value: `"off"` or `"0"` disables,
    /// `"250"` is a fixed delay, `"100-300"` a uniform range.
    pub fn from_env_value(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("off") || raw == "0" {
            return Ok(Self::disabled());
        }

        let invalid = |message: &str| ConfigError::InvalidValue {
            key: "WORKFINDER_LATENCY_MS".to_string(),
            message: message.to_string(),
        };

        match raw.split_once('-') {
            Some((min, max)) => {
                let min_ms: u64 = min
                    .trim()
                    .parse()
                    .map_err(|_| invalid("range bounds must be integers"))?;
                let max_ms: u64 = max
                    .trim()
                    .parse()
                    .map_err(|_| invalid("range bounds must be integers"))?;
                if min_ms > max_ms {
                    return Err(invalid("range minimum exceeds maximum"));
                }
                Ok(Self {
                    enabled: true,
                    min_ms,
                    max_ms,
                })
            }
            None => {
                let ms: u64 = raw
                    .parse()
                    .map_err(|_| invalid("expected milliseconds or a min-max range"))?;
                Ok(Self {
                    enabled: true,
                    min_ms: ms,
                    max_ms: ms,
                })
            }
        }
    }
}

/// Client-side fetch configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the workfinder server.
    pub base_url: String,
    /// Idle period after the last filter change before a request is issued.
    pub debounce: Duration,
    /// Time-to-live for cached responses.
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            debounce: Duration::from_millis(300),
            cache_ttl: Duration::from_secs(5 * 60),
        }
    }
}
