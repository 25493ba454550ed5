//! HTTP transport seam for the client layer.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::server::response::{ServicesEnvelope, WorkersEnvelope};

/// Abstraction over the network so the fetch controller can be exercised
/// against a stub in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_workers(&self, url: &str) -> Result<WorkersEnvelope, ClientError>;

    async fn get_services(&self, url: &str) -> Result<ServicesEnvelope, ClientError>;
}

/// Real transport backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_workers(&self, url: &str) -> Result<WorkersEnvelope, ClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get_services(&self, url: &str) -> Result<ServicesEnvelope, ClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
