//! Response envelopes — the wire contract shared by the endpoint and the
//! client layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::model::WorkerRecord;
use crate::catalog::query::{PageInfo, QueryParams};

/// Filters echoed back to the caller, post-normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoedFilters {
    pub service: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub search: Option<String>,
}

impl From<&QueryParams> for EchoedFilters {
    fn from(params: &QueryParams) -> Self {
        Self {
            service: params.service.clone(),
            min_price: params.min_price,
            max_price: params.max_price,
            search: params.search.clone(),
        }
    }
}

/// Success/failure envelope for the workers collection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkersEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<WorkerRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<EchoedFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl WorkersEnvelope {
    pub fn ok(items: Vec<WorkerRecord>, page: PageInfo, filters: EchoedFilters) -> Self {
        Self {
            success: true,
            data: Some(items),
            pagination: Some(page),
            filters: Some(filters),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            pagination: None,
            filters: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
        }
    }
}

/// Envelope for the auxiliary service-categories endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicesEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ServicesEnvelope {
    pub fn ok(services: Vec<String>) -> Self {
        Self {
            success: true,
            data: Some(services),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
        }
    }
}
