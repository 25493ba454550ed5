//! Dataset loading — a flat JSON array read once at startup.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;

use crate::catalog::model::WorkerRecord;
use crate::error::CatalogError;

/// The full worker dataset, immutable for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<WorkerRecord>,
}

impl Dataset {
    /// Load the dataset from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let records: Vec<WorkerRecord> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        info!(
            path = %path.display(),
            total = records.len(),
            listable = records.iter().filter(|w| w.is_listable()).count(),
            "Dataset loaded"
        );

        Ok(Self { records })
    }

    /// Build a dataset from in-memory records (tests, embedded data).
    pub fn from_records(records: Vec<WorkerRecord>) -> Self {
        Self { records }
    }

    /// All records, including non-listable placeholder rows.
    pub fn records(&self) -> &[WorkerRecord] {
        &self.records
    }

    /// Distinct service categories among listable records, deduplicated
    /// case-insensitively (first-seen casing wins) and sorted.
    pub fn services(&self) -> Vec<String> {
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        for record in self.records.iter().filter(|w| w.is_listable()) {
            seen.entry(record.service.to_lowercase())
                .or_insert_with(|| record.service.clone());
        }
        seen.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
