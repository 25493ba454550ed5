//! Worker record model.

use serde::{Deserialize, Serialize};

/// A single service provider in the catalog.
///
/// Wire format is camelCase to match the public API. `id` is `None` for
/// placeholder rows that must never surface in query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRecord {
    pub id: Option<i64>,
    pub name: String,
    pub service: String,
    pub price_per_day: i64,
    pub image: String,
}

impl WorkerRecord {
    /// A record is listable iff it has a positive price and a non-null id.
    pub fn is_listable(&self) -> bool {
        self.price_per_day > 0 && self.id.is_some()
    }

    /// Case-insensitive service category match.
    pub fn matches_service(&self, service: &str) -> bool {
        self.service.to_lowercase() == service.to_lowercase()
    }

    /// Substring match against name or service. `needle` must already be
    /// lowercased by the caller.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.service.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(id: Option<i64>, name: &str, service: &str, price: i64) -> WorkerRecord {
        WorkerRecord {
            id,
            name: name.to_string(),
            service: service.to_string(),
            price_per_day: price,
            image: format!("/images/{}.jpg", name.to_lowercase().replace(' ', "-")),
        }
    }

    #[test]
    fn listability_requires_positive_price_and_id() {
        assert!(worker(Some(1), "Asha", "Plumbing", 500).is_listable());
        assert!(!worker(Some(2), "Ben", "Plumbing", 0).is_listable());
        assert!(!worker(Some(3), "Cleo", "Plumbing", -50).is_listable());
        assert!(!worker(None, "Dana", "Plumbing", 500).is_listable());
    }

    #[test]
    fn search_matches_name_or_service() {
        let w = worker(Some(1), "Plumber Joe", "Plumbing", 300);
        assert!(w.matches_search("plu"));
        assert!(w.matches_search("joe"));

        let w = worker(Some(2), "Maria", "Plumbing", 300);
        assert!(w.matches_search("plu"), "service should match too");
        assert!(!w.matches_search("electric"));
    }

    #[test]
    fn service_match_ignores_case() {
        let w = worker(Some(1), "Asha", "Electrical", 200);
        assert!(w.matches_service("electrical"));
        assert!(w.matches_service("ELECTRICAL"));
        assert!(!w.matches_service("Plumbing"));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let w = worker(Some(7), "Asha", "Plumbing", 450);
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["pricePerDay"], 450);
        assert_eq!(json["id"], 7);

        let raw = r#"{"id":null,"name":"X","service":"Y","pricePerDay":0,"image":""}"#;
        let parsed: WorkerRecord = serde_json::from_str(raw).unwrap();
        assert!(parsed.id.is_none());
    }
}
