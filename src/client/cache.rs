//! TTL response cache keyed by request URL.
//!
//! Owned by the fetch controller, never a process-wide global. Entries
//! are evicted only when a read finds them expired; there is no
//! background sweep, so memory is bounded by the set of distinct query
//! combinations within a session.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::server::response::WorkersEnvelope;

struct CacheEntry {
    envelope: WorkersEnvelope,
    inserted_at: Instant,
}

pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a cached response. An entry past its TTL is evicted on
    /// this read and counts as a miss.
    pub fn get(&self, url: &str) -> Option<WorkersEnvelope> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(url) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                debug!(url, "Response cache hit");
                Some(entry.envelope.clone())
            }
            Some(_) => {
                debug!(url, "Response cache entry expired");
                entries.remove(url);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, url: String, envelope: WorkersEnvelope) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            url,
            CacheEntry {
                envelope,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
