//! Short-lived per-tenant cache of Society records.
//!
//! Each read otherwise rebuilds everything from a fresh CSV fetch; the one
//! exception is the Society record, which pages look up constantly and
//! which changes rarely. Entries are keyed by lowercased society id and
//! expire after a few minutes; the reader populates on miss (read-through)
//! and a hit skips the network entirely.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::Society;

/// Consider a cached society stale after 5 minutes.
const SOCIETY_CACHE_TTL_SECS: i64 = 300;

#[derive(Debug, Clone)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_seconds(&self) -> i64 {
        (Utc::now() - self.cached_at).num_seconds()
    }

    pub fn is_stale(&self) -> bool {
        self.age_seconds() > SOCIETY_CACHE_TTL_SECS
    }
}

#[derive(Default)]
pub struct SocietyCache {
    entries: Mutex<HashMap<String, CachedData<Society>>>,
}

impl SocietyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh cached record for this society, if any. Stale entries are
    /// evicted on the way out.
    pub fn get(&self, society_id: &str) -> Option<Society> {
        let key = society_id.trim().to_lowercase();
        let mut entries = self.entries.lock().ok()?;
        match entries.get(&key) {
            Some(cached) if !cached.is_stale() => {
                debug!(society_id = %key, "Society cache hit");
                Some(cached.data.clone())
            }
            Some(_) => {
                debug!(society_id = %key, "Society cache entry stale");
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, society: &Society) {
        let key = society.society_id.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, CachedData::new(society.clone()));
        }
    }

    pub fn invalidate(&self, society_id: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(&society_id.trim().to_lowercase());
        }
    }
}
