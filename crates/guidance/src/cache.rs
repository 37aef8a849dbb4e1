//! Bounded, expiring memo of guidance records keyed by disease name

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use derm_core::GuidanceRecord;
use lru::LruCache;

struct CacheEntry {
    record: GuidanceRecord,
    inserted_at: Instant,
}

/// LRU cache of guidance records with an optional time-to-live.
///
/// Keys are compared exactly (case-sensitive). The lock is never held
/// across an `.await`.
pub struct GuidanceCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    ttl: Option<Duration>,
}

impl GuidanceCache {
    pub fn new(capacity: NonZeroUsize, ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Fetch a live entry, dropping it if it has expired
    pub fn get(&self, disease: &str) -> Option<GuidanceRecord> {
        let mut entries = self.lock();
        let expired = match entries.get(disease) {
            Some(entry) if !self.is_expired(entry) => return Some(entry.record.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(disease);
            tracing::debug!(disease = %disease, "Guidance cache entry expired");
        }
        None
    }

    pub fn insert(&self, disease: String, record: GuidanceRecord) {
        let entry = CacheEntry {
            record,
            inserted_at: Instant::now(),
        };
        if let Some((evicted, _)) = self.lock().push(disease.clone(), entry) {
            if evicted != disease {
                tracing::debug!(disease = %evicted, "Guidance cache entry evicted");
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.lock().cap()
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.ttl
            .is_some_and(|ttl| entry.inserted_at.elapsed() >= ttl)
    }

    // A panic mid-insert cannot leave the map half-written, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
