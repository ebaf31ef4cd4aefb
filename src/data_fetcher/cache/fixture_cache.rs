//! Per-fixture cache with status-dependent TTLs and stale reads

use chrono::{DateTime, Utc};
use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::types::CacheEntry;
use crate::constants::cache_ttl;
use crate::data_fetcher::models::{Fixture, FixtureId};

/// Snapshot of cache contents for monitoring
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub keys: Vec<FixtureId>,
    pub fresh_entries: usize,
    pub stale_entries: usize,
    /// Sum of the serialized JSON size of every cached fixture
    pub approximate_bytes: usize,
    pub average_entry_bytes: usize,
    pub oldest_inserted_at: Option<DateTime<Utc>>,
    pub newest_inserted_at: Option<DateTime<Utc>>,
}

/// Keyed store of fixtures, each with the TTL derived from its status at write time.
///
/// Expired entries stay readable through [`FixtureCache::get_any`] until the
/// sweeper or an invalidation removes them. Once `capacity` is reached the
/// least recently written entry is evicted.
#[derive(Debug)]
pub struct FixtureCache {
    entries: RwLock<LruCache<FixtureId, CacheEntry>>,
}

impl Default for FixtureCache {
    fn default() -> Self {
        Self::new(cache_ttl::MAX_ENTRIES)
    }
}

impl FixtureCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Returns the cached fixture only while its entry is fresh at `now`.
    /// A stale entry is left in place.
    #[instrument(skip(self), fields(fixture_id = %id))]
    pub async fn get_fresh(&self, id: &FixtureId, now: DateTime<Utc>) -> Option<Fixture> {
        let cache = self.entries.read().await;

        match cache.peek(id) {
            Some(entry) if entry.is_fresh(now) => {
                debug!(
                    "Cache hit for fixture {}: age={:?}, expires in {:?}",
                    id,
                    entry.age(now),
                    entry.time_until_expiry(now)
                );
                Some(entry.fixture.clone())
            }
            Some(entry) => {
                debug!(
                    "Cache entry for fixture {} is stale: age={:?}, ttl={:?}",
                    id,
                    entry.age(now),
                    entry.ttl
                );
                None
            }
            None => {
                debug!("Cache miss for fixture {}", id);
                None
            }
        }
    }

    /// Returns the cached fixture regardless of freshness
    pub async fn get_any(&self, id: &FixtureId) -> Option<Fixture> {
        self.entries
            .read()
            .await
            .peek(id)
            .map(|entry| entry.fixture.clone())
    }

    /// Returns a copy of the whole entry, bookkeeping included
    pub async fn get_entry(&self, id: &FixtureId) -> Option<CacheEntry> {
        self.entries.read().await.peek(id).cloned()
    }

    /// Stores `fixture` under `id`, replacing any previous entry whole
    #[instrument(skip(self, fixture), fields(fixture_id = %id))]
    pub async fn put(&self, id: FixtureId, fixture: Fixture, ttl: Duration, now: DateTime<Utc>) {
        let status = fixture.status().clone();
        let entry = CacheEntry::new(fixture, ttl, now);

        let mut cache = self.entries.write().await;
        if let Some((evicted_id, _)) = cache.push(id.clone(), entry)
            && evicted_id != id
        {
            warn!(
                "Fixture cache at capacity ({}), evicted fixture {}",
                cache.cap(),
                evicted_id
            );
        }

        debug!(
            "Cached fixture {}: status={}, ttl={:?}",
            id, status, ttl
        );
    }

    /// Removes one entry; returns whether it existed
    pub async fn invalidate(&self, id: &FixtureId) -> bool {
        let removed = self.entries.write().await.pop(id).is_some();
        if removed {
            info!("Invalidated cached fixture {}", id);
        }
        removed
    }

    /// Removes every entry; returns how many were dropped
    pub async fn invalidate_all(&self) -> usize {
        let mut cache = self.entries.write().await;
        let removed = cache.len();
        cache.clear();
        info!("Cleared fixture cache: {} entries removed", removed);
        removed
    }

    /// Removes every entry that is stale at `now`; fresh entries are untouched
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut cache = self.entries.write().await;

        let expired: Vec<FixtureId> = cache
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(now))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            cache.pop(id);
        }

        if expired.is_empty() {
            debug!("Cache sweep found nothing to remove ({} entries)", cache.len());
        } else {
            info!(
                "Cache sweep removed {} expired entries, {} remain",
                expired.len(),
                cache.len()
            );
        }

        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Read-only snapshot of the cache
    pub async fn stats(&self, now: DateTime<Utc>) -> CacheStats {
        let cache = self.entries.read().await;

        let mut keys = Vec::with_capacity(cache.len());
        let mut fresh_entries = 0;
        let mut approximate_bytes = 0;
        let mut oldest_inserted_at: Option<DateTime<Utc>> = None;
        let mut newest_inserted_at: Option<DateTime<Utc>> = None;

        for (id, entry) in cache.iter() {
            keys.push(id.clone());
            if entry.is_fresh(now) {
                fresh_entries += 1;
            }
            approximate_bytes += serde_json::to_vec(&entry.fixture)
                .map(|bytes| bytes.len())
                .unwrap_or(0);
            oldest_inserted_at = Some(match oldest_inserted_at {
                Some(oldest) => oldest.min(entry.inserted_at),
                None => entry.inserted_at,
            });
            newest_inserted_at = Some(match newest_inserted_at {
                Some(newest) => newest.max(entry.inserted_at),
                None => entry.inserted_at,
            });
        }
        keys.sort();

        let size = cache.len();
        CacheStats {
            size,
            capacity: cache.cap().get(),
            keys,
            fresh_entries,
            stale_entries: size - fresh_entries,
            approximate_bytes,
            average_entry_bytes: if size > 0 { approximate_bytes / size } else { 0 },
            oldest_inserted_at,
            newest_inserted_at,
        }
    }
}
