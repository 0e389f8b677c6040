use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use folio_cms::ContentAggregator;
use folio_core::PortfolioSnapshot;

struct CacheSlot {
    snapshot: PortfolioSnapshot,
    fetched_at: Instant,
}

/// TTL cache in front of the content aggregator.
///
/// The slot lock is held across a refresh, so concurrent misses coalesce
/// into a single upstream pass. A refresh that fell back to the canned
/// snapshot still caches for the full TTL.
pub struct SnapshotCache {
    aggregator: ContentAggregator,
    ttl: Duration,
    slot: Mutex<Option<CacheSlot>>,
}

impl SnapshotCache {
    #[must_use]
    pub fn new(aggregator: ContentAggregator, ttl: Duration) -> Self {
        Self {
            aggregator,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached snapshot, refreshing when the slot is empty or
    /// stale. Never fails; a refresh against a down source yields the
    /// fallback snapshot.
    pub async fn get_or_refresh(&self) -> PortfolioSnapshot {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                return cached.snapshot.clone();
            }
        }

        let snapshot = self.aggregator.fetch_snapshot().await;
        *slot = Some(CacheSlot {
            snapshot: snapshot.clone(),
            fetched_at: Instant::now(),
        });
        snapshot
    }

    /// Drops the cached snapshot so the next read refetches.
    pub async fn invalidate(&self) {
        *self.slot.lock().await = None;
    }

    /// Whether an unexpired snapshot is currently cached.
    pub async fn is_warm(&self) -> bool {
        self.slot
            .lock()
            .await
            .as_ref()
            .is_some_and(|cached| cached.fetched_at.elapsed() < self.ttl)
    }
}
