use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Outcome of one rate-gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Denied,
}

#[derive(Debug, Clone)]
struct Window {
    started_at: Instant,
    count: usize,
}

/// Fixed-window limiter keyed by client source.
///
/// Each key gets its own window, anchored at the first request after the
/// previous window expired. Windows reset lazily on the next check; entries
/// are never evicted, so the map is bounded by the set of distinct sources
/// one process sees.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    buckets: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Checks the window for `key` and counts this request against it.
    /// Denied requests do not consume a slot.
    pub async fn check_and_increment(&self, key: &str) -> RateDecision {
        let mut buckets = self.buckets.lock().await;

        let window = buckets.entry(key.to_owned()).or_insert_with(|| Window {
            started_at: Instant::now(),
            count: 0,
        });

        if window.started_at.elapsed() >= self.window {
            window.started_at = Instant::now();
            window.count = 0;
        }

        if window.count >= self.max_requests {
            return RateDecision::Denied;
        }

        window.count += 1;
        RateDecision::Allowed
    }
}
