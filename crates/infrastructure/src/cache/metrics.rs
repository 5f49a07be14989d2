use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// align(64) keeps the lookup counters on their own cache line, away from the
// maintenance counters bumped under the eviction lock.
#[derive(Debug, Default)]
#[repr(align(64))]
pub struct CacheMetrics {
    // Hot counters, updated on every lookup.
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub negative_hits: AtomicU64,
    _hot_pad: [u64; 5],

    // Cold counters, updated on insertion and maintenance.
    pub insertions: AtomicU64,
    pub evictions: AtomicU64,
    pub invariant_violations: AtomicU64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }
}
