use super::bounded::{BoundedCache, BoundedCacheConfig};
use super::clock::CacheClock;
use super::metrics::CacheMetrics;
use hostcache_application::ports::{CacheMetricsSnapshot, HostCachePort};
use hostcache_domain::CacheConfig;
use std::net::IpAddr;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

pub type PositiveCache = BoundedCache<IpAddr>;
pub type NegativeCache = BoundedCache<()>;

/// Positive and negative host caches sharing one clock and one set of
/// counters.
///
/// Each side has its own maintenance lock. Writes that touch both sides
/// (`put_positive`, `put_negative`, `clear`) also hold `cross_side`, so a
/// host is never left on both sides by racing writers. Lock order is
/// `cross_side`, then a side lock.
pub struct HostCache {
    positive: PositiveCache,
    negative: NegativeCache,
    cross_side: Mutex<()>,
    metrics: Arc<CacheMetrics>,
}

impl HostCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_clock(config, CacheClock::Process)
    }

    pub fn with_clock(config: &CacheConfig, clock: CacheClock) -> Self {
        let metrics = Arc::new(CacheMetrics::default());

        info!(
            positive_max_entries = config.positive_max_entries,
            negative_max_entries = config.negative_max_entries,
            positive_max_age_secs = config.positive_max_age_secs,
            negative_max_age_secs = config.negative_max_age_secs,
            "Initializing host cache"
        );

        Self {
            positive: BoundedCache::new(
                "positive",
                BoundedCacheConfig {
                    max_entries: config.positive_max_entries,
                    max_age_secs: config.positive_max_age_secs,
                },
                clock.clone(),
                Arc::clone(&metrics),
            ),
            negative: BoundedCache::new(
                "negative",
                BoundedCacheConfig {
                    max_entries: config.negative_max_entries,
                    max_age_secs: config.negative_max_age_secs,
                },
                clock,
                Arc::clone(&metrics),
            ),
            cross_side: Mutex::new(()),
            metrics,
        }
    }

    pub fn positive(&self) -> &PositiveCache {
        &self.positive
    }

    pub fn negative(&self) -> &NegativeCache {
        &self.negative
    }

    pub fn metrics(&self) -> &Arc<CacheMetrics> {
        &self.metrics
    }

    fn lock_cross_side(&self) -> MutexGuard<'_, ()> {
        self.cross_side.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostCachePort for HostCache {
    fn get_positive(&self, host: &str) -> Option<IpAddr> {
        let address = self.positive.get(host);
        let counter = if address.is_some() {
            &self.metrics.hits
        } else {
            &self.metrics.misses
        };
        counter.fetch_add(1, AtomicOrdering::Relaxed);
        address
    }

    fn put_positive(&self, host: &str, address: IpAddr) {
        let _cross = self.lock_cross_side();
        self.negative.remove(host);
        self.positive.put(host, address);
    }

    fn remove_positive(&self, host: &str) -> bool {
        self.positive.remove(host)
    }

    fn contains_negative(&self, host: &str) -> bool {
        let known = self.negative.contains(host);
        if known {
            self.metrics
                .negative_hits
                .fetch_add(1, AtomicOrdering::Relaxed);
        }
        known
    }

    fn put_negative(&self, host: &str) {
        let _cross = self.lock_cross_side();
        self.positive.remove(host);
        self.negative.put(host, ());
    }

    fn remove_negative(&self, host: &str) -> bool {
        self.negative.remove(host)
    }

    fn flush(&self) {
        let positive = self.positive.flush();
        let negative = self.negative.flush();
        if positive + negative > 0 {
            debug!(positive, negative, "Host cache flushed");
        }
    }

    fn clear(&self) {
        let _cross = self.lock_cross_side();
        self.positive.clear();
        self.negative.clear();
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            positive_entries: self.positive.len(),
            negative_entries: self.negative.len(),
            hits: self.metrics.hits.load(AtomicOrdering::Relaxed),
            misses: self.metrics.misses.load(AtomicOrdering::Relaxed),
            negative_hits: self.metrics.negative_hits.load(AtomicOrdering::Relaxed),
            insertions: self.metrics.insertions.load(AtomicOrdering::Relaxed),
            evictions: self.metrics.evictions.load(AtomicOrdering::Relaxed),
            invariant_violations: self
                .metrics
                .invariant_violations
                .load(AtomicOrdering::Relaxed),
            hit_rate: self.metrics.hit_rate(),
        }
    }
}
