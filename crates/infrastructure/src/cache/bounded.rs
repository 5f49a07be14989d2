use super::clock::CacheClock;
use super::metrics::CacheMetrics;
use super::score_index::ScoreIndex;
use compact_str::CompactString;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedCacheConfig {
    pub max_entries: usize,
    pub max_age_secs: u64,
}

/// One side of the host cache: a concurrent map whose entries are aged by a
/// [`ScoreIndex`] holding their insertion time.
///
/// Lookups go straight to the map. Every mutation of the map happens while
/// the `ages` lock is held, which makes "evict, then insert" atomic with
/// respect to other writers of the same side.
pub struct BoundedCache<V> {
    name: &'static str,
    map: DashMap<CompactString, V, FxBuildHasher>,
    ages: Mutex<ScoreIndex>,
    max_entries: usize,
    max_age_secs: u64,
    clock: CacheClock,
    metrics: Arc<CacheMetrics>,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(
        name: &'static str,
        config: BoundedCacheConfig,
        clock: CacheClock,
        metrics: Arc<CacheMetrics>,
    ) -> Self {
        Self {
            name,
            map: DashMap::with_capacity_and_hasher(config.max_entries.min(65536), FxBuildHasher),
            ages: Mutex::new(ScoreIndex::new()),
            max_entries: config.max_entries,
            max_age_secs: config.max_age_secs,
            clock,
            metrics,
        }
    }

    /// Plain lookup. Does not refresh the entry's age.
    pub fn get(&self, key: &str) -> Option<V> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Evicts what is over capacity or too old, then stores `value` aged
    /// "now". Room for a new key is made before it is inserted, so the side
    /// never holds more than `max_entries`.
    pub fn put(&self, key: &str, value: V) {
        let mut ages = self.lock_ages();
        let reserve = usize::from(!ages.contains(key));
        self.evict_locked(&mut ages, reserve);

        let now = self.clock.now_secs();
        self.map.insert(CompactString::from(key), value);
        ages.set_score(key, now);
        self.metrics
            .insertions
            .fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub fn remove(&self, key: &str) -> bool {
        let mut ages = self.lock_ages();
        ages.delete_score(key);
        self.map.remove(key).is_some()
    }

    /// Runs the eviction pass. Returns how many entries were dropped.
    pub fn flush(&self) -> usize {
        let mut ages = self.lock_ages();
        self.evict_locked(&mut ages, 0)
    }

    pub fn clear(&self) {
        let mut ages = self.lock_ages();
        ages.clear();
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of keys in the age index. Equal to `len()` unless the side is
    /// inconsistent.
    pub fn indexed_len(&self) -> usize {
        self.lock_ages().size()
    }

    fn lock_ages(&self) -> MutexGuard<'_, ScoreIndex> {
        self.ages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn evict_locked(&self, ages: &mut ScoreIndex, reserve: usize) -> usize {
        let cutoff = self.clock.now_secs().checked_sub(self.max_age_secs);
        let mut evicted = 0usize;

        loop {
            let over_capacity = ages.size() + reserve > self.max_entries;
            let too_old = match (cutoff, ages.min_score()) {
                (Some(cutoff), Ok(oldest)) => oldest < cutoff,
                _ => false,
            };
            if !over_capacity && !too_old {
                break;
            }

            let Ok(key) = ages.min_key() else {
                break;
            };
            ages.delete_score(&key);

            if self.map.remove(key.as_str()).is_none() {
                self.metrics
                    .invariant_violations
                    .fetch_add(1, AtomicOrdering::Relaxed);
                warn!(
                    cache = self.name,
                    key = %key,
                    "Age index referenced a key missing from the cache, stopping eviction"
                );
                break;
            }
            evicted += 1;
        }

        if evicted > 0 {
            self.metrics
                .evictions
                .fetch_add(evicted as u64, AtomicOrdering::Relaxed);
            debug!(
                cache = self.name,
                evicted,
                remaining = ages.size(),
                "Evicted cache entries"
            );
        }
        evicted
    }
}
