use std::net::IpAddr;

/// Snapshot of host cache counters for dashboards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheMetricsSnapshot {
    pub positive_entries: usize,
    pub negative_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub negative_hits: u64,
    pub insertions: u64,
    pub evictions: u64,
    /// Eviction passes stopped because the age index and the map disagreed.
    pub invariant_violations: u64,
    /// Positive hits as a percentage of positive lookups.
    pub hit_rate: f64,
}

/// Positive and negative host cache as seen by the resolution facade.
///
/// Keys are already normalized host names.
pub trait HostCachePort: Send + Sync {
    fn get_positive(&self, host: &str) -> Option<IpAddr>;

    /// Stores a resolved address and drops any negative entry for `host`.
    fn put_positive(&self, host: &str, address: IpAddr);

    fn remove_positive(&self, host: &str) -> bool;

    fn contains_negative(&self, host: &str) -> bool;

    /// Records `host` as unresolvable and drops any positive entry for it.
    fn put_negative(&self, host: &str);

    fn remove_negative(&self, host: &str) -> bool;

    /// Runs the size/age eviction pass on both sides.
    fn flush(&self);

    fn clear(&self);

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot;
}
