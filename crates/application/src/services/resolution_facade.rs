use hostcache_domain::{DomainError, HostName, ResolvedHost};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::ports::{CacheMetricsSnapshot, HostCachePort, HostResolver, NoCachingRules};

/// Counters exposed to operational dashboards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostCacheStats {
    pub positive_entries: usize,
    pub negative_entries: usize,
    pub excluded_hosts: usize,
    pub hits: u64,
    pub misses: u64,
    pub negative_hits: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub invariant_violations: u64,
    pub hit_rate: f64,
}

impl HostCacheStats {
    fn from_parts(metrics: CacheMetricsSnapshot, excluded_hosts: usize) -> Self {
        Self {
            positive_entries: metrics.positive_entries,
            negative_entries: metrics.negative_entries,
            excluded_hosts,
            hits: metrics.hits,
            misses: metrics.misses,
            negative_hits: metrics.negative_hits,
            insertions: metrics.insertions,
            evictions: metrics.evictions,
            invariant_violations: metrics.invariant_violations,
            hit_rate: metrics.hit_rate,
        }
    }
}

/// Entry point for host name resolution backed by the positive and negative
/// caches.
///
/// The live lookup is awaited without holding any cache lock, so a slow
/// resolver only delays its own caller.
pub struct ResolutionFacade {
    cache: Arc<dyn HostCachePort>,
    resolver: Arc<dyn HostResolver>,
    no_caching: Arc<dyn NoCachingRules>,
}

impl ResolutionFacade {
    pub fn new(
        cache: Arc<dyn HostCachePort>,
        resolver: Arc<dyn HostResolver>,
        no_caching: Arc<dyn NoCachingRules>,
    ) -> Self {
        Self {
            cache,
            resolver,
            no_caching,
        }
    }

    /// Answers from the caches only.
    ///
    /// A negative hit fails with [`DomainError::KnownUnresolvable`]; a host
    /// that neither side knows fails with [`DomainError::NotInCache`].
    pub fn resolve_cached_only(&self, host: &str) -> Result<IpAddr, DomainError> {
        let host = HostName::parse(host)?;

        if let Some(address) = self.cache.get_positive(host.as_str()) {
            return Ok(address);
        }
        if self.cache.contains_negative(host.as_str()) {
            return Err(DomainError::KnownUnresolvable(host.to_string()));
        }
        Err(DomainError::NotInCache(host.to_string()))
    }

    /// Resolves `host`, consulting the caches first.
    ///
    /// Returns `Ok(None)` when the host does not resolve. Only an invalid
    /// host name or a failure of the lookup machinery (timeout, I/O) is an
    /// error.
    #[instrument(skip(self))]
    pub async fn resolve(&self, host: &str) -> Result<Option<IpAddr>, DomainError> {
        let host = HostName::parse(host)?;

        if let Some(address) = self.cache.get_positive(host.as_str()) {
            return Ok(Some(address));
        }
        if self.cache.contains_negative(host.as_str()) {
            return Ok(None);
        }

        match self.resolver.resolve(&host).await {
            Ok(resolved) => {
                self.record_success(&host, &resolved);
                Ok(Some(resolved.address))
            }
            Err(e) if e.is_not_found() => {
                debug!(host = %host, "Host unresolvable, caching negative result");
                self.cache.put_negative(host.as_str());
                Ok(None)
            }
            Err(e) => {
                warn!(host = %host, error = %e, "Live resolution failed");
                Err(e)
            }
        }
    }

    /// Drops `host` from both caches.
    pub fn invalidate(&self, host: &str) -> Result<bool, DomainError> {
        let host = HostName::parse(host)?;
        let positive = self.cache.remove_positive(host.as_str());
        let negative = self.cache.remove_negative(host.as_str());
        Ok(positive || negative)
    }

    pub fn flush(&self) {
        self.cache.flush();
    }

    pub fn stats(&self) -> HostCacheStats {
        HostCacheStats::from_parts(
            self.cache.metrics_snapshot(),
            self.no_caching.excluded_count(),
        )
    }

    pub fn positive_cache_size(&self) -> usize {
        self.cache.metrics_snapshot().positive_entries
    }

    pub fn negative_cache_size(&self) -> usize {
        self.cache.metrics_snapshot().negative_entries
    }

    pub fn excluded_host_count(&self) -> usize {
        self.no_caching.excluded_count()
    }

    pub fn shutdown(&self) {
        let stats = self.stats();
        self.cache.clear();
        info!(
            positive_entries = stats.positive_entries,
            negative_entries = stats.negative_entries,
            excluded_hosts = stats.excluded_hosts,
            "Host cache shut down"
        );
    }

    fn record_success(&self, requested: &HostName, resolved: &ResolvedHost) {
        self.cache.remove_negative(requested.as_str());

        let key = match HostName::parse(&resolved.name) {
            Ok(name) => name,
            Err(_) => requested.clone(),
        };

        if resolved.address.is_loopback() {
            debug!(host = %key, address = %resolved.address, "Not caching loopback address");
            return;
        }

        if self.no_caching.is_excluded(key.as_str()) {
            debug!(host = %key, "Host excluded from caching");
            return;
        }

        self.cache.put_positive(key.as_str(), resolved.address);
        debug!(
            requested = %requested,
            host = %key,
            address = %resolved.address,
            "Cached resolved host"
        );
    }
}
