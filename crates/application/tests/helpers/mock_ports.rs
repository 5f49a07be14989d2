#![allow(dead_code)]

use async_trait::async_trait;
use hostcache_application::ports::{
    CacheMetricsSnapshot, HostCachePort, HostResolver, LocalAddressSource, NoCachingRules,
};
use hostcache_domain::{DomainError, HostName, ResolvedHost};
use std::collections::{HashMap, HashSet};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockHostResolver {
    responses: Arc<Mutex<HashMap<String, Result<ResolvedHost, DomainError>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockHostResolver {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_address(&self, host: &str, address: &str) {
        self.set_canonical(host, host, address);
    }

    /// `host` resolves to `address` under the canonical name `canonical`.
    pub fn set_canonical(&self, host: &str, canonical: &str, address: &str) {
        let resolved = ResolvedHost::new(canonical, address.parse::<IpAddr>().unwrap());
        self.responses
            .lock()
            .unwrap()
            .insert(host.to_string(), Ok(resolved));
    }

    pub fn set_error(&self, host: &str, error: DomainError) {
        self.responses
            .lock()
            .unwrap()
            .insert(host.to_string(), Err(error));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockHostResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostResolver for MockHostResolver {
    async fn resolve(&self, host: &HostName) -> Result<ResolvedHost, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .get(host.as_str())
            .cloned()
            .unwrap_or_else(|| Err(DomainError::Unresolvable(host.to_string())))
    }
}

/// Unbounded in-memory cache with the same cross-side invariants as the real one.
#[derive(Default)]
pub struct MockHostCache {
    positive: Mutex<HashMap<String, IpAddr>>,
    negative: Mutex<HashSet<String>>,
    flushes: AtomicUsize,
}

impl MockHostCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positive_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.positive.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl HostCachePort for MockHostCache {
    fn get_positive(&self, host: &str) -> Option<IpAddr> {
        self.positive.lock().unwrap().get(host).copied()
    }

    fn put_positive(&self, host: &str, address: IpAddr) {
        self.positive
            .lock()
            .unwrap()
            .insert(host.to_string(), address);
        self.negative.lock().unwrap().remove(host);
    }

    fn remove_positive(&self, host: &str) -> bool {
        self.positive.lock().unwrap().remove(host).is_some()
    }

    fn contains_negative(&self, host: &str) -> bool {
        self.negative.lock().unwrap().contains(host)
    }

    fn put_negative(&self, host: &str) {
        self.negative.lock().unwrap().insert(host.to_string());
        self.positive.lock().unwrap().remove(host);
    }

    fn remove_negative(&self, host: &str) -> bool {
        self.negative.lock().unwrap().remove(host)
    }

    fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.positive.lock().unwrap().clear();
        self.negative.lock().unwrap().clear();
    }

    fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            positive_entries: self.positive.lock().unwrap().len(),
            negative_entries: self.negative.lock().unwrap().len(),
            ..Default::default()
        }
    }
}

/// Excludes names listed exactly; remembers the ones it excluded.
#[derive(Default)]
pub struct MockNoCachingRules {
    excluded: Mutex<HashSet<String>>,
    seen: Mutex<HashSet<String>>,
}

impl MockNoCachingRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(&self, name: &str) {
        self.excluded.lock().unwrap().insert(name.to_string());
    }
}

impl NoCachingRules for MockNoCachingRules {
    fn is_excluded(&self, resolved_name: &str) -> bool {
        if self.excluded.lock().unwrap().contains(resolved_name) {
            self.seen.lock().unwrap().insert(resolved_name.to_string());
            return true;
        }
        false
    }

    fn excluded_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

pub struct MockLocalAddresses {
    addresses: Result<Vec<IpAddr>, DomainError>,
    default_address: Option<IpAddr>,
    enumerations: AtomicUsize,
}

impl MockLocalAddresses {
    pub fn new(addresses: &[&str]) -> Self {
        Self {
            addresses: Ok(addresses.iter().map(|a| a.parse().unwrap()).collect()),
            default_address: None,
            enumerations: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            addresses: Err(DomainError::IoError("no hostname".to_string())),
            default_address: None,
            enumerations: AtomicUsize::new(0),
        }
    }

    pub fn with_default(mut self, address: &str) -> Self {
        self.default_address = Some(address.parse().unwrap());
        self
    }

    pub fn enumerations(&self) -> usize {
        self.enumerations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocalAddressSource for MockLocalAddresses {
    async fn local_host_addresses(&self) -> Result<Vec<IpAddr>, DomainError> {
        self.enumerations.fetch_add(1, Ordering::SeqCst);
        self.addresses.clone()
    }

    async fn default_local_address(&self) -> Option<IpAddr> {
        self.default_address
    }
}
