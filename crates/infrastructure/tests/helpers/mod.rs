#![allow(dead_code)]

use async_trait::async_trait;
use hostcache_application::ports::HostResolver;
use hostcache_domain::{CacheConfig, DomainError, HostName, ResolvedHost};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn cache_config(max_entries: usize, max_age_secs: u64) -> CacheConfig {
    CacheConfig {
        positive_max_entries: max_entries,
        positive_max_age_secs: max_age_secs,
        negative_max_entries: max_entries,
        negative_max_age_secs: max_age_secs,
        no_caching_patterns: Vec::new(),
    }
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// Table-driven resolver; names it does not know are unresolvable.
#[derive(Default)]
pub struct StaticResolver {
    table: Mutex<HashMap<String, ResolvedHost>>,
    calls: AtomicUsize,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, host: &str, canonical: &str, address: &str) -> Self {
        self.table
            .lock()
            .unwrap()
            .insert(host.to_string(), ResolvedHost::new(canonical, ip(address)));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn resolve(&self, host: &HostName) -> Result<ResolvedHost, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table
            .lock()
            .unwrap()
            .get(host.as_str())
            .cloned()
            .ok_or_else(|| DomainError::Unresolvable(host.to_string()))
    }
}
