mod helpers;

use helpers::{cache_config, ip, StaticResolver};
use hostcache_application::ports::HostCachePort;
use hostcache_application::services::ResolutionFacade;
use hostcache_domain::DomainError;
use hostcache_infrastructure::cache::{CacheClock, HostCache, NoCachingRegistry};
use std::sync::Arc;

struct Stack {
    cache: Arc<HostCache>,
    resolver: Arc<StaticResolver>,
    facade: Arc<ResolutionFacade>,
}

fn stack(resolver: StaticResolver, patterns: &[&str], clock: CacheClock) -> Stack {
    let cache = Arc::new(HostCache::with_clock(&cache_config(3, 600), clock));
    let resolver = Arc::new(resolver);
    let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
    let registry = Arc::new(NoCachingRegistry::new(&patterns).unwrap());
    let facade = Arc::new(ResolutionFacade::new(
        cache.clone(),
        resolver.clone(),
        registry,
    ));
    Stack {
        cache,
        resolver,
        facade,
    }
}

#[tokio::test]
async fn test_end_to_end_positive_and_negative() {
    let s = stack(
        StaticResolver::new().with("example.com", "example.com", "93.184.216.34"),
        &[],
        CacheClock::manual(0),
    );

    assert_eq!(
        s.facade.resolve("Example.com").await.unwrap(),
        Some(ip("93.184.216.34"))
    );
    assert_eq!(s.facade.resolve("missing.example").await.unwrap(), None);

    assert_eq!(
        s.facade.resolve_cached_only("example.com").unwrap(),
        ip("93.184.216.34")
    );
    assert!(matches!(
        s.facade.resolve_cached_only("missing.example"),
        Err(DomainError::KnownUnresolvable(_))
    ));

    s.facade.resolve("example.com").await.unwrap();
    s.facade.resolve("missing.example").await.unwrap();
    assert_eq!(s.resolver.calls(), 2);

    let stats = s.facade.stats();
    assert_eq!(stats.positive_entries, 1);
    assert_eq!(stats.negative_entries, 1);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.negative_hits, 2);
    assert_eq!(stats.misses, 4);
    assert!((stats.hit_rate - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.invariant_violations, 0);
}

#[tokio::test]
async fn test_excluded_alias_target_not_cached() {
    let s = stack(
        StaticResolver::new().with("portal.example", "portal.corp.example", "10.0.0.8"),
        &[r".*\.corp\.example"],
        CacheClock::manual(0),
    );

    s.facade.resolve("portal.example").await.unwrap();
    s.facade.resolve("portal.example").await.unwrap();

    assert_eq!(s.resolver.calls(), 2);
    assert_eq!(s.facade.positive_cache_size(), 0);
    assert_eq!(s.facade.excluded_host_count(), 1);
}

#[tokio::test]
async fn test_expired_entries_resolved_again_after_flush() {
    let clock = CacheClock::manual(0);
    let s = stack(
        StaticResolver::new().with("example.com", "example.com", "93.184.216.34"),
        &[],
        clock.clone(),
    );

    s.facade.resolve("example.com").await.unwrap();
    clock.advance(601);
    s.facade.flush();

    s.facade.resolve("example.com").await.unwrap();
    assert_eq!(s.resolver.calls(), 2);
}

#[tokio::test]
async fn test_positive_side_bounded_through_facade() {
    let mut resolver = StaticResolver::new();
    for i in 0..10 {
        let host = format!("h{i}.example");
        resolver = resolver.with(&host, &host, &format!("198.51.100.{}", i + 1));
    }
    let s = stack(resolver, &[], CacheClock::manual(0));

    for i in 0..10 {
        s.facade.resolve(&format!("h{i}.example")).await.unwrap();
        assert!(s.facade.positive_cache_size() <= 3);
    }
    assert_eq!(s.cache.positive().indexed_len(), 3);
}

#[tokio::test]
async fn test_concurrent_resolves_share_cache() {
    let s = stack(
        StaticResolver::new().with("example.com", "example.com", "93.184.216.34"),
        &[],
        CacheClock::manual(0),
    );

    let mut handles = Vec::new();
    for _ in 0..16 {
        let facade = Arc::clone(&s.facade);
        handles.push(tokio::spawn(async move {
            facade.resolve("example.com").await.unwrap()
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Some(ip("93.184.216.34")));
    }

    // concurrent misses may each resolve, but the cache holds one entry
    assert!(s.resolver.calls() >= 1);
    assert_eq!(s.facade.positive_cache_size(), 1);
    assert!(!s.cache.contains_negative("example.com"));
}
