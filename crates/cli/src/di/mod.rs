use hostcache_application::services::{AddressClassifier, ResolutionFacade};
use hostcache_domain::Config;
use hostcache_infrastructure::cache::{clock, HostCache, NoCachingRegistry};
use hostcache_infrastructure::system::{SystemHostResolver, SystemLocalAddresses};
use std::sync::Arc;
use tracing::info;

pub struct Services {
    pub facade: Arc<ResolutionFacade>,
    pub classifier: Arc<AddressClassifier>,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        clock::init();

        let cache = Arc::new(HostCache::new(&config.cache));
        let no_caching = Arc::new(NoCachingRegistry::new(&config.cache.no_caching_patterns)?);
        let resolver = Arc::new(SystemHostResolver::new(config.resolver.timeout_secs));
        let local = Arc::new(SystemLocalAddresses::new(config.resolver.timeout_secs));

        info!(
            no_caching_patterns = no_caching.pattern_count(),
            resolver_timeout_secs = config.resolver.timeout_secs,
            "Host resolution services ready"
        );

        let facade = Arc::new(ResolutionFacade::new(cache, resolver, no_caching));
        let classifier = Arc::new(
            AddressClassifier::new(Arc::clone(&facade), local)
                .with_static_ip(config.network.static_ip().map(str::to_string))
                .with_port_forwarding_host(
                    config.network.port_forwarding_host().map(str::to_string),
                ),
        );

        Ok(Self { facade, classifier })
    }
}
