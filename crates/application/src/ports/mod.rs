mod host_cache_port;
mod host_resolver;
mod local_address_source;
mod no_caching_rules;

pub use host_cache_port::{CacheMetricsSnapshot, HostCachePort};
pub use host_resolver::HostResolver;
pub use local_address_source::LocalAddressSource;
pub use no_caching_rules::NoCachingRules;
