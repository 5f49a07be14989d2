pub mod bounded;
pub mod clock;
pub mod host_cache;
pub mod metrics;
pub mod no_caching;
pub mod score_index;

pub use bounded::{BoundedCache, BoundedCacheConfig};
pub use clock::CacheClock;
pub use host_cache::{HostCache, NegativeCache, PositiveCache};
pub use metrics::CacheMetrics;
pub use no_caching::NoCachingRegistry;
pub use score_index::ScoreIndex;
