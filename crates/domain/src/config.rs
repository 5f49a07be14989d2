pub mod cache;
pub mod errors;
pub mod logging;
pub mod network;
pub mod resolver;
pub mod root;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use network::NetworkConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
