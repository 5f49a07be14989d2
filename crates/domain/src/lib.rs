//! Hostcache Domain Layer
pub mod config;
pub mod errors;
pub mod host;

pub use config::{
    CacheConfig, CliOverrides, Config, ConfigError, LoggingConfig, NetworkConfig, ResolverConfig,
};
pub use errors::DomainError;
pub use host::{HostName, ResolvedHost};
