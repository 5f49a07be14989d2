use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::network::NetworkConfig;
use super::resolver::ResolverConfig;

const LOCAL_CONFIG_PATH: &str = "hostcache.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/hostcache/config.toml";

/// Main configuration structure for hostcache
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Positive/negative cache bounds and no-caching rules
    #[serde(default)]
    pub cache: CacheConfig,

    /// Live resolution settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Public address reporting
    #[serde(default)]
    pub network: NetworkConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. hostcache.toml in current directory
    /// 3. /etc/hostcache/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(timeout) = overrides.resolver_timeout_secs {
            self.resolver.timeout_secs = timeout;
        }
        if let Some(ip) = overrides.static_ip {
            self.network.static_ip = Some(ip);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cache = &self.cache;

        if cache.positive_max_entries == 0 || cache.negative_max_entries == 0 {
            return Err(ConfigError::Validation(
                "Cache max entries must be greater than 0".to_string(),
            ));
        }

        if cache.positive_max_age_secs == 0 || cache.negative_max_age_secs == 0 {
            return Err(ConfigError::Validation(
                "Cache max age must be greater than 0".to_string(),
            ));
        }

        if let Some(index) = cache
            .no_caching_patterns
            .iter()
            .position(|p| p.trim().is_empty())
        {
            return Err(ConfigError::Validation(format!(
                "No-caching pattern #{} is empty",
                index
            )));
        }

        if self.resolver.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Resolver timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub resolver_timeout_secs: Option<u64>,
    pub static_ip: Option<String>,
}
