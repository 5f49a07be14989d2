use serde::{Deserialize, Serialize};

/// Bounds for the two sides of the host cache and the no-caching rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_entries")]
    pub positive_max_entries: usize,

    #[serde(default = "default_max_age_secs")]
    pub positive_max_age_secs: u64,

    #[serde(default = "default_max_entries")]
    pub negative_max_entries: usize,

    #[serde(default = "default_max_age_secs")]
    pub negative_max_age_secs: u64,

    /// Regular expressions matched against the whole resolved host name.
    /// A match keeps the host out of the positive cache.
    #[serde(default)]
    pub no_caching_patterns: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            positive_max_entries: default_max_entries(),
            positive_max_age_secs: default_max_age_secs(),
            negative_max_entries: default_max_entries(),
            negative_max_age_secs: default_max_age_secs(),
            no_caching_patterns: Vec::new(),
        }
    }
}

fn default_max_entries() -> usize {
    3000
}

fn default_max_age_secs() -> u64 {
    24 * 60 * 60
}
