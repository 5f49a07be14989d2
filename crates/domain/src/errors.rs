use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid host name: {0:?}")]
    InvalidHost(String),

    #[error("Host not in cache: {0}")]
    NotInCache(String),

    #[error("Host is known to be unresolvable: {0}")]
    KnownUnresolvable(String),

    #[error("Host could not be resolved: {0}")]
    Unresolvable(String),

    #[error("Resolution of {host} timed out")]
    ResolverTimeout { host: String },

    #[error("Score index is empty")]
    EmptyIndex,

    #[error("Invalid no-caching pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True for outcomes that mean "this name does not resolve", as opposed
    /// to failures of the lookup machinery itself.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::Unresolvable(_) | DomainError::KnownUnresolvable(_)
        )
    }
}
