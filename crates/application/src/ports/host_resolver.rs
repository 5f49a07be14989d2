use async_trait::async_trait;
use hostcache_domain::{DomainError, HostName, ResolvedHost};

/// Live name → address lookup.
///
/// Implementations report a name that does not exist with
/// [`DomainError::Unresolvable`]; any other error is treated as a failure of
/// the lookup itself and is not negatively cached.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &HostName) -> Result<ResolvedHost, DomainError>;
}
