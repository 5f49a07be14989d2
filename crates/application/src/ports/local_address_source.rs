use async_trait::async_trait;
use hostcache_domain::DomainError;
use std::net::IpAddr;

#[async_trait]
pub trait LocalAddressSource: Send + Sync {
    /// Every address the local host name resolves to.
    async fn local_host_addresses(&self) -> Result<Vec<IpAddr>, DomainError>;

    /// The platform's notion of "the" local address, if it has one.
    async fn default_local_address(&self) -> Option<IpAddr>;
}
