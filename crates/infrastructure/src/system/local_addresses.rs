use async_trait::async_trait;
use hostcache_application::ports::LocalAddressSource;
use hostcache_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

// TEST-NET-1; connecting a UDP socket sends nothing.
const ROUTE_TARGET: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 9);

/// Addresses of this machine as seen through its host name.
pub struct SystemLocalAddresses {
    timeout: Duration,
}

impl SystemLocalAddresses {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    fn local_hostname() -> String {
        hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "localhost".to_string())
    }
}

#[async_trait]
impl LocalAddressSource for SystemLocalAddresses {
    async fn local_host_addresses(&self) -> Result<Vec<IpAddr>, DomainError> {
        let name = Self::local_hostname();

        let addrs = tokio::time::timeout(
            self.timeout,
            tokio::net::lookup_host((name.as_str(), 0)),
        )
        .await
        .map_err(|_| DomainError::ResolverTimeout { host: name.clone() })?
        .map_err(|e| {
            DomainError::IoError(format!("Failed to resolve local host {}: {}", name, e))
        })?;

        let mut addresses: Vec<IpAddr> = Vec::new();
        for addr in addrs {
            if !addresses.contains(&addr.ip()) {
                addresses.push(addr.ip());
            }
        }

        debug!(
            hostname = %name,
            count = addresses.len(),
            "Enumerated local addresses"
        );
        Ok(addresses)
    }

    /// Source address the kernel would pick for an outbound route.
    async fn default_local_address(&self) -> Option<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await.ok()?;
        socket.connect(ROUTE_TARGET).await.ok()?;
        let ip = socket.local_addr().ok()?.ip();
        (!ip.is_unspecified()).then_some(ip)
    }
}
