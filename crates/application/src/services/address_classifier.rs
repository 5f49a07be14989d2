use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::ResolutionFacade;
use crate::ports::LocalAddressSource;

const LOCAL_PREFIXES: [&str; 4] = ["127.", "192.168.", "10.", "169.254."];

// 172.16.0.0/12, one literal per second octet.
const PRIVATE_172_PREFIXES: [&str; 16] = [
    "172.16.", "172.17.", "172.18.", "172.19.", "172.20.", "172.21.", "172.22.", "172.23.",
    "172.24.", "172.25.", "172.26.", "172.27.", "172.28.", "172.29.", "172.30.", "172.31.",
];

/// Textual check against loopback, RFC1918 and link-local prefixes.
/// No resolution is performed.
pub fn has_local_prefix(address: &str) -> bool {
    if address == "localhost" {
        return true;
    }
    if LOCAL_PREFIXES.iter().any(|p| address.starts_with(p)) {
        return true;
    }
    address.starts_with("172.") && PRIVATE_172_PREFIXES.iter().any(|p| address.starts_with(p))
}

fn leading_octets(address: &IpAddr) -> (u8, u8) {
    match address {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            (o[0], o[1])
        }
        IpAddr::V6(v6) => {
            let o = v6.octets();
            (o[0], o[1])
        }
    }
}

fn looks_public(address: &IpAddr) -> bool {
    let (b0, b1) = leading_octets(address);
    b0 != 10
        && b0 != 127
        && (b0 != 172 || !(16..=31).contains(&b1))
        && (b0 != 192 || b1 != 168)
        && !address.is_ipv6()
}

fn is_loopback_octet(address: &IpAddr) -> bool {
    leading_octets(address).0 == 127
}

/// Picks the most public-looking address out of those bound to this host.
///
/// Preference: no reserved range and no IPv6, then no loopback and no IPv6,
/// then no IPv6, then whatever comes first.
pub fn select_public_candidate(addresses: &[IpAddr]) -> Option<IpAddr> {
    addresses
        .iter()
        .find(|a| looks_public(a))
        .or_else(|| {
            addresses
                .iter()
                .find(|a| !is_loopback_octet(a) && !a.is_ipv6())
        })
        .or_else(|| addresses.iter().find(|a| !a.is_ipv6()))
        .or_else(|| addresses.first())
        .copied()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Tells local addresses from globally routable ones and finds the address
/// this host most likely presents to the outside.
pub struct AddressClassifier {
    facade: Arc<ResolutionFacade>,
    local_source: Arc<dyn LocalAddressSource>,
    own_addresses: OnceCell<Arc<[IpAddr]>>,
    static_ip: Option<String>,
    port_forwarding_host: Option<String>,
}

impl AddressClassifier {
    pub fn new(facade: Arc<ResolutionFacade>, local_source: Arc<dyn LocalAddressSource>) -> Self {
        Self {
            facade,
            local_source,
            own_addresses: OnceCell::new(),
            static_ip: None,
            port_forwarding_host: None,
        }
    }

    pub fn with_static_ip(mut self, static_ip: Option<String>) -> Self {
        self.static_ip = non_blank(static_ip);
        self
    }

    pub fn with_port_forwarding_host(mut self, host: Option<String>) -> Self {
        self.port_forwarding_host = non_blank(host);
        self
    }

    /// True when `address` is loopback, private, link-local or one of this
    /// host's own addresses.
    ///
    /// Anything that fails the prefix test is resolved through the facade,
    /// which may hit the network on a cache miss.
    pub async fn is_local(&self, address: &str) -> bool {
        if has_local_prefix(address) {
            return true;
        }

        let resolved = match self.facade.resolve(address).await {
            Ok(resolved) => resolved,
            Err(e) => {
                debug!(address = %address, error = %e, "Could not resolve address for locality check");
                None
            }
        };

        let Some(ip) = resolved else {
            return false;
        };

        if ip.is_unspecified() || ip.is_loopback() {
            return true;
        }

        self.own_addresses().await.contains(&ip)
    }

    pub async fn my_public_local_address(&self) -> IpAddr {
        let addresses = self.own_addresses().await;

        match addresses.len() {
            0 => match self.local_source.default_local_address().await {
                Some(address) => address,
                None => IpAddr::V4(Ipv4Addr::LOCALHOST),
            },
            1 => addresses[0],
            _ => select_public_candidate(&addresses).unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        }
    }

    /// In order: the configured static IP, the address of the port
    /// forwarding host, the textual form of [`Self::my_public_local_address`].
    ///
    /// A forwarding host that does not resolve is logged and skipped.
    pub async fn my_public_ip(&self) -> String {
        if let Some(ip) = &self.static_ip {
            return ip.clone();
        }

        if let Some(host) = &self.port_forwarding_host {
            match self.facade.resolve(host).await {
                Ok(Some(address)) => return address.to_string(),
                Ok(None) => {
                    warn!(
                        host = %host,
                        "Port forwarding host is unresolvable, using the local address"
                    );
                }
                Err(e) => {
                    warn!(
                        host = %host,
                        error = %e,
                        "Port forwarding host lookup failed, using the local address"
                    );
                }
            }
        }

        self.my_public_local_address().await.to_string()
    }

    async fn own_addresses(&self) -> Arc<[IpAddr]> {
        self.own_addresses
            .get_or_init(|| async {
                match self.local_source.local_host_addresses().await {
                    Ok(addresses) => {
                        debug!(count = addresses.len(), "Enumerated local host addresses");
                        Arc::from(addresses)
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to enumerate local host addresses");
                        Arc::from(Vec::<IpAddr>::new())
                    }
                }
            })
            .await
            .clone()
    }
}
