use async_trait::async_trait;
use dns_lookup::{AddrInfo, AddrInfoHints, LookupError};
use hostcache_application::ports::HostResolver;
use hostcache_domain::{DomainError, HostName, ResolvedHost};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Resolves names through the operating system's `getaddrinfo`, asking for
/// the canonical name so aliases are reported under their target.
///
/// IP literals are reverse-resolved for their name; when that fails the
/// literal itself is the name. Lookups run on the blocking pool, bounded by
/// the configured timeout.
pub struct SystemHostResolver {
    timeout: Duration,
}

impl SystemHostResolver {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// IPv4 first, then whatever the OS listed first.
    fn pick_address(addrs: impl Iterator<Item = SocketAddr>) -> Option<IpAddr> {
        let mut first = None;
        for addr in addrs {
            let ip = addr.ip();
            if ip.is_ipv4() {
                return Some(ip);
            }
            first.get_or_insert(ip);
        }
        first
    }

    fn canonical_or_requested(reported: Option<String>, requested: &str) -> String {
        reported
            .map(|name| name.trim_end_matches('.').to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| requested.to_string())
    }

    fn lookup_canonical(host: &str) -> Result<(Option<String>, Vec<SocketAddr>), LookupError> {
        let hints = AddrInfoHints {
            flags: libc::AI_CANONNAME,
            socktype: libc::SOCK_STREAM,
            ..AddrInfoHints::default()
        };

        let mut canonical = None;
        let mut addrs = Vec::new();
        for info in dns_lookup::getaddrinfo(Some(host), None, Some(hints))? {
            let AddrInfo {
                canonname,
                sockaddr,
                ..
            } = match info {
                Ok(info) => info,
                Err(_) => continue,
            };
            if canonical.is_none() {
                canonical = canonname;
            }
            addrs.push(sockaddr);
        }
        Ok((canonical, addrs))
    }

    async fn run_blocking<T, F>(&self, host: &HostName, lookup: F) -> Result<T, DomainError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::time::timeout(self.timeout, tokio::task::spawn_blocking(lookup))
            .await
            .map_err(|_| DomainError::ResolverTimeout {
                host: host.to_string(),
            })?
            .map_err(|e| {
                DomainError::IoError(format!("Lookup task for {} failed: {}", host, e))
            })
    }

    async fn reverse(&self, host: &HostName, ip: IpAddr) -> ResolvedHost {
        let name = match self
            .run_blocking(host, move || dns_lookup::lookup_addr(&ip))
            .await
        {
            Ok(Ok(name)) => Self::canonical_or_requested(Some(name), host.as_str()),
            Ok(Err(e)) => {
                debug!(address = %ip, error = %e, "Reverse lookup failed");
                host.to_string()
            }
            Err(e) => {
                debug!(address = %ip, error = %e, "Reverse lookup did not complete");
                host.to_string()
            }
        };
        ResolvedHost::new(name, ip)
    }
}

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn resolve(&self, host: &HostName) -> Result<ResolvedHost, DomainError> {
        if let Ok(ip) = host.as_str().parse::<IpAddr>() {
            return Ok(self.reverse(host, ip).await);
        }

        let name = host.to_string();
        let (canonical, addrs) = self
            .run_blocking(host, move || Self::lookup_canonical(&name))
            .await?
            .map_err(|e| {
                debug!(host = %host, error = ?e, "System lookup failed");
                DomainError::Unresolvable(host.to_string())
            })?;

        let address = Self::pick_address(addrs.into_iter())
            .ok_or_else(|| DomainError::Unresolvable(host.to_string()))?;
        let canonical = Self::canonical_or_requested(canonical, host.as_str());

        debug!(
            host = %host,
            canonical = %canonical,
            address = %address,
            "System lookup succeeded"
        );
        Ok(ResolvedHost::new(canonical, address))
    }
}
