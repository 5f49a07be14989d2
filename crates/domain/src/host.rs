use crate::errors::DomainError;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// A trimmed, lowercase host name. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostName(Arc<str>);

impl HostName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidHost(raw.to_string()));
        }
        Ok(Self(Arc::from(trimmed.to_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HostName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a successful live resolution.
///
/// `name` is the canonical name reported by the resolver, which may differ
/// from the name that was asked for (aliases). Positive cache entries are
/// keyed on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHost {
    pub name: Arc<str>,
    pub address: IpAddr,
}

impl ResolvedHost {
    pub fn new(name: impl Into<Arc<str>>, address: IpAddr) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}
