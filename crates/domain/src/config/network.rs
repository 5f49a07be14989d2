use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Address reported as this host's public IP instead of scanning the
    /// local interfaces.
    #[serde(default)]
    pub static_ip: Option<String>,

    /// Host that forwards traffic to this machine. When set, its address is
    /// reported as the public IP.
    #[serde(default)]
    pub port_forwarding_host: Option<String>,
}

impl NetworkConfig {
    pub fn static_ip(&self) -> Option<&str> {
        non_blank(self.static_ip.as_deref())
    }

    pub fn port_forwarding_host(&self) -> Option<&str> {
        non_blank(self.port_forwarding_host.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
