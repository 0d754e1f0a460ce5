// Active network connection record

use serde::{Deserialize, Serialize};

/// How the machine is connected. Adapters that are clearly neither WiFi nor
/// wired Ethernet keep their reported adapter type as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "WiFi")]
    Wifi,
    Ethernet,
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionType::Wifi => f.write_str("WiFi"),
            ConnectionType::Ethernet => f.write_str("Ethernet"),
            ConnectionType::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub connection_type: Option<ConnectionType>,
    pub speed_mbps: Option<u64>,
    pub latency_ms: Option<f64>,
}
