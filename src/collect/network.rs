// Active network link classification and latency.

use crate::models::{ConnectionType, NetworkRecord};
use crate::probes::Probes;
use crate::probes::windows::{row_str, row_u64};
use crate::resolver::Field;
use tracing::instrument;

/// Adapter-name tokens. Vendor names count as wired because consumer
/// boards ship Realtek/Intel/Killer onboard Ethernet.
pub const WIFI_MARKERS: &[&str] = &["WI-FI", "WIFI", "WIRELESS", "WLAN", "802.11"];
pub const ETHERNET_MARKERS: &[&str] = &["ETHERNET", "LAN", "REALTEK", "INTEL I", "KILLER"];

/// Kernel interface names are terser than adapter names, so the wired
/// list loosens to prefixes ("ETH" catches eth0).
pub const WIFI_IFACE_MARKERS: &[&str] = &["WI-FI", "WIFI", "WIRELESS", "WLAN"];
pub const ETHERNET_IFACE_MARKERS: &[&str] = &["ETH", "LAN", "REALTEK", "INTEL"];

/// Classify a management-layer adapter by name, then by its 802.3 type.
pub fn classify_adapter(name: &str, adapter_type: &str) -> Option<ConnectionType> {
    let upper = name.to_uppercase();
    if WIFI_MARKERS.iter().any(|m| upper.contains(m)) {
        return Some(ConnectionType::Wifi);
    }
    if ETHERNET_MARKERS.iter().any(|m| upper.contains(m)) {
        return Some(ConnectionType::Ethernet);
    }
    if adapter_type.contains("802.3") {
        return Some(ConnectionType::Ethernet);
    }
    let adapter_type = adapter_type.trim();
    if adapter_type.is_empty() {
        None
    } else {
        Some(ConnectionType::Other(adapter_type.to_string()))
    }
}

pub fn classify_interface(name: &str) -> ConnectionType {
    let upper = name.to_uppercase();
    if WIFI_IFACE_MARKERS.iter().any(|m| upper.contains(m)) {
        ConnectionType::Wifi
    } else if ETHERNET_IFACE_MARKERS.iter().any(|m| upper.contains(m)) {
        ConnectionType::Ethernet
    } else {
        ConnectionType::Other("Connected".to_string())
    }
}

fn is_loopback(name: &str) -> bool {
    name == "lo" || name.to_lowercase().contains("loopback")
}

#[instrument(skip(probes))]
pub async fn collect(probes: &Probes) -> NetworkRecord {
    let mut connection = Field::new("network.connection_type");
    let mut speed = Field::new("network.speed_mbps");
    let mut latency = Field::new("network.latency_ms");

    if cfg!(target_os = "windows") {
        match probes
            .cim_rows(
                "Win32_NetworkAdapter",
                &["Name", "Speed", "AdapterType", "NetConnectionStatus"],
            )
            .await
        {
            Ok(rows) => {
                // Status 2 is "connected"; the first such adapter is the
                // active link.
                let connected = rows
                    .iter()
                    .find(|row| row_u64(row, "NetConnectionStatus") == Some(2));
                if let Some(row) = connected {
                    let name = row_str(row, "Name").unwrap_or_default();
                    let adapter_type = row_str(row, "AdapterType").unwrap_or_default();
                    connection.fill(Some(
                        classify_adapter(&name, &adapter_type)
                            .unwrap_or_else(|| ConnectionType::Other("Wired".to_string())),
                    ));
                    speed.fill(
                        row_u64(row, "Speed")
                            .filter(|bits| *bits > 0)
                            .map(|bits| (bits as f64 / 1_000_000.0).round() as u64),
                    );
                }
            }
            Err(e) => tracing::debug!(error = %e, "network adapter query failed"),
        }
    }

    if !connection.is_set() {
        match probes.sysinfo.interfaces().await {
            Ok(interfaces) => {
                let link = interfaces
                    .iter()
                    .find(|l| !is_loopback(&l.name) && l.speed_mbps.is_some_and(|s| s > 0));
                if let Some(link) = link {
                    connection.fill(Some(classify_interface(&link.name)));
                    speed.fill(link.speed_mbps);
                }
            }
            Err(e) => tracing::debug!(error = %e, "interface enumeration failed"),
        }
    }

    latency.fill_with_async("ping", probes.ping_latency_ms()).await;

    NetworkRecord {
        connection_type: connection.into_option(),
        speed_mbps: speed.into_option(),
        latency_ms: latency.into_option(),
    }
}
