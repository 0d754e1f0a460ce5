// Firmware settings record

use serde::{Deserialize, Serialize};

/// Firmware-level switches. These are read-only observations; the scanner
/// never writes to the BIOS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareRecord {
    /// Inferred from effective vs rated memory speed, not read directly.
    pub xmp_enabled: Option<bool>,
    pub resizable_bar: Option<bool>,
    pub tpm_status: Option<String>,
    pub virtualization: Option<bool>,
    pub secure_boot: Option<bool>,
}
