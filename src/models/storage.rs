// Physical drive record

use serde::{Deserialize, Serialize};

/// Drive class inferred from interface, media type, and model keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveKind {
    #[serde(rename = "NVMe SSD")]
    NvmeSsd,
    #[serde(rename = "SATA SSD")]
    SataSsd,
    #[serde(rename = "HDD")]
    Hdd,
}

impl std::fmt::Display for DriveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DriveKind::NvmeSsd => "NVMe SSD",
            DriveKind::SataSsd => "SATA SSD",
            DriveKind::Hdd => "HDD",
        };
        f.write_str(s)
    }
}

/// One physical drive. A scan produces one record per detected drive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRecord {
    pub model: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<DriveKind>,
    pub capacity_gb: Option<f64>,
    pub used_gb: Option<f64>,
    pub free_gb: Option<f64>,
    pub interface: Option<String>,
    pub health_status: Option<String>,
    pub is_boot_drive: bool,
}
