// Mainboard / BIOS identity record

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainboardRecord {
    /// Manufacturer and product joined with a space.
    pub model: Option<String>,
    pub chipset: Option<String>,
    pub bios_version: Option<String>,
    /// ISO date (yyyy-mm-dd) when the firmware reports one.
    pub bios_date: Option<String>,
}
