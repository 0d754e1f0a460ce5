// Graphics adapter record

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicsRecord {
    pub model_name: Option<String>,
    pub vram_total_gb: Option<f64>,
    pub vram_used_gb: Option<f64>,
    pub gpu_clock_mhz: Option<f64>,
    pub memory_clock_mhz: Option<f64>,
    pub current_temp_c: Option<f64>,
    pub fan_speed_pct: Option<f64>,
    pub driver_version: Option<String>,
    pub gpu_utilization_pct: Option<f64>,
    pub pcie_generation: Option<u32>,
    pub pcie_link_width: Option<u32>,
}
