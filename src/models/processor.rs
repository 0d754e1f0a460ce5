// Processor record

use serde::{Deserialize, Serialize};

/// One CPU as resolved across providers. Absent fields stay `None` and
/// serialize as explicit nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorRecord {
    pub model_name: Option<String>,
    pub architecture: Option<String>,
    pub physical_cores: Option<u32>,
    pub logical_cores: Option<u32>,
    pub base_clock_ghz: Option<f64>,
    pub max_boost_clock_ghz: Option<f64>,
    pub current_clock_ghz: Option<f64>,
    pub cache_l1_bytes: Option<u64>,
    pub cache_l2_bytes: Option<u64>,
    pub cache_l3_bytes: Option<u64>,
    pub current_temp_c: Option<f64>,
    /// Per-core utilization in core order; empty when no provider reported it.
    pub usage_per_core: Vec<f64>,
    pub power_draw_w: Option<f64>,
}
