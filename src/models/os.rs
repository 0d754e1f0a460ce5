// Operating system record

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsRecord {
    pub version: Option<String>,
    pub build_number: Option<String>,
    pub power_plan: Option<String>,
    pub game_mode: Option<bool>,
    pub hw_accelerated_gpu_scheduling: Option<bool>,
    pub virtual_memory_gb: Option<f64>,
}
