// Memory record

use serde::{Deserialize, Serialize};

/// Channel configuration inferred from stick count (1 single, 2 dual,
/// 3 or 6 triple, otherwise >= 4 quad). Heuristic only: odd populations
/// beyond these shapes are reported as the nearest class, not corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelMode {
    Single,
    Dual,
    Triple,
    Quad,
}

impl ChannelMode {
    /// Capitalized label for console output.
    pub fn label(&self) -> &'static str {
        match self {
            ChannelMode::Single => "Single",
            ChannelMode::Dual => "Dual",
            ChannelMode::Triple => "Triple",
            ChannelMode::Quad => "Quad",
        }
    }
}

/// DRAM timings. No generally-available provider resolves these (vendor
/// tools only), so they usually serialize as nulls; the shape is kept so
/// consumers see the same schema either way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryTimings {
    pub cl: Option<u32>,
    pub trcd: Option<u32>,
    pub trp: Option<u32>,
    pub tras: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    pub total_gb: Option<f64>,
    /// Effective speed: minimum configured clock across sticks (the slowest
    /// stick caps the channel).
    pub speed_mhz: Option<u64>,
    /// Rated speed: maximum rated clock across sticks.
    pub rated_speed_mhz: Option<u64>,
    pub num_sticks: Option<u32>,
    pub num_slots: Option<u32>,
    pub channel_mode: Option<ChannelMode>,
    pub form_factor: Option<String>,
    pub timings: MemoryTimings,
    pub current_used_gb: Option<f64>,
    pub usage_percent: Option<f64>,
}
