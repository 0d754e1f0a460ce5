// RAM capacity, speeds, topology.

use crate::models::{ChannelMode, MemoryRecord, MemoryTimings};
use crate::parse;
use crate::probes::Probes;
use crate::probes::windows::{CimRow, row_u64};
use crate::resolver::{Field, ProbeError, ProbeResult};
use tracing::instrument;

/// One DIMM as reported by the platform inventory.
#[derive(Debug, Clone, Default)]
pub struct StickReading {
    /// Speed the stick is actually running at (falls back to rated).
    pub configured_mhz: Option<u64>,
    /// Speed printed on the label.
    pub rated_mhz: Option<u64>,
    pub form_factor: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StickAggregate {
    pub num_sticks: u32,
    pub speed_mhz: Option<u64>,
    pub rated_speed_mhz: Option<u64>,
    pub form_factor: Option<String>,
}

/// The slowest configured stick caps the whole channel; the highest rated
/// value best represents what the kit was sold as.
pub fn aggregate_sticks(sticks: &[StickReading]) -> Option<StickAggregate> {
    if sticks.is_empty() {
        return None;
    }
    Some(StickAggregate {
        num_sticks: sticks.len() as u32,
        speed_mhz: sticks
            .iter()
            .filter_map(|s| s.configured_mhz)
            .filter(|v| *v > 0)
            .min(),
        rated_speed_mhz: sticks
            .iter()
            .filter_map(|s| s.rated_mhz)
            .filter(|v| *v > 0)
            .max(),
        form_factor: sticks.iter().find_map(|s| s.form_factor.clone()),
    })
}

/// Populated slots to channel layout. Six sticks is a triple-channel
/// workstation board, not quad; anything else at four or more is quad.
pub fn channel_mode_for_sticks(count: u32) -> Option<ChannelMode> {
    match count {
        0 => None,
        1 => Some(ChannelMode::Single),
        2 => Some(ChannelMode::Dual),
        3 | 6 => Some(ChannelMode::Triple),
        _ => Some(ChannelMode::Quad),
    }
}

/// SMBIOS form factor code to label.
pub fn form_factor_label(code: u64) -> String {
    match code {
        8 => "DIMM".to_string(),
        12 => "SODIMM".to_string(),
        other => format!("code_{other}"),
    }
}

#[instrument(skip(probes))]
pub async fn collect(probes: &Probes) -> MemoryRecord {
    let mut total = Field::new("memory.total_gb");
    let mut used = Field::new("memory.current_used_gb");
    let mut usage_percent = Field::new("memory.usage_percent");
    let mut speed = Field::new("memory.speed_mhz");
    let mut rated_speed = Field::new("memory.rated_speed_mhz");
    let mut num_sticks = Field::new("memory.num_sticks");
    let mut num_slots = Field::new("memory.num_slots");
    let mut form_factor = Field::new("memory.form_factor");

    match probes.sysinfo.memory_overview().await {
        Ok(mem) => {
            total.fill(Some(mem.total_gb));
            used.fill(Some(mem.used_gb));
            usage_percent.fill(Some(mem.usage_percent));
        }
        Err(e) => tracing::debug!(error = %e, "memory overview unavailable"),
    }

    if cfg!(target_os = "windows") {
        match probes
            .cim_rows(
                "Win32_PhysicalMemory",
                &["ConfiguredClockSpeed", "Speed", "Capacity", "FormFactor"],
            )
            .await
        {
            Ok(rows) => {
                let sticks: Vec<StickReading> = rows.iter().map(stick_from_row).collect();
                apply_aggregate(
                    aggregate_sticks(&sticks),
                    &mut num_sticks,
                    &mut speed,
                    &mut rated_speed,
                    &mut form_factor,
                );
            }
            Err(e) => tracing::debug!(error = %e, "Win32_PhysicalMemory query failed"),
        }

        if !num_sticks.is_set() {
            match probes
                .wmic_rows("memorychip", "Capacity,ConfiguredClockSpeed,Speed,FormFactor")
                .await
            {
                Ok(rows) => {
                    let sticks: Vec<StickReading> = rows
                        .iter()
                        .map(|row| {
                            let lookup =
                                |key: &str| row.get(key).and_then(|v| parse::parse_u64_loose(v));
                            StickReading {
                                configured_mhz: lookup("ConfiguredClockSpeed").or_else(|| lookup("Speed")),
                                rated_mhz: lookup("Speed"),
                                form_factor: lookup("FormFactor").map(form_factor_label),
                            }
                        })
                        .collect();
                    apply_aggregate(
                        aggregate_sticks(&sticks),
                        &mut num_sticks,
                        &mut speed,
                        &mut rated_speed,
                        &mut form_factor,
                    );
                }
                Err(e) => tracing::debug!(error = %e, "wmic memorychip query failed"),
            }
        }

        num_slots.fill_with_async("cim-memory-array", slot_count(probes)).await;
        total.fill_with_async("wmic-computersystem", total_from_wmic(probes)).await;
    }

    let channel_mode = num_sticks.get().copied().and_then(channel_mode_for_sticks);

    MemoryRecord {
        total_gb: total.into_option(),
        speed_mhz: speed.into_option(),
        rated_speed_mhz: rated_speed.into_option(),
        num_sticks: num_sticks.into_option(),
        num_slots: num_slots.into_option(),
        channel_mode,
        form_factor: form_factor.into_option(),
        timings: MemoryTimings::default(),
        current_used_gb: used.into_option(),
        usage_percent: usage_percent.into_option(),
    }
}

fn stick_from_row(row: &CimRow) -> StickReading {
    StickReading {
        configured_mhz: row_u64(row, "ConfiguredClockSpeed").or_else(|| row_u64(row, "Speed")),
        rated_mhz: row_u64(row, "Speed"),
        form_factor: row_u64(row, "FormFactor").map(form_factor_label),
    }
}

fn apply_aggregate(
    aggregate: Option<StickAggregate>,
    num_sticks: &mut Field<u32>,
    speed: &mut Field<u64>,
    rated_speed: &mut Field<u64>,
    form_factor: &mut Field<String>,
) {
    let Some(agg) = aggregate else { return };
    num_sticks.fill(Some(agg.num_sticks));
    speed.fill(agg.speed_mhz);
    rated_speed.fill(agg.rated_speed_mhz);
    form_factor.fill(agg.form_factor);
}

async fn slot_count(probes: &Probes) -> ProbeResult<u32> {
    let rows = probes
        .cim_rows("Win32_PhysicalMemoryArray", &["MemoryDevices"])
        .await?;
    let slots: u64 = rows
        .iter()
        .filter_map(|row| row_u64(row, "MemoryDevices"))
        .sum();
    if slots == 0 {
        return Err(ProbeError::Parse("memory array reported zero slots".into()));
    }
    Ok(slots as u32)
}

async fn total_from_wmic(probes: &Probes) -> ProbeResult<f64> {
    let rows = probes
        .wmic_rows("computersystem", "TotalPhysicalMemory")
        .await?;
    rows.first()
        .and_then(|row| row.get("TotalPhysicalMemory"))
        .and_then(|v| parse::parse_u64_loose(v))
        .filter(|bytes| *bytes > 0)
        .map(parse::bytes_to_gb)
        .ok_or_else(|| ProbeError::Parse("no TotalPhysicalMemory value".into()))
}
