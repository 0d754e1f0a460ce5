// CPU identity, topology, clocks, caches, thermals, power.

use crate::models::ProcessorRecord;
use crate::parse;
use crate::probes::windows::{row_f64, row_str, row_u64};
use crate::probes::{Probes, platform};
use crate::resolver::{Field, ProbeError, ProbeResult};
use tracing::instrument;

/// Sensor labels that identify a CPU temperature source.
pub const CPU_TEMP_MARKERS: &[&str] = &["coretemp", "k10temp", "cpu_thermal", "acpitz"];

/// Hardware-monitor bridges that expose a CPU package power sensor when
/// their host application is running.
const HWMON_NAMESPACES: &[&str] = &[r"root\OpenHardwareMonitor", r"root\LibreHardwareMonitor"];

#[instrument(skip(probes))]
pub async fn collect(probes: &Probes) -> ProcessorRecord {
    let mut model = Field::new("processor.model_name");
    let mut physical_cores = Field::new("processor.physical_cores");
    let mut logical_cores = Field::new("processor.logical_cores");
    let mut base_clock = Field::new("processor.base_clock_ghz");
    let mut boost_clock = Field::new("processor.max_boost_clock_ghz");
    let mut current_clock = Field::new("processor.current_clock_ghz");
    let mut cache_l1 = Field::new("processor.cache_l1_bytes");
    let mut cache_l2 = Field::new("processor.cache_l2_bytes");
    let mut cache_l3 = Field::new("processor.cache_l3_bytes");
    let mut temperature = Field::new("processor.current_temp_c");
    let mut power_draw = Field::new("processor.power_draw_w");
    let mut usage_per_core = Vec::new();

    match probes.sysinfo.cpu_overview().await {
        Ok(cpu) => {
            model.fill(cpu.model);
            physical_cores.fill(cpu.physical_cores);
            logical_cores.fill(cpu.logical_cores);
            current_clock.fill(cpu.current_clock_ghz);
            usage_per_core = cpu.usage_per_core;
        }
        Err(e) => tracing::debug!(error = %e, "cpu overview unavailable"),
    }

    // Brand strings usually carry the advertised base clock.
    base_clock.fill_with("brand-string", || {
        model
            .get()
            .and_then(|m| parse::clock_ghz_from_brand(m))
            .ok_or_else(|| ProbeError::Ambiguous("no GHz token in brand string".into()))
    });

    // Linux exposes boost clock and cache geometry through sysfs.
    boost_clock.fill(platform::cpu_max_clock_ghz());
    cache_l1.fill(l1_cache_bytes());
    cache_l2.fill(platform::cpu_cache_bytes(2));
    cache_l3.fill(platform::cpu_cache_bytes(3));

    if cfg!(target_os = "windows") {
        if !(model.is_set() && base_clock.is_set() && cache_l2.is_set() && cache_l3.is_set()) {
            match probes
                .cim_rows(
                    "Win32_Processor",
                    &["Name", "MaxClockSpeed", "L2CacheSize", "L3CacheSize"],
                )
                .await
            {
                Ok(rows) => {
                    if let Some(row) = rows.first() {
                        model.fill(row_str(row, "Name").map(|s| s.trim().to_string()));
                        let max_ghz = row_u64(row, "MaxClockSpeed")
                            .filter(|mhz| *mhz > 0)
                            .map(|mhz| parse::round2(mhz as f64 / 1000.0));
                        base_clock.fill(max_ghz);
                        boost_clock.fill(max_ghz);
                        cache_l2.fill(row_u64(row, "L2CacheSize").filter(|kb| *kb > 0).map(|kb| kb * 1024));
                        cache_l3.fill(row_u64(row, "L3CacheSize").filter(|kb| *kb > 0).map(|kb| kb * 1024));
                    }
                }
                Err(e) => tracing::debug!(error = %e, "Win32_Processor query failed"),
            }
        }

        if !model.is_set() {
            match probes
                .wmic_rows(
                    "cpu",
                    "Name,MaxClockSpeed,NumberOfCores,NumberOfLogicalProcessors,L2CacheSize,L3CacheSize",
                )
                .await
            {
                Ok(rows) => {
                    if let Some(row) = rows.first() {
                        model.fill(row.get("Name").cloned().filter(|s| !s.is_empty()));
                        physical_cores.fill(
                            row.get("NumberOfCores")
                                .and_then(|v| parse::parse_u64_loose(v))
                                .map(|n| n as u32),
                        );
                        logical_cores.fill(
                            row.get("NumberOfLogicalProcessors")
                                .and_then(|v| parse::parse_u64_loose(v))
                                .map(|n| n as u32),
                        );
                        base_clock.fill(
                            row.get("MaxClockSpeed")
                                .and_then(|v| parse::parse_u64_loose(v))
                                .filter(|mhz| *mhz > 0)
                                .map(|mhz| parse::round2(mhz as f64 / 1000.0)),
                        );
                    }
                }
                Err(e) => tracing::debug!(error = %e, "wmic cpu query failed"),
            }
        }
    }

    temperature
        .fill_with_async("sysinfo-components", probes.sysinfo.component_temp(CPU_TEMP_MARKERS))
        .await;
    if cfg!(target_os = "windows") {
        temperature
            .fill_with_async("msacpi-thermal-zone", thermal_zone_temp(probes))
            .await;
        for namespace in HWMON_NAMESPACES {
            power_draw
                .fill_with_async(namespace, hwmon_cpu_power(probes, namespace))
                .await;
        }
    }

    ProcessorRecord {
        model_name: model.into_option(),
        architecture: Some(std::env::consts::ARCH.to_string()),
        physical_cores: physical_cores.into_option(),
        logical_cores: logical_cores.into_option(),
        base_clock_ghz: base_clock.into_option(),
        max_boost_clock_ghz: boost_clock.into_option(),
        current_clock_ghz: current_clock.into_option(),
        cache_l1_bytes: cache_l1.into_option(),
        cache_l2_bytes: cache_l2.into_option(),
        cache_l3_bytes: cache_l3.into_option(),
        current_temp_c: temperature.into_option(),
        usage_per_core,
        power_draw_w: power_draw.into_option(),
    }
}

/// L1 is reported per concern (data, instruction); the record carries the sum.
fn l1_cache_bytes() -> Option<u64> {
    match (platform::cpu_cache_bytes(0), platform::cpu_cache_bytes(1)) {
        (None, None) => None,
        (data, inst) => Some(data.unwrap_or(0) + inst.unwrap_or(0)),
    }
}

/// ACPI thermal zone, reported in tenths of a Kelvin. Zones outside a
/// plausible CPU range (firmware placeholders report 0) are skipped.
async fn thermal_zone_temp(probes: &Probes) -> ProbeResult<f64> {
    let rows = probes
        .cim_rows_in(r"root\wmi", "MSAcpi_ThermalZoneTemperature", &["CurrentTemperature"])
        .await?;
    rows.iter()
        .filter_map(|row| row_f64(row, "CurrentTemperature"))
        .find_map(parse::kelvin_tenths_to_celsius)
        .ok_or_else(|| ProbeError::Parse("no thermal zone in plausible range".into()))
}

async fn hwmon_cpu_power(probes: &Probes, namespace: &str) -> ProbeResult<f64> {
    let rows = probes
        .cim_rows_in(namespace, "Sensor", &["SensorType", "Name", "Value"])
        .await?;
    rows.iter()
        .find(|row| {
            row_str(row, "SensorType").as_deref() == Some("Power")
                && row_str(row, "Name").is_some_and(|n| n.contains("CPU"))
        })
        .and_then(|row| row_f64(row, "Value"))
        .map(parse::round1)
        .ok_or_else(|| ProbeError::Unavailable("no CPU power sensor exposed".into()))
}
