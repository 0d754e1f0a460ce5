// GPU identity and telemetry. nvidia-smi answers everything when present;
// the management-layer fallbacks only know name, VRAM, and driver.

use crate::models::GraphicsRecord;
use crate::parse;
use crate::probes::Probes;
use crate::probes::windows::{row_str, row_u64};
use crate::resolver::Field;
use tracing::instrument;

/// Vendor and family tokens that mark a controller as discrete.
pub const DISCRETE_GPU_MARKERS: &[&str] =
    &["NVIDIA", "AMD", "RADEON", "GEFORCE", "RTX", "GTX", "RX "];

/// Sensor labels that identify a GPU temperature source.
pub const GPU_TEMP_MARKERS: &[&str] = &["amdgpu", "nouveau", "gpu"];

#[instrument(skip(probes))]
pub async fn collect(probes: &Probes) -> GraphicsRecord {
    let mut model = Field::new("graphics.model_name");
    let mut vram_total = Field::new("graphics.vram_total_gb");
    let mut vram_used = Field::new("graphics.vram_used_gb");
    let mut gpu_clock = Field::new("graphics.gpu_clock_mhz");
    let mut memory_clock = Field::new("graphics.memory_clock_mhz");
    let mut temperature = Field::new("graphics.current_temp_c");
    let mut fan_speed = Field::new("graphics.fan_speed_pct");
    let mut driver = Field::new("graphics.driver_version");
    let mut utilization = Field::new("graphics.gpu_utilization_pct");
    let mut pcie_generation = Field::new("graphics.pcie_generation");
    let mut pcie_link_width = Field::new("graphics.pcie_link_width");

    match probes.nvidia_query_gpu().await {
        Ok(smi) => {
            model.fill(smi.name);
            vram_total.fill(smi.memory_total_mib.map(parse::mb_to_gb));
            vram_used.fill(smi.memory_used_mib.map(parse::mb_to_gb));
            gpu_clock.fill(smi.graphics_clock_mhz);
            memory_clock.fill(smi.memory_clock_mhz);
            temperature.fill(smi.temperature_c);
            fan_speed.fill(smi.fan_speed_pct);
            driver.fill(smi.driver_version);
            utilization.fill(smi.utilization_pct);
            pcie_generation.fill(smi.pcie_gen);
            pcie_link_width.fill(smi.pcie_width);
        }
        Err(e) => tracing::debug!(error = %e, "nvidia-smi query unavailable"),
    }

    if cfg!(target_os = "windows") && !model.is_set() {
        match probes
            .cim_rows("Win32_VideoController", &["Name", "AdapterRAM", "DriverVersion"])
            .await
        {
            Ok(rows) => {
                // Prefer a discrete controller over the integrated one.
                let chosen = rows
                    .iter()
                    .find(|row| {
                        row_str(row, "Name").is_some_and(|name| {
                            let upper = name.to_uppercase();
                            DISCRETE_GPU_MARKERS.iter().any(|m| upper.contains(m))
                        })
                    })
                    .or_else(|| rows.first());
                if let Some(row) = chosen {
                    model.fill(row_str(row, "Name").map(|s| s.trim().to_string()));
                    vram_total.fill(
                        row_u64(row, "AdapterRAM")
                            .filter(|bytes| *bytes > 0)
                            .map(parse::bytes_to_gb),
                    );
                    driver.fill(row_str(row, "DriverVersion"));
                }
            }
            Err(e) => tracing::debug!(error = %e, "Win32_VideoController query failed"),
        }
    }

    if cfg!(target_os = "windows") && !model.is_set() {
        match probes
            .wmic_rows("path win32_videocontroller", "Name,AdapterRAM,DriverVersion")
            .await
        {
            Ok(rows) => {
                if let Some(row) = rows.first() {
                    model.fill(row.get("Name").cloned().filter(|s| !s.is_empty()));
                    vram_total.fill(
                        row.get("AdapterRAM")
                            .and_then(|v| parse::parse_u64_loose(v))
                            .filter(|bytes| *bytes > 0)
                            .map(parse::bytes_to_gb),
                    );
                    driver.fill(row.get("DriverVersion").cloned().filter(|s| !s.is_empty()));
                }
            }
            Err(e) => tracing::debug!(error = %e, "wmic videocontroller query failed"),
        }
    }

    temperature
        .fill_with_async("sysinfo-components", probes.sysinfo.component_temp(GPU_TEMP_MARKERS))
        .await;

    GraphicsRecord {
        model_name: model.into_option(),
        vram_total_gb: vram_total.into_option(),
        vram_used_gb: vram_used.into_option(),
        gpu_clock_mhz: gpu_clock.into_option(),
        memory_clock_mhz: memory_clock.into_option(),
        current_temp_c: temperature.into_option(),
        fan_speed_pct: fan_speed.into_option(),
        driver_version: driver.into_option(),
        gpu_utilization_pct: utilization.into_option(),
        pcie_generation: pcie_generation.into_option(),
        pcie_link_width: pcie_link_width.into_option(),
    }
}
