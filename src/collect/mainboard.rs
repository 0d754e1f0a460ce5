// Board identity and firmware version.

use crate::models::MainboardRecord;
use crate::parse;
use crate::probes::windows::row_str;
use crate::probes::{Probes, platform};
use crate::resolver::{Field, ProbeError, ProbeResult};
use tracing::instrument;

#[instrument(skip(probes))]
pub async fn collect(probes: &Probes) -> MainboardRecord {
    let mut model = Field::new("mainboard.model");
    let mut chipset = Field::new("mainboard.chipset");
    let mut bios_version = Field::new("mainboard.bios_version");
    let mut bios_date = Field::new("mainboard.bios_date");

    if cfg!(target_os = "windows") {
        match probes
            .cim_rows("Win32_BaseBoard", &["Manufacturer", "Product"])
            .await
        {
            Ok(rows) => {
                if let Some(row) = rows.first() {
                    model.fill(joined_label(
                        row_str(row, "Manufacturer"),
                        row_str(row, "Product"),
                    ));
                }
            }
            Err(e) => tracing::debug!(error = %e, "Win32_BaseBoard query failed"),
        }

        match probes
            .cim_rows("Win32_BIOS", &["SMBIOSBIOSVersion", "Version", "ReleaseDate"])
            .await
        {
            Ok(rows) => {
                if let Some(row) = rows.first() {
                    bios_version
                        .fill(row_str(row, "SMBIOSBIOSVersion").or_else(|| row_str(row, "Version")));
                    bios_date
                        .fill(row_str(row, "ReleaseDate").as_deref().and_then(parse::bios_release_date));
                }
            }
            Err(e) => tracing::debug!(error = %e, "Win32_BIOS query failed"),
        }

        if !model.is_set() {
            match probes.wmic_rows("baseboard", "Manufacturer,Product").await {
                Ok(rows) => {
                    if let Some(row) = rows.first() {
                        model.fill(joined_label(
                            row.get("Manufacturer").cloned(),
                            row.get("Product").cloned(),
                        ));
                    }
                }
                Err(e) => tracing::debug!(error = %e, "wmic baseboard query failed"),
            }
        }
        if !bios_version.is_set() {
            match probes.wmic_rows("bios", "SMBIOSBIOSVersion,ReleaseDate").await {
                Ok(rows) => {
                    if let Some(row) = rows.first() {
                        bios_version
                            .fill(row.get("SMBIOSBIOSVersion").cloned().filter(|s| !s.is_empty()));
                        bios_date.fill(
                            row.get("ReleaseDate")
                                .and_then(|raw| parse::bios_release_date(raw)),
                        );
                    }
                }
                Err(e) => tracing::debug!(error = %e, "wmic bios query failed"),
            }
        }

        chipset
            .fill_with_async("pci-device-registry", chipset_from_registry(probes))
            .await;
    }

    model.fill(joined_label(
        platform::dmi_id("board_vendor"),
        platform::dmi_id("board_name"),
    ));
    bios_version.fill(platform::dmi_id("bios_version"));
    bios_date.fill(platform::dmi_id("bios_date"));

    MainboardRecord {
        model: model.into_option(),
        chipset: chipset.into_option(),
        bios_version: bios_version.into_option(),
        bios_date: bios_date.into_option(),
    }
}

fn joined_label(left: Option<String>, right: Option<String>) -> Option<String> {
    let joined = format!(
        "{} {}",
        left.unwrap_or_default().trim(),
        right.unwrap_or_default().trim()
    );
    let joined = joined.trim();
    if joined.is_empty() {
        None
    } else {
        Some(joined.to_string())
    }
}

/// The chipset rarely appears in SMBIOS; the PCI enumeration registry
/// carries a device description for the chipset/LPC/SMBus function.
async fn chipset_from_registry(probes: &Probes) -> ProbeResult<String> {
    let script = r"(Get-ItemProperty -Path 'HKLM:\SYSTEM\CurrentControlSet\Enum\PCI\*\*' -Name DeviceDesc -ErrorAction SilentlyContinue | Where-Object { $_.DeviceDesc -match 'chipset|ISA|LPC|SMBus' } | Select-Object -First 1).DeviceDesc";
    let raw = probes.powershell(script).await?;
    // Value format is "@oem1.inf,%desc%;Actual Description".
    let desc = raw.rsplit(';').next().unwrap_or(&raw).trim();
    if desc.is_empty() {
        return Err(ProbeError::Parse("empty chipset description".into()));
    }
    Ok(desc.to_string())
}
