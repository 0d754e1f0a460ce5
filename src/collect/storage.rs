// Physical drives: enumeration, type inference, usage attachment.

use crate::models::{DriveKind, StorageRecord};
use crate::parse;
use crate::probes::sysinfo::PartitionUsage;
use crate::probes::windows::{self, row_bool, row_str, row_u64};
use crate::probes::{Probes, platform};
use std::collections::HashMap;
use tracing::instrument;

/// Model tokens that mark a fixed SATA disk as mechanical.
pub const HDD_MODEL_KEYWORDS: &[&str] =
    &["HDD", "BARRACUDA", "CAVIAR", "IRONWOLF", "WD BLUE WD10", "WD BLACK WD"];

/// Layered drive-type inference over the inventory strings.
///
/// An explicit NVMe token anywhere wins. A SATA-family interface then
/// decides between SSD and HDD from the model string and media class.
/// Anything else stays undecided with the raw interface passed through.
pub fn infer_drive_kind(
    model: &str,
    interface: &str,
    media: &str,
) -> (Option<DriveKind>, Option<String>) {
    let model_u = model.to_uppercase();
    let iface_u = interface.to_uppercase();
    let media_u = media.to_uppercase();

    if model_u.contains("NVME") || iface_u.contains("NVME") {
        return (Some(DriveKind::NvmeSsd), Some("NVMe".to_string()));
    }
    if iface_u.contains("SATA") || iface_u.contains("IDE") || iface_u.contains("SCSI") {
        let kind = if model_u.contains("SSD") || media_u.contains("SOLID") {
            DriveKind::SataSsd
        } else if media_u.contains("FIXED") {
            if HDD_MODEL_KEYWORDS.iter().any(|k| model_u.contains(k)) {
                DriveKind::Hdd
            } else {
                DriveKind::SataSsd
            }
        } else {
            DriveKind::Hdd
        };
        return (Some(kind), Some("SATA".to_string()));
    }
    let interface = interface.trim();
    (
        None,
        if interface.is_empty() {
            None
        } else {
            Some(interface.to_string())
        },
    )
}

/// Storage-subsystem view of the media, which overrides the inventory
/// heuristics when it disagrees. Codes 4/3 are the numeric forms of
/// SSD/HDD; bus 17 is NVMe.
pub fn refine_kind(media_type: &str, bus_type: &str) -> Option<DriveKind> {
    let mt = media_type.to_uppercase();
    let bt = bus_type.to_uppercase();
    if mt.contains("SSD") || mt == "4" {
        if bt.contains("NVME") || bt == "17" {
            Some(DriveKind::NvmeSsd)
        } else {
            Some(DriveKind::SataSsd)
        }
    } else if mt.contains("HDD") || mt == "3" {
        Some(DriveKind::Hdd)
    } else {
        None
    }
}

#[instrument(skip(probes))]
pub async fn collect(probes: &Probes) -> Vec<StorageRecord> {
    let partitions = match probes.sysinfo.partitions().await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::debug!(error = %e, "partition usage unavailable");
            Vec::new()
        }
    };

    let mut drives = Vec::new();
    if cfg!(target_os = "windows") {
        drives = windows_drives(probes, &partitions).await;
    }
    if drives.is_empty() {
        drives = platform_drives(&partitions);
    }
    if cfg!(target_os = "windows") && !drives.is_empty() {
        refine_from_physical_disk(probes, &mut drives).await;
    }

    // With a single drive and no association, the sole partition's usage
    // can only belong to it. Still a heuristic, so it is logged.
    if let [drive] = drives.as_mut_slice()
        && drive.used_gb.is_none()
        && let Some(part) = partitions.first()
    {
        tracing::debug!(
            device = %part.device,
            "attributing sole partition usage to the only detected drive"
        );
        drive.used_gb = Some(part.used_gb);
        drive.free_gb = Some(part.free_gb);
    }

    drives
}

async fn windows_drives(probes: &Probes, partitions: &[PartitionUsage]) -> Vec<StorageRecord> {
    let boot_index = boot_disk_index(probes).await;
    let mut drives = Vec::new();

    match probes
        .cim_rows(
            "Win32_DiskDrive",
            &["Model", "Size", "InterfaceType", "MediaType", "Index"],
        )
        .await
    {
        Ok(rows) => {
            let letters_by_disk = logical_disk_map(probes).await;
            for row in &rows {
                let model = row_str(row, "Model").map(|s| s.trim().to_string());
                let iface_raw = row_str(row, "InterfaceType").unwrap_or_default();
                let media_raw = row_str(row, "MediaType").unwrap_or_default();
                let (kind, interface) =
                    infer_drive_kind(model.as_deref().unwrap_or(""), &iface_raw, &media_raw);
                let index = row_u64(row, "Index").map(|v| v as u32);

                let mut record = StorageRecord {
                    model,
                    kind,
                    capacity_gb: row_u64(row, "Size")
                        .filter(|bytes| *bytes > 0)
                        .map(parse::bytes_to_gb),
                    used_gb: None,
                    free_gb: None,
                    interface,
                    health_status: None,
                    is_boot_drive: index.is_some() && index == boot_index,
                };

                if let Some(idx) = index
                    && let Some(letters) = letters_by_disk.get(&idx)
                {
                    attach_usage(&mut record, letters, partitions);
                }
                drives.push(record);
            }
        }
        Err(e) => tracing::debug!(error = %e, "Win32_DiskDrive query failed"),
    }

    if drives.is_empty() {
        match probes
            .wmic_rows("diskdrive", "Model,Size,InterfaceType,Index,MediaType")
            .await
        {
            Ok(rows) => {
                for row in rows {
                    let model = row.get("Model").cloned().filter(|s| !s.is_empty());
                    let iface_raw = row.get("InterfaceType").cloned().unwrap_or_default();
                    let media_raw = row.get("MediaType").cloned().unwrap_or_default();
                    let (kind, interface) =
                        infer_drive_kind(model.as_deref().unwrap_or(""), &iface_raw, &media_raw);
                    drives.push(StorageRecord {
                        model,
                        kind,
                        capacity_gb: row
                            .get("Size")
                            .and_then(|v| parse::parse_u64_loose(v))
                            .filter(|bytes| *bytes > 0)
                            .map(parse::bytes_to_gb),
                        used_gb: None,
                        free_gb: None,
                        interface,
                        health_status: None,
                        is_boot_drive: false,
                    });
                }
            }
            Err(e) => tracing::debug!(error = %e, "wmic diskdrive query failed"),
        }
    }

    drives
}

async fn boot_disk_index(probes: &Probes) -> Option<u32> {
    match probes
        .cim_rows("Win32_DiskPartition", &["BootPartition", "DiskIndex"])
        .await
    {
        Ok(rows) => rows
            .iter()
            .find(|row| row_bool(row, "BootPartition") == Some(true))
            .and_then(|row| row_u64(row, "DiskIndex"))
            .map(|v| v as u32),
        Err(e) => {
            tracing::debug!(error = %e, "boot partition query failed");
            None
        }
    }
}

/// Disk index to drive letters, via the partition association class.
async fn logical_disk_map(probes: &Probes) -> HashMap<u32, Vec<String>> {
    let mut map: HashMap<u32, Vec<String>> = HashMap::new();
    match probes
        .wmic_rows("path Win32_LogicalDiskToPartition", "Antecedent,Dependent")
        .await
    {
        Ok(rows) => {
            for row in rows {
                if let Some(antecedent) = row.get("Antecedent")
                    && let Some(dependent) = row.get("Dependent")
                    && let Some(index) = parse::disk_index_from_partition_ref(antecedent)
                    && let Some(letter) = parse::drive_letter_from_ref(dependent)
                {
                    map.entry(index).or_default().push(letter);
                }
            }
        }
        Err(e) => tracing::debug!(error = %e, "logical disk association query failed"),
    }
    map
}

fn attach_usage(record: &mut StorageRecord, letters: &[String], partitions: &[PartitionUsage]) {
    for letter in letters {
        let matched = partitions.iter().find(|p| {
            p.device.starts_with(letter.as_str()) || p.mount.starts_with(letter.as_str())
        });
        if let Some(part) = matched {
            record.used_gb = Some(part.used_gb);
            record.free_gb = Some(part.free_gb);
            if record.capacity_gb.is_none() {
                record.capacity_gb = Some(part.capacity_gb);
            }
            return;
        }
    }
}

/// Block-device enumeration where the kernel exposes it directly.
fn platform_drives(partitions: &[PartitionUsage]) -> Vec<StorageRecord> {
    platform::block_devices()
        .into_iter()
        .map(|dev| {
            let kind = if dev.name.starts_with("nvme") {
                Some(DriveKind::NvmeSsd)
            } else {
                match dev.rotational {
                    Some(true) => Some(DriveKind::Hdd),
                    Some(false) => Some(DriveKind::SataSsd),
                    None => None,
                }
            };
            let interface = match kind {
                Some(DriveKind::NvmeSsd) => Some("NVMe".to_string()),
                Some(_) => Some("SATA".to_string()),
                None => None,
            };

            let node = format!("/dev/{}", dev.name);
            let mut attached: Option<&PartitionUsage> = None;
            let mut is_boot = false;
            for part in partitions.iter().filter(|p| p.device.starts_with(&node)) {
                if part.mount == "/" {
                    is_boot = true;
                    attached = Some(part);
                } else if attached.is_none() {
                    attached = Some(part);
                }
            }

            StorageRecord {
                model: dev.model,
                kind,
                capacity_gb: (dev.size_bytes > 0).then(|| parse::bytes_to_gb(dev.size_bytes)),
                used_gb: attached.map(|p| p.used_gb),
                free_gb: attached.map(|p| p.free_gb),
                interface,
                health_status: None,
                is_boot_drive: is_boot,
            }
        })
        .collect()
}

/// Health and media-class refinement. The storage subsystem knows more
/// than the inventory, so a decided media class here overwrites the
/// heuristic one; this is the only tier allowed to do that.
async fn refine_from_physical_disk(probes: &Probes, drives: &mut [StorageRecord]) {
    const QUERY: &str =
        "Get-PhysicalDisk | Select-Object FriendlyName,HealthStatus,MediaType,BusType | ConvertTo-Json";
    let rows = match probes.powershell(QUERY).await.and_then(|raw| windows::json_rows(&raw)) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::debug!(error = %e, "physical disk health query failed");
            return;
        }
    };

    for row in &rows {
        let Some(friendly) = row_str(row, "FriendlyName").map(|s| s.trim().to_uppercase()) else {
            continue;
        };
        let health = row_str(row, "HealthStatus");
        let media = row_str(row, "MediaType").unwrap_or_default();
        let bus = row_str(row, "BusType").unwrap_or_default();

        for drive in drives.iter_mut() {
            let model_u = drive
                .model
                .as_deref()
                .unwrap_or("")
                .trim()
                .to_uppercase();
            if model_u.is_empty() || !(model_u.contains(&friendly) || friendly.contains(&model_u)) {
                continue;
            }
            if health.is_some() {
                drive.health_status = health.clone();
            }
            if let Some(kind) = refine_kind(&media, &bus) {
                if kind == DriveKind::NvmeSsd {
                    drive.interface = Some("NVMe".to_string());
                }
                drive.kind = Some(kind);
            }
            break;
        }
    }
}
