// Linux-specific readers: /proc, /sys DMI, cpufreq, block devices.

use crate::parse;

/// Read the first "model name" from /proc/cpuinfo. Preferred over sysinfo
/// when that returns placeholder names like "cpu0".
pub fn cpu_model() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("model name") {
                let name = line
                    .find(": ")
                    .map(|i| line[i + 2..].trim())
                    .filter(|s| !s.is_empty() && *s != "cpu0")?;
                return Some(name.to_string());
            }
        }
    }
    None
}

/// Max sustained clock from cpufreq, in GHz.
pub fn cpu_max_clock_ghz() -> Option<f64> {
    #[cfg(target_os = "linux")]
    {
        let raw =
            std::fs::read_to_string("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq")
                .ok()?;
        let khz: f64 = raw.trim().parse().ok()?;
        if khz > 0.0 {
            return Some(parse::round2(khz / 1_000_000.0));
        }
    }
    None
}

/// Size of one cpu0 cache level in bytes. Index 0/1 are L1 data/instruction,
/// 2 is L2, 3 is L3.
pub fn cpu_cache_bytes(index: u32) -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/devices/system/cpu/cpu0/cache/index{index}/size");
        let raw = std::fs::read_to_string(path).ok()?;
        return parse::parse_cache_size(&raw);
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = index;
        None
    }
}

/// Whether the CPU advertises hardware virtualization (vmx/svm flag).
/// None when /proc/cpuinfo has no flags line to inspect.
pub fn virtualization_flag() -> Option<bool> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        for line in content.lines() {
            if line.starts_with("flags") {
                let has = line
                    .split_whitespace()
                    .any(|flag| flag == "vmx" || flag == "svm");
                return Some(has);
            }
        }
    }
    None
}

/// One DMI identity file from /sys/class/dmi/id (board_vendor, board_name,
/// bios_version, bios_date).
pub fn dmi_id(file: &str) -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/dmi/id/{file}");
        let v = std::fs::read_to_string(path).ok()?;
        let v = v.trim();
        if v.is_empty() {
            return None;
        }
        return Some(v.to_string());
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = file;
        None
    }
}

/// Link speed from /sys/class/net/<interface>/speed, in Mbps.
pub fn interface_speed_mbps(interface_name: &str) -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{interface_name}/speed");
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(mbps) = content.trim().parse::<i64>()
            && mbps > 0
        {
            return Some(mbps as u64);
        }
    }
    let _ = interface_name;
    None
}

pub struct BlockDevice {
    pub name: String,
    pub model: Option<String>,
    pub size_bytes: u64,
    pub rotational: Option<bool>,
}

/// Physical block devices from /sys/block, virtual devices filtered out.
pub fn block_devices() -> Vec<BlockDevice> {
    let mut devices = Vec::new();
    #[cfg(target_os = "linux")]
    {
        let Ok(entries) = std::fs::read_dir("/sys/block") else {
            return devices;
        };
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if ["loop", "ram", "zram", "dm-", "sr", "md"]
                .iter()
                .any(|p| name.starts_with(p))
            {
                continue;
            }
            let base = entry.path();
            let sectors: u64 = read_trimmed(base.join("size"))
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            if sectors == 0 {
                continue;
            }
            let rotational = read_trimmed(base.join("queue/rotational"))
                .map(|s| s == "1");
            devices.push(BlockDevice {
                model: read_trimmed(base.join("device/model")),
                size_bytes: sectors * 512,
                rotational,
                name,
            });
        }
        devices.sort_by(|a, b| a.name.cmp(&b.name));
    }
    devices
}

#[cfg(target_os = "linux")]
fn read_trimmed(path: std::path::PathBuf) -> Option<String> {
    let v = std::fs::read_to_string(path).ok()?;
    let v = v.trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}
