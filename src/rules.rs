// Heuristic misconfiguration rules over a finished snapshot.
//
// Each rule is pure and total: absent inputs mean no finding, never an
// error. Output order is the table order below and is part of the
// contract; reports and tests rely on it.

use crate::models::{
    ChannelMode, DriveKind, FirmwareRecord, GraphicsRecord, MemoryRecord, OsRecord,
    ProcessorRecord, StorageRecord,
};

/// GPU families that support resizable BAR.
pub const REBAR_CAPABLE_FAMILIES: &[&str] = &["RTX 30", "RTX 40", "RTX 50", "RX 6", "RX 7"];

const TEMP_LIMIT_C: f64 = 85.0;
const MIN_VRAM_GB: f64 = 4.0;
const MIN_FREE_PCT: f64 = 10.0;
const RAM_USAGE_LIMIT_PCT: f64 = 90.0;
/// Effective speed below this share of rated speed suggests XMP is off.
const SPEED_RATIO_FLOOR: f64 = 0.9;

pub fn evaluate(
    processor: &ProcessorRecord,
    graphics: &GraphicsRecord,
    memory: &MemoryRecord,
    storage: &[StorageRecord],
    os: &OsRecord,
    firmware: &FirmwareRecord,
) -> Vec<String> {
    let mut issues = Vec::new();
    issues.extend(ram_below_rated_speed(memory));
    issues.extend(power_plan_not_performance(os));
    issues.extend(single_channel_memory(memory));
    issues.extend(cpu_running_hot(processor));
    issues.extend(gpu_running_hot(graphics));
    issues.extend(low_vram(graphics));
    issues.extend(boot_drive_nearly_full(storage));
    issues.extend(boot_drive_mechanical(storage));
    issues.extend(game_mode_disabled(os));
    issues.extend(gpu_scheduling_disabled(os));
    issues.extend(memory_pressure(memory));
    issues.extend(rebar_capable_but_disabled(firmware, graphics));
    issues
}

pub fn ram_below_rated_speed(memory: &MemoryRecord) -> Option<String> {
    let actual = memory.speed_mhz.filter(|v| *v > 0)?;
    let rated = memory.rated_speed_mhz.filter(|v| *v > 0)?;
    if (actual as f64) < rated as f64 * SPEED_RATIO_FLOOR {
        return Some(format!(
            "RAM running at {actual}MHz but rated for {rated}MHz -- XMP may not be enabled in BIOS"
        ));
    }
    None
}

pub fn power_plan_not_performance(os: &OsRecord) -> Option<String> {
    let plan = os.power_plan.as_deref().filter(|p| !p.is_empty())?;
    let lower = plan.to_lowercase();
    if !lower.contains("high performance") && !lower.contains("ultimate") {
        return Some(format!(
            "Power plan set to \"{plan}\" -- switch to \"High Performance\" for gaming"
        ));
    }
    None
}

pub fn single_channel_memory(memory: &MemoryRecord) -> Option<String> {
    if memory.channel_mode == Some(ChannelMode::Single) {
        return Some(
            "RAM running in single-channel mode -- dual-channel provides significantly better performance"
                .to_string(),
        );
    }
    None
}

pub fn cpu_running_hot(processor: &ProcessorRecord) -> Option<String> {
    let temp = processor.current_temp_c.filter(|t| *t > TEMP_LIMIT_C)?;
    Some(format!(
        "CPU temperature is {temp} C -- this is quite high, check cooling solution"
    ))
}

pub fn gpu_running_hot(graphics: &GraphicsRecord) -> Option<String> {
    let temp = graphics.current_temp_c.filter(|t| *t > TEMP_LIMIT_C)?;
    Some(format!(
        "GPU temperature is {temp} C -- this is high, check case airflow and fan curve"
    ))
}

pub fn low_vram(graphics: &GraphicsRecord) -> Option<String> {
    let vram = graphics
        .vram_total_gb
        .filter(|v| *v > 0.0 && *v < MIN_VRAM_GB)?;
    Some(format!(
        "GPU only has {vram}GB VRAM -- modern games may struggle at higher settings"
    ))
}

pub fn boot_drive_nearly_full(storage: &[StorageRecord]) -> Option<String> {
    let drive = storage.iter().find(|d| {
        d.is_boot_drive
            && d.capacity_gb.is_some_and(|c| c > 0.0)
            && d.free_gb.is_some_and(|f| f > 0.0)
    })?;
    let capacity = drive.capacity_gb?;
    let free = drive.free_gb?;
    let pct_free = free / capacity * 100.0;
    if pct_free < MIN_FREE_PCT {
        return Some(format!(
            "Boot drive has only {free:.1}GB free ({pct_free:.0}%) -- low disk space can hurt performance"
        ));
    }
    None
}

pub fn boot_drive_mechanical(storage: &[StorageRecord]) -> Option<String> {
    storage
        .iter()
        .any(|d| d.is_boot_drive && d.kind == Some(DriveKind::Hdd))
        .then(|| {
            "Boot drive is a mechanical HDD -- upgrading to an SSD will dramatically improve load times"
                .to_string()
        })
}

pub fn game_mode_disabled(os: &OsRecord) -> Option<String> {
    if os.game_mode == Some(false) {
        return Some(
            "Windows Game Mode is disabled -- enable it for better gaming performance".to_string(),
        );
    }
    None
}

pub fn gpu_scheduling_disabled(os: &OsRecord) -> Option<String> {
    if os.hw_accelerated_gpu_scheduling == Some(false) {
        return Some(
            "Hardware-accelerated GPU scheduling is disabled -- enabling it may improve performance"
                .to_string(),
        );
    }
    None
}

pub fn memory_pressure(memory: &MemoryRecord) -> Option<String> {
    let usage = memory
        .usage_percent
        .filter(|u| *u > RAM_USAGE_LIMIT_PCT)?;
    Some(format!(
        "RAM usage is at {usage}% -- consider closing background apps or upgrading RAM"
    ))
}

pub fn rebar_capable_but_disabled(
    firmware: &FirmwareRecord,
    graphics: &GraphicsRecord,
) -> Option<String> {
    if firmware.resizable_bar != Some(false) {
        return None;
    }
    let model = graphics.model_name.as_deref()?.to_uppercase();
    if REBAR_CAPABLE_FAMILIES.iter().any(|f| model.contains(f)) {
        return Some(
            "Resizable BAR (ReBAR/SAM) is disabled -- enable in BIOS for potential FPS gains"
                .to_string(),
        );
    }
    None
}
