// Console summary of a finished snapshot.

use crate::models::Snapshot;

const RULE: &str = "=======================================================";

pub fn print_summary(snapshot: &Snapshot) {
    println!();
    println!("{RULE}");
    println!("  PC Bottleneck Analyzer -- System Scan");
    println!("{RULE}");
    println!();

    println!("{}", cpu_line(snapshot));
    println!("{}", gpu_line(snapshot));
    println!("{}", ram_line(snapshot));
    for line in storage_lines(snapshot) {
        println!("{line}");
    }
    println!("{}", os_line(snapshot));

    println!();
    if snapshot.issues.is_empty() {
        println!("  No obvious issues detected. System looks well-configured!");
    } else {
        println!("  !! POTENTIAL ISSUES DETECTED: {}", snapshot.issues.len());
        for (i, issue) in snapshot.issues.iter().enumerate() {
            println!("  {}. {issue}", i + 1);
        }
    }
    println!();
    println!(
        "  Scan completed in {}s (ID: {})",
        snapshot.scan_duration_seconds, snapshot.scan_id
    );
    println!();
}

fn cpu_line(snapshot: &Snapshot) -> String {
    let cpu = &snapshot.processor;
    let cores = cpu
        .physical_cores
        .map_or_else(|| "?".to_string(), |n| n.to_string());
    let threads = cpu
        .logical_cores
        .map_or_else(|| "?".to_string(), |n| n.to_string());
    let mut line = format!(
        "  CPU: {} ({cores}C/{threads}T",
        cpu.model_name.as_deref().unwrap_or("Unknown")
    );
    if let Some(base) = cpu.base_clock_ghz.filter(|v| *v > 0.0) {
        line.push_str(&format!(", {base}GHz base"));
    }
    if let Some(current) = cpu.current_clock_ghz.filter(|v| *v > 0.0) {
        line.push_str(&format!(", currently at {current}GHz"));
    }
    if let Some(temp) = cpu.current_temp_c.filter(|v| *v > 0.0) {
        line.push_str(&format!(", {temp} C"));
    }
    line.push(')');
    line
}

fn gpu_line(snapshot: &Snapshot) -> String {
    let gpu = &snapshot.graphics;
    let mut line = format!("  GPU: {}", gpu.model_name.as_deref().unwrap_or("Unknown"));
    let mut details = Vec::new();
    if let Some(vram) = gpu.vram_total_gb.filter(|v| *v > 0.0) {
        details.push(format!("{vram}GB VRAM"));
    }
    if let Some(driver) = gpu.driver_version.as_deref() {
        details.push(format!("driver {driver}"));
    }
    if let Some(temp) = gpu.current_temp_c.filter(|v| *v > 0.0) {
        details.push(format!("{temp} C"));
    }
    if let (Some(generation), Some(width)) = (gpu.pcie_generation, gpu.pcie_link_width) {
        details.push(format!("PCIe Gen{generation} x{width}"));
    }
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }
    line
}

fn ram_line(snapshot: &Snapshot) -> String {
    let ram = &snapshot.memory;
    let mut line = match ram.total_gb.filter(|v| *v > 0.0) {
        Some(total) => format!("  RAM: {total}GB"),
        None => "  RAM: Unknown".to_string(),
    };
    if let Some(speed) = ram.speed_mhz.filter(|v| *v > 0) {
        // DDR5 starts at 4800 MT/s.
        let generation = if speed >= 4800 { "DDR5" } else { "DDR4" };
        line.push_str(&format!(" {generation}-{speed}"));
    }
    let mut details = Vec::new();
    if let Some(channel) = ram.channel_mode {
        details.push(format!("{} Channel", channel.label()));
    }
    match snapshot.firmware.xmp_enabled {
        Some(true) => details.push("XMP ENABLED".to_string()),
        Some(false) => details.push("XMP DISABLED!".to_string()),
        None => {}
    }
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }
    line
}

fn storage_lines(snapshot: &Snapshot) -> Vec<String> {
    snapshot
        .storage
        .iter()
        .map(|drive| {
            let mut line = format!(
                "  Storage: {}",
                drive.model.as_deref().unwrap_or("Unknown")
            );
            if let Some(cap) = drive.capacity_gb.filter(|v| *v > 0.0) {
                if cap < 1000.0 {
                    line.push_str(&format!(" {cap:.0}GB"));
                } else {
                    line.push_str(&format!(" {:.1}TB", cap / 1000.0));
                }
            }
            if let Some(kind) = drive.kind {
                line.push_str(&format!(" {kind}"));
            }
            let mut details = Vec::new();
            if let Some(interface) = drive.interface.as_deref() {
                details.push(interface.to_string());
            }
            if let (Some(cap), Some(used)) = (
                drive.capacity_gb.filter(|v| *v > 0.0),
                drive.used_gb.filter(|v| *v > 0.0),
            ) {
                details.push(format!("{}% used", (used / cap * 100.0).round()));
            }
            if let Some(health) = drive.health_status.as_deref() {
                details.push(health.to_lowercase());
            }
            if drive.is_boot_drive {
                details.push("boot".to_string());
            }
            if !details.is_empty() {
                line.push_str(&format!(" ({})", details.join(", ")));
            }
            line
        })
        .collect()
}

fn os_line(snapshot: &Snapshot) -> String {
    let os = &snapshot.os;
    let mut line = format!("  OS: {}", os.version.as_deref().unwrap_or("Unknown"));
    if let Some(plan) = os.power_plan.as_deref() {
        line.push_str(&format!(" ({plan} power plan)"));
    }
    line
}
