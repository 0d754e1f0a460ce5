// OS version and the gaming-relevant toggles around it.

use crate::models::OsRecord;
use crate::probes::Probes;
use crate::resolver::{Field, ProbeError, ProbeResult};
use tracing::instrument;

/// Kernel builds from 22000 up are Windows 11 even when the product
/// string still says 10. Returns the corrected string, or `None` when no
/// correction applies.
pub fn refine_windows_version(version: &str, build: &str) -> Option<String> {
    let is_w11_build = build
        .split('.')
        .filter_map(|part| part.trim().parse::<u64>().ok())
        .any(|n| n >= 22000);
    if is_w11_build && !version.contains("11") && version.contains("Windows 10") {
        return Some(version.replace("Windows 10", "Windows 11"));
    }
    None
}

#[instrument(skip(probes))]
pub async fn collect(probes: &Probes) -> OsRecord {
    let mut version = Field::new("os.version");
    let mut build_number = Field::new("os.build_number");
    let mut power_plan = Field::new("os.power_plan");
    let mut game_mode = Field::new("os.game_mode");
    let mut hw_sched = Field::new("os.hw_accelerated_gpu_scheduling");
    let mut virtual_memory = Field::new("os.virtual_memory_gb");

    match probes.sysinfo.os_overview().await {
        Ok(os) => {
            version.fill(os.long_version.filter(|s| !s.trim().is_empty()).or(os.name));
            build_number.fill(os.kernel_build);
        }
        Err(e) => tracing::debug!(error = %e, "os overview unavailable"),
    }

    virtual_memory
        .fill_with_async("sysinfo", async {
            probes.sysinfo.memory_overview().await.map(|m| m.swap_total_gb)
        })
        .await;

    let mut version = version.into_option();
    let build_number = build_number.into_option();

    if cfg!(target_os = "windows") {
        if let (Some(v), Some(b)) = (version.as_deref(), build_number.as_deref())
            && let Some(refined) = refine_windows_version(v, b)
        {
            version = Some(refined);
        }

        // Append the marketing version ("23H2") when the registry has it.
        if let Some(v) = version.as_mut()
            && let Ok(display) = probes
                .registry_value(r"HKLM:\SOFTWARE\Microsoft\Windows NT\CurrentVersion", "DisplayVersion")
                .await
        {
            let display = display.trim();
            if !display.is_empty() && !v.contains(display) {
                v.push(' ');
                v.push_str(display);
            }
        }

        power_plan
            .fill_with_async("powercfg", active_power_plan(probes))
            .await;
        game_mode
            .fill_with_async("gamebar-registry", game_mode_flag(probes))
            .await;
        hw_sched
            .fill_with_async("graphics-drivers-registry", gpu_scheduling_flag(probes))
            .await;
    }

    OsRecord {
        version,
        build_number,
        power_plan: power_plan.into_option(),
        game_mode: game_mode.into_option(),
        hw_accelerated_gpu_scheduling: hw_sched.into_option(),
        virtual_memory_gb: virtual_memory.into_option(),
    }
}

async fn active_power_plan(probes: &Probes) -> ProbeResult<String> {
    let raw = probes.command("powercfg", &["/getactivescheme"]).await?;
    crate::parse::power_plan_name(&raw)
        .ok_or_else(|| ProbeError::Parse("no plan name in powercfg output".into()))
}

/// Game Mode has two generations of registry keys; a machine with
/// neither has never toggled it, and the feature ships enabled.
async fn game_mode_flag(probes: &Probes) -> ProbeResult<bool> {
    const GAMEBAR_KEY: &str = r"HKCU:\Software\Microsoft\GameBar";
    match probes.registry_value(GAMEBAR_KEY, "AllowAutoGameMode").await {
        Ok(v) if v.trim() == "1" => return Ok(true),
        Ok(v) if v.trim() == "0" => return Ok(false),
        _ => {}
    }
    match probes.registry_value(GAMEBAR_KEY, "AutoGameModeEnabled").await {
        Ok(v) if v.trim() == "1" => return Ok(true),
        Ok(v) if v.trim() == "0" => return Ok(false),
        _ => {}
    }
    Ok(true)
}

async fn gpu_scheduling_flag(probes: &Probes) -> ProbeResult<bool> {
    let value = probes
        .registry_value(
            r"HKLM:\SYSTEM\CurrentControlSet\Control\GraphicsDrivers",
            "HwSchMode",
        )
        .await?;
    match value.trim() {
        "2" => Ok(true),
        "0" | "1" => Ok(false),
        other => Err(ProbeError::Ambiguous(format!("HwSchMode = {other}"))),
    }
}
