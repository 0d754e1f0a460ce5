// Firmware-level toggles, inferred from the running system. Runs after
// the memory collector because the XMP verdict derives from its speeds.

use crate::models::{FirmwareRecord, MemoryRecord};
use crate::probes::{Probes, platform};
use crate::resolver::{Field, ProbeError, ProbeResult};
use tracing::instrument;

/// XMP/EXPO verdict from effective vs rated speed. Running at 95% or
/// more of the rated speed means the profile is active; under 80% means
/// JEDEC defaults. The band between is left undecided: some boards
/// downclock slightly under load.
pub fn xmp_state(speed_mhz: Option<u64>, rated_mhz: Option<u64>) -> Option<bool> {
    let speed = speed_mhz? as f64;
    let rated = rated_mhz? as f64;
    if speed <= 0.0 || rated <= 0.0 {
        return None;
    }
    if speed >= rated * 0.95 {
        Some(true)
    } else if speed < rated * 0.8 {
        Some(false)
    } else {
        None
    }
}

#[instrument(skip(probes, memory))]
pub async fn collect(probes: &Probes, memory: &MemoryRecord) -> FirmwareRecord {
    let xmp_enabled = xmp_state(memory.speed_mhz, memory.rated_speed_mhz);

    let mut resizable_bar = Field::new("firmware.resizable_bar");
    let mut tpm_status = Field::new("firmware.tpm_status");
    let mut virtualization = Field::new("firmware.virtualization");
    let mut secure_boot = Field::new("firmware.secure_boot");

    if cfg!(target_os = "windows") {
        resizable_bar
            .fill_with_async("rebar-registry", rebar_from_registry(probes))
            .await;
    }
    resizable_bar
        .fill_with_async("nvidia-smi-bar1", rebar_from_bar1(probes))
        .await;

    if cfg!(target_os = "windows") {
        tpm_status
            .fill_with_async("get-tpm", tpm_from_cmdlet(probes))
            .await;
        tpm_status
            .fill_with_async("win32-tpm", tpm_from_cim(probes))
            .await;
        virtualization
            .fill_with_async("cim-processor", virtualization_from_cim(probes))
            .await;
        secure_boot
            .fill_with_async("confirm-secureboot", secure_boot_flag(probes))
            .await;
    }
    virtualization.fill(platform::virtualization_flag());

    FirmwareRecord {
        xmp_enabled,
        resizable_bar: resizable_bar.into_option(),
        tpm_status: tpm_status.into_option(),
        virtualization: virtualization.into_option(),
        secure_boot: secure_boot.into_option(),
    }
}

/// The display-class registry key only exists once a driver has seen
/// resizable BAR enabled.
async fn rebar_from_registry(probes: &Probes) -> ProbeResult<bool> {
    let script = r"Get-ItemProperty -Path 'HKLM:\SYSTEM\CurrentControlSet\Control\Class\{4d36e968-e325-11ce-bfc1-08002be10318}\0*' -Name 'ReBarState' -ErrorAction Stop | Select-Object -First 1 -ExpandProperty ReBarState";
    probes.powershell(script).await?;
    Ok(true)
}

/// A BAR1 aperture above the legacy 256 MiB window means the GPU runs
/// with resizable BAR; at or below it the feature is off.
async fn rebar_from_bar1(probes: &Probes) -> ProbeResult<bool> {
    let bar1_mib = probes.nvidia_bar1_total_mib().await?;
    Ok(bar1_mib > 256.0)
}

async fn tpm_from_cmdlet(probes: &Probes) -> ProbeResult<String> {
    let value = probes.powershell("(Get-Tpm -ErrorAction Stop).TpmPresent").await?;
    match first_token(&value).to_ascii_uppercase().as_str() {
        "TRUE" => Ok("enabled".to_string()),
        "FALSE" => Ok("not present".to_string()),
        other => Err(ProbeError::Ambiguous(format!("TpmPresent = {other}"))),
    }
}

async fn tpm_from_cim(probes: &Probes) -> ProbeResult<String> {
    let script = r"Get-CimInstance -Namespace 'root\cimv2\Security\MicrosoftTpm' -ClassName Win32_Tpm -ErrorAction Stop | Select-Object -ExpandProperty IsEnabled_InitialValue";
    let value = probes.powershell(script).await?;
    if first_token(&value).eq_ignore_ascii_case("true") {
        Ok("enabled".to_string())
    } else {
        Err(ProbeError::Ambiguous(format!(
            "IsEnabled_InitialValue = {}",
            value.trim()
        )))
    }
}

async fn virtualization_from_cim(probes: &Probes) -> ProbeResult<bool> {
    let value = probes
        .powershell("(Get-CimInstance -ClassName Win32_Processor -ErrorAction Stop).VirtualizationFirmwareEnabled")
        .await?;
    parse_bool_token(&value)
}

async fn secure_boot_flag(probes: &Probes) -> ProbeResult<bool> {
    let value = probes.powershell("Confirm-SecureBootUEFI -ErrorAction Stop").await?;
    parse_bool_token(&value)
}

/// First non-empty line; multi-socket boards print one value per CPU.
fn first_token(value: &str) -> &str {
    value
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
}

fn parse_bool_token(value: &str) -> ProbeResult<bool> {
    match first_token(value).to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        other => Err(ProbeError::Parse(format!("expected boolean, got {other:?}"))),
    }
}
