// nvidia-smi CSV queries. One probe answers most of the graphics record;
// a second query reads the BAR1 region for resizable-BAR detection.

use crate::parse;
use crate::probes::Probes;
use crate::resolver::{ProbeError, ProbeResult};

/// Columns requested from `--query-gpu`, in reading order.
const QUERY_FIELDS: &str = "name,memory.total,memory.used,clocks.current.graphics,clocks.current.memory,temperature.gpu,fan.speed,driver_version,utilization.gpu,pcie.link.gen.current,pcie.link.width.current";

/// One parsed `--query-gpu` row. Every column may come back as
/// `[N/A]` on laptops and passthrough setups, so everything is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmiReading {
    pub name: Option<String>,
    pub memory_total_mib: Option<f64>,
    pub memory_used_mib: Option<f64>,
    pub graphics_clock_mhz: Option<f64>,
    pub memory_clock_mhz: Option<f64>,
    pub temperature_c: Option<f64>,
    pub fan_speed_pct: Option<f64>,
    pub driver_version: Option<String>,
    pub utilization_pct: Option<f64>,
    pub pcie_gen: Option<u32>,
    pub pcie_width: Option<u32>,
}

impl Probes {
    /// First GPU row from nvidia-smi, or an error when the tool is absent
    /// or reports no device.
    pub async fn nvidia_query_gpu(&self) -> ProbeResult<SmiReading> {
        let args = [
            format!("--query-gpu={QUERY_FIELDS}"),
            "--format=csv,noheader,nounits".to_string(),
        ];
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let raw = self.nvidia_smi(&args).await?;
        let line = raw
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or_else(|| ProbeError::Parse("nvidia-smi: empty query output".into()))?;
        parse_query_row(line)
    }

    /// Total BAR1 aperture in MiB. An aperture above the legacy 256 MiB
    /// window means resizable BAR is active.
    pub async fn nvidia_bar1_total_mib(&self) -> ProbeResult<f64> {
        let raw = self
            .nvidia_smi(&["--query-gpu=bar1.total", "--format=csv,noheader,nounits"])
            .await?;
        let line = raw
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .ok_or_else(|| ProbeError::Parse("nvidia-smi: empty bar1 output".into()))?;
        parse::parse_f64_loose(line).ok_or_else(|| ProbeError::Parse(format!("bar1 total: {line:?}")))
    }

    /// Runs nvidia-smi from PATH, falling back to the canonical install
    /// location on Windows where PATH rarely includes it.
    async fn nvidia_smi(&self, args: &[&str]) -> ProbeResult<String> {
        match self.command("nvidia-smi", args).await {
            Err(ProbeError::Unavailable(_)) if cfg!(target_os = "windows") => {
                self.command(r"C:\Windows\System32\nvidia-smi.exe", args)
                    .await
            }
            other => other,
        }
    }
}

/// Decodes one CSV row in [`QUERY_FIELDS`] order.
pub fn parse_query_row(line: &str) -> ProbeResult<SmiReading> {
    let cells: Vec<Option<String>> = line.split(',').map(parse::csv_field).collect();
    if cells.len() < 11 {
        return Err(ProbeError::Parse(format!(
            "nvidia-smi row has {} fields, expected 11",
            cells.len()
        )));
    }
    let num = |i: usize| cells[i].as_deref().and_then(parse::parse_f64_loose);
    Ok(SmiReading {
        name: cells[0].clone(),
        memory_total_mib: num(1),
        memory_used_mib: num(2),
        graphics_clock_mhz: num(3),
        memory_clock_mhz: num(4),
        temperature_c: num(5),
        fan_speed_pct: num(6),
        driver_version: cells[7].clone(),
        utilization_pct: num(8),
        pcie_gen: num(9).map(|v| v as u32),
        pcie_width: num(10).map(|v| v as u32),
    })
}
