// Provider adapters.
//
// Each submodule wraps one external data source: the sysinfo crate, Linux
// procfs/sysfs, Windows management tooling (PowerShell/wmic), and the NVIDIA
// diagnostic CLI. Collectors talk to all of them through `Probes`, which
// carries the shared handles and the configured call deadlines.

pub mod nvidia;
pub mod platform;
pub mod runner;
pub mod sysinfo;
pub mod windows;

use crate::config::ScanConfig;
use crate::parse;
use crate::resolver::{ProbeError, ProbeResult};
use std::time::Duration;

pub struct Probes {
    pub sysinfo: sysinfo::SysinfoProbe,
    command_timeout: Duration,
    powershell_timeout: Duration,
    ping_timeout: Duration,
    ping_host: String,
}

impl Probes {
    pub fn new(scan: &ScanConfig) -> Self {
        Self {
            sysinfo: sysinfo::SysinfoProbe::new(),
            command_timeout: Duration::from_secs(scan.command_timeout_secs),
            powershell_timeout: Duration::from_secs(scan.powershell_timeout_secs),
            ping_timeout: Duration::from_secs(scan.ping_timeout_secs),
            ping_host: scan.ping_host.clone(),
        }
    }

    /// Run an external tool under the standard command deadline.
    pub async fn command(&self, program: &str, args: &[&str]) -> ProbeResult<String> {
        runner::run_command(program, args, self.command_timeout).await
    }

    /// Run a PowerShell snippet. PowerShell startup is slow enough to earn
    /// its own, longer deadline.
    pub async fn powershell(&self, script: &str) -> ProbeResult<String> {
        runner::run_command(
            "powershell",
            &["-NoProfile", "-NonInteractive", "-Command", script],
            self.powershell_timeout,
        )
        .await
    }

    /// One echo round-trip to the configured host.
    pub async fn ping_latency_ms(&self) -> ProbeResult<f64> {
        let output = if cfg!(target_os = "windows") {
            self.ping(&["-n", "1", "-w", "3000"]).await?
        } else {
            self.ping(&["-c", "1", "-W", "3"]).await?
        };
        parse::parse_ping_latency_ms(&output)
            .ok_or_else(|| ProbeError::Parse("no latency in ping output".into()))
    }

    async fn ping(&self, args: &[&str]) -> ProbeResult<String> {
        let mut full: Vec<&str> = args.to_vec();
        full.push(&self.ping_host);
        runner::run_command("ping", &full, self.ping_timeout).await
    }
}
