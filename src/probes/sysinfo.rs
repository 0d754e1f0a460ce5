// System metrics via sysinfo

use crate::parse::{bytes_to_gb, round1, round2};
use crate::probes::platform;
use crate::resolver::{ProbeError, ProbeResult};
use std::sync::Arc;
use sysinfo::{Components, Disks, Networks, System};
use tracing::instrument;

/// Shared sysinfo handles. Refreshes run on the blocking pool; the mutexes
/// keep concurrent collectors from refreshing the same handle mid-read.
pub struct SysinfoProbe {
    sys: Arc<std::sync::Mutex<System>>,
    components: Arc<std::sync::Mutex<Components>>,
    disks: Arc<std::sync::Mutex<Disks>>,
    networks: Arc<std::sync::Mutex<Networks>>,
}

pub struct CpuOverview {
    pub model: Option<String>,
    pub physical_cores: Option<u32>,
    pub logical_cores: Option<u32>,
    pub current_clock_ghz: Option<f64>,
    pub usage_per_core: Vec<f64>,
}

pub struct MemoryOverview {
    pub total_gb: f64,
    pub used_gb: f64,
    pub usage_percent: f64,
    pub swap_total_gb: f64,
}

pub struct PartitionUsage {
    pub device: String,
    pub mount: String,
    pub capacity_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
}

pub struct InterfaceLink {
    pub name: String,
    pub speed_mbps: Option<u64>,
}

pub struct OsOverview {
    pub name: Option<String>,
    pub long_version: Option<String>,
    pub kernel_build: Option<String>,
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProbe {
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Arc::new(std::sync::Mutex::new(sys)),
            components: Arc::new(std::sync::Mutex::new(
                Components::new_with_refreshed_list(),
            )),
            disks: Arc::new(std::sync::Mutex::new(Disks::new_with_refreshed_list())),
            networks: Arc::new(std::sync::Mutex::new(Networks::new_with_refreshed_list())),
        }
    }

    #[instrument(skip(self), fields(probe = "sysinfo", operation = "cpu_overview"))]
    pub async fn cpu_overview(&self) -> ProbeResult<CpuOverview> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| ProbeError::Unavailable(format!("sysinfo lock poisoned: {e}")))?;

            // Usage needs two refreshes separated by the crate's minimum
            // interval; a one-shot scan pays that wait here.
            sys.refresh_cpu_all();
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            sys.refresh_cpu_all();

            let model = platform::cpu_model().or_else(|| {
                sys.cpus()
                    .first()
                    .map(|c| c.name().to_string())
                    .filter(|s| !s.is_empty() && s != "cpu0")
            });
            let physical = System::physical_core_count().map(|n| n as u32);
            let logical = match sys.cpus().len() {
                0 => None,
                n => Some(n as u32),
            };
            let current_clock_ghz = sys
                .cpus()
                .first()
                .map(|c| c.frequency())
                .filter(|mhz| *mhz > 0)
                .map(|mhz| round2(mhz as f64 / 1000.0));
            let usage_per_core = sys
                .cpus()
                .iter()
                .map(|c| round1(c.cpu_usage() as f64))
                .collect();

            Ok(CpuOverview {
                model,
                physical_cores: physical,
                logical_cores: logical,
                current_clock_ghz,
                usage_per_core,
            })
        })
        .await
        .map_err(|e| ProbeError::Unavailable(format!("sysinfo task join: {e}")))?
    }

    #[instrument(skip(self), fields(probe = "sysinfo", operation = "memory_overview"))]
    pub async fn memory_overview(&self) -> ProbeResult<MemoryOverview> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| ProbeError::Unavailable(format!("sysinfo lock poisoned: {e}")))?;
            sys.refresh_memory();

            let total = sys.total_memory();
            if total == 0 {
                return Err(ProbeError::Parse("total memory reported as zero".into()));
            }
            let used = total.saturating_sub(sys.available_memory());
            Ok(MemoryOverview {
                total_gb: bytes_to_gb(total),
                used_gb: bytes_to_gb(used),
                usage_percent: round1(used as f64 / total as f64 * 100.0),
                swap_total_gb: bytes_to_gb(sys.total_swap()),
            })
        })
        .await
        .map_err(|e| ProbeError::Unavailable(format!("sysinfo task join: {e}")))?
    }

    #[instrument(skip(self), fields(probe = "sysinfo", operation = "partitions"))]
    pub async fn partitions(&self) -> ProbeResult<Vec<PartitionUsage>> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks = disks
                .lock()
                .map_err(|e| ProbeError::Unavailable(format!("sysinfo disks lock poisoned: {e}")))?;
            disks.refresh(false);
            let partitions: Vec<PartitionUsage> = disks
                .list()
                .iter()
                .filter(|d| d.total_space() > 0)
                .map(|d| {
                    let total = d.total_space();
                    let available = d.available_space();
                    let used = total.saturating_sub(available);
                    PartitionUsage {
                        device: d.name().to_string_lossy().into_owned(),
                        mount: d.mount_point().to_string_lossy().into_owned(),
                        capacity_gb: bytes_to_gb(total),
                        used_gb: bytes_to_gb(used),
                        free_gb: bytes_to_gb(available),
                    }
                })
                .collect();
            if partitions.is_empty() {
                return Err(ProbeError::Unavailable("no mounted filesystems".into()));
            }
            Ok(partitions)
        })
        .await
        .map_err(|e| ProbeError::Unavailable(format!("sysinfo task join: {e}")))?
    }

    /// First temperature whose sensor label contains one of `markers`
    /// (case-insensitive).
    #[instrument(skip(self), fields(probe = "sysinfo", operation = "component_temp"))]
    pub async fn component_temp(&self, markers: &'static [&'static str]) -> ProbeResult<f64> {
        let components = self.components.clone();
        tokio::task::spawn_blocking(move || {
            let mut components = components.lock().map_err(|e| {
                ProbeError::Unavailable(format!("sysinfo components lock poisoned: {e}"))
            })?;
            components.refresh(false);
            for component in components.list() {
                let label = component.label().to_ascii_lowercase();
                if markers.iter().any(|m| label.contains(m))
                    && let Some(temp) = component.temperature()
                {
                    return Ok(round1(temp as f64));
                }
            }
            Err(ProbeError::Unavailable(
                "no matching temperature sensor".into(),
            ))
        })
        .await
        .map_err(|e| ProbeError::Unavailable(format!("sysinfo task join: {e}")))?
    }

    #[instrument(skip(self), fields(probe = "sysinfo", operation = "interfaces"))]
    pub async fn interfaces(&self) -> ProbeResult<Vec<InterfaceLink>> {
        let networks = self.networks.clone();
        tokio::task::spawn_blocking(move || {
            let mut networks = networks.lock().map_err(|e| {
                ProbeError::Unavailable(format!("sysinfo networks lock poisoned: {e}"))
            })?;
            networks.refresh(true);
            let interfaces: Vec<InterfaceLink> = networks
                .list()
                .iter()
                .map(|(name, _)| InterfaceLink {
                    name: name.clone(),
                    speed_mbps: platform::interface_speed_mbps(name),
                })
                .collect();
            if interfaces.is_empty() {
                return Err(ProbeError::Unavailable("no network interfaces".into()));
            }
            Ok(interfaces)
        })
        .await
        .map_err(|e| ProbeError::Unavailable(format!("sysinfo task join: {e}")))?
    }

    #[instrument(skip(self), fields(probe = "sysinfo", operation = "os_overview"))]
    pub async fn os_overview(&self) -> ProbeResult<OsOverview> {
        tokio::task::spawn_blocking(|| {
            Ok(OsOverview {
                name: System::name(),
                long_version: System::long_os_version(),
                kernel_build: System::kernel_version(),
            })
        })
        .await
        .map_err(|e| ProbeError::Unavailable(format!("sysinfo task join: {e}")))?
    }
}
