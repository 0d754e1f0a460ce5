// One-shot scan orchestration.

use crate::collect;
use crate::config::AppConfig;
use crate::models::Snapshot;
use crate::parse;
use crate::probes::Probes;
use crate::rules;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Runs every domain collector concurrently and assembles the snapshot.
/// Never fails: a machine where every provider is broken still produces
/// a snapshot, just one full of absent fields.
pub async fn scan(config: &AppConfig) -> Snapshot {
    let started = Instant::now();
    let scan_id = Uuid::new_v4().to_string();
    let timestamp = Utc::now().to_rfc3339();
    let probes = Arc::new(Probes::new(&config.scan));

    tracing::info!(scan_id = %scan_id, "starting system scan");

    let handle = probes.clone();
    let processor_task = tokio::spawn(async move {
        tracing::info!(domain = "processor", "collecting");
        collect::processor::collect(&handle).await
    });
    let handle = probes.clone();
    let graphics_task = tokio::spawn(async move {
        tracing::info!(domain = "graphics", "collecting");
        collect::graphics::collect(&handle).await
    });
    let handle = probes.clone();
    let memory_task = tokio::spawn(async move {
        tracing::info!(domain = "memory", "collecting");
        collect::memory::collect(&handle).await
    });
    let handle = probes.clone();
    let storage_task = tokio::spawn(async move {
        tracing::info!(domain = "storage", "collecting");
        collect::storage::collect(&handle).await
    });
    let handle = probes.clone();
    let mainboard_task = tokio::spawn(async move {
        tracing::info!(domain = "mainboard", "collecting");
        collect::mainboard::collect(&handle).await
    });
    let handle = probes.clone();
    let os_task = tokio::spawn(async move {
        tracing::info!(domain = "os", "collecting");
        collect::os::collect(&handle).await
    });
    let handle = probes.clone();
    let network_task = tokio::spawn(async move {
        tracing::info!(domain = "network", "collecting");
        collect::network::collect(&handle).await
    });

    // Firmware derives its XMP verdict from the finished memory record.
    let memory = join_domain("memory", memory_task).await;
    let handle = probes.clone();
    let memory_for_firmware = memory.clone();
    let firmware_task = tokio::spawn(async move {
        tracing::info!(domain = "firmware", "collecting");
        collect::firmware::collect(&handle, &memory_for_firmware).await
    });

    let processor = join_domain("processor", processor_task).await;
    let graphics = join_domain("graphics", graphics_task).await;
    let storage = join_domain("storage", storage_task).await;
    let mainboard = join_domain("mainboard", mainboard_task).await;
    let os = join_domain("os", os_task).await;
    let network = join_domain("network", network_task).await;
    let firmware = join_domain("firmware", firmware_task).await;

    let issues = rules::evaluate(&processor, &graphics, &memory, &storage, &os, &firmware);
    let scan_duration_seconds = parse::round2(started.elapsed().as_secs_f64());
    tracing::info!(
        issues = issues.len(),
        duration_s = scan_duration_seconds,
        "scan complete"
    );

    Snapshot {
        scan_id,
        timestamp,
        scan_duration_seconds,
        processor,
        graphics,
        memory,
        storage,
        mainboard,
        os,
        network,
        firmware,
        issues,
    }
}

/// A panicked or cancelled collector degrades to an empty record; the
/// scan itself never aborts.
async fn join_domain<T: Default>(domain: &'static str, task: JoinHandle<T>) -> T {
    match task.await {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(domain, error = %e, "collector task failed; recording empty domain");
            T::default()
        }
    }
}
