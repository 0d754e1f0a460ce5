// Scan snapshot: all domain records plus run metadata

use serde::{Deserialize, Serialize};

use super::{
    FirmwareRecord, GraphicsRecord, MainboardRecord, MemoryRecord, NetworkRecord, OsRecord,
    ProcessorRecord, StorageRecord,
};

/// The complete result of one scan. Assembled once, never mutated after;
/// persistence, reporting, and upload all read the same instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub scan_id: String,
    /// RFC 3339 UTC timestamp taken when the scan started.
    pub timestamp: String,
    pub scan_duration_seconds: f64,
    pub processor: ProcessorRecord,
    pub graphics: GraphicsRecord,
    pub memory: MemoryRecord,
    pub storage: Vec<StorageRecord>,
    pub mainboard: MainboardRecord,
    pub os: OsRecord,
    pub network: NetworkRecord,
    pub firmware: FirmwareRecord,
    /// Findings in rule order; empty when nothing matched.
    pub issues: Vec<String>,
}
