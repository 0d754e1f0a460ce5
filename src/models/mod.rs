// Snapshot record models

mod firmware;
mod graphics;
mod mainboard;
mod memory;
mod network;
mod os;
mod processor;
mod snapshot;
mod storage;

pub use firmware::FirmwareRecord;
pub use graphics::GraphicsRecord;
pub use mainboard::MainboardRecord;
pub use memory::{ChannelMode, MemoryRecord, MemoryTimings};
pub use network::{ConnectionType, NetworkRecord};
pub use os::OsRecord;
pub use processor::ProcessorRecord;
pub use snapshot::Snapshot;
pub use storage::{DriveKind, StorageRecord};
