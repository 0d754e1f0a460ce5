// Domain collectors.
//
// One module per snapshot domain. Each owns its record: it walks the
// ranked providers for every field, keeps the first value that resolves,
// and returns a best-effort record even when every provider fails.

pub mod firmware;
pub mod graphics;
pub mod mainboard;
pub mod memory;
pub mod network;
pub mod os;
pub mod processor;
pub mod storage;
