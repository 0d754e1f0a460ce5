use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::models::Snapshot;

/// Writes the snapshot as pretty-printed JSON and returns the absolute path.
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> anyhow::Result<PathBuf> {
    let json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    path.canonicalize()
        .with_context(|| format!("resolving {}", path.display()))
}
