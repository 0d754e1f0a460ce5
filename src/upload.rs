use std::time::Duration;

use anyhow::{Context, ensure};

use crate::models::Snapshot;
use crate::version;

/// POSTs the snapshot JSON to the collection endpoint. Failures here are
/// reported to the caller but never invalidate the local scan result.
pub async fn upload_snapshot(
    snapshot: &Snapshot,
    url: &str,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let body = serde_json::to_string(snapshot).context("serializing snapshot")?;
    let client = reqwest::Client::builder()
        .user_agent(version::user_agent())
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("building http client")?;

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .body(body)
        .send()
        .await
        .with_context(|| format!("posting snapshot to {url}"))?;

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    ensure!(
        status.is_success(),
        "upload rejected with {status}: {}",
        preview(&text)
    );
    tracing::info!(%status, body = %preview(&text), "scan uploaded");
    Ok(())
}

// char-based so a multi-byte response cannot split mid-codepoint
fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}
