// Bounded subprocess execution.
//
// Every external tool call in the scanner goes through run_command: one
// timeout, kill-on-drop, and output decoding in a single place. A hung or
// missing tool surfaces as a ProbeError, never as a hang or panic.

use crate::resolver::{ProbeError, ProbeResult};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub async fn run_command(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> ProbeResult<String> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ProbeError::Unavailable(format!("{program}: {e}")))?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ProbeError::Timeout(timeout))?
        .map_err(|e| ProbeError::Unavailable(format!("{program}: {e}")))?;

    if !output.status.success() {
        return Err(ProbeError::Unavailable(format!(
            "{program} exited with {}",
            output.status
        )));
    }

    let text = decode_console_output(&output.stdout);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ProbeError::Parse(format!("{program}: empty output")));
    }
    Ok(trimmed.to_string())
}

/// Console tools on Windows sometimes emit UTF-16LE instead of UTF-8.
fn decode_console_output(bytes: &[u8]) -> String {
    if let Ok(utf8) = std::str::from_utf8(bytes) {
        return utf8.to_string();
    }
    if bytes.len() >= 2 && bytes.len() % 2 == 0 {
        let wide: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        if let Ok(s) = String::from_utf16(&wide) {
            return s;
        }
    }
    String::from_utf8_lossy(bytes).to_string()
}
