// Probe plumbing tests: nvidia-smi CSV rows, CIM JSON decoding, and the
// bounded subprocess runner

use rigscan::probes::nvidia::{SmiReading, parse_query_row};
use rigscan::probes::runner;
use rigscan::probes::windows::{CimRow, json_rows, row_bool, row_f64, row_str, row_u64};
use rigscan::resolver::ProbeError;
use serde_json::json;
use std::time::Duration;

fn cim_row(value: serde_json::Value) -> CimRow {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_parse_query_row_full_row() {
    let line = "NVIDIA GeForce RTX 3070, 8192, 1024, 1905, 6800, 62, 35, 551.23, 3, 4, 16";
    let reading = parse_query_row(line).unwrap();
    assert_eq!(reading.name.as_deref(), Some("NVIDIA GeForce RTX 3070"));
    assert_eq!(reading.memory_total_mib, Some(8192.0));
    assert_eq!(reading.memory_used_mib, Some(1024.0));
    assert_eq!(reading.graphics_clock_mhz, Some(1905.0));
    assert_eq!(reading.memory_clock_mhz, Some(6800.0));
    assert_eq!(reading.temperature_c, Some(62.0));
    assert_eq!(reading.fan_speed_pct, Some(35.0));
    assert_eq!(reading.driver_version.as_deref(), Some("551.23"));
    assert_eq!(reading.utilization_pct, Some(3.0));
    assert_eq!(reading.pcie_gen, Some(4));
    assert_eq!(reading.pcie_width, Some(16));
}

#[test]
fn test_parse_query_row_not_available_cells() {
    // Laptop and passthrough GPUs answer [N/A] for fan and PCIe columns.
    let line =
        "NVIDIA T600 Laptop GPU, 4096, [N/A], [N/A], [N/A], 45, [N/A], 538.27, N/A, [N/A], [N/A]";
    let reading = parse_query_row(line).unwrap();
    assert_eq!(reading.name.as_deref(), Some("NVIDIA T600 Laptop GPU"));
    assert_eq!(reading.memory_total_mib, Some(4096.0));
    assert_eq!(reading.memory_used_mib, None);
    assert_eq!(reading.temperature_c, Some(45.0));
    assert_eq!(reading.fan_speed_pct, None);
    assert_eq!(reading.driver_version.as_deref(), Some("538.27"));
    assert_eq!(reading.utilization_pct, None);
    assert_eq!(reading.pcie_gen, None);
    assert_eq!(reading.pcie_width, None);
}

#[test]
fn test_parse_query_row_all_cells_empty() {
    assert_eq!(parse_query_row(",,,,,,,,,,").unwrap(), SmiReading::default());
}

#[test]
fn test_parse_query_row_rejects_short_rows() {
    let err = parse_query_row("NVIDIA GeForce RTX 3070, 8192").unwrap_err();
    assert!(err.to_string().contains("expected 11"), "got: {err}");
}

#[test]
fn test_parse_query_row_tolerates_extra_columns() {
    let line = "GPU, 8192, 0, 210, 405, 38, 0, 555.42, 0, 4, 16, surplus";
    let reading = parse_query_row(line).unwrap();
    assert_eq!(reading.name.as_deref(), Some("GPU"));
    assert_eq!(reading.pcie_width, Some(16));
}

#[test]
fn test_json_rows_single_object() {
    let rows = json_rows(r#"{"Name":"Intel(R) Core(TM) i5-12400F","NumberOfCores":6}"#).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        row_str(&rows[0], "Name").as_deref(),
        Some("Intel(R) Core(TM) i5-12400F")
    );
    assert_eq!(row_u64(&rows[0], "NumberOfCores"), Some(6));
}

#[test]
fn test_json_rows_array_keeps_objects_only() {
    let rows = json_rows(r#"[{"DeviceID":"C:"},null,{"DeviceID":"D:"},7]"#).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(row_str(&rows[1], "DeviceID").as_deref(), Some("D:"));
}

#[test]
fn test_json_rows_rejects_empty_and_scalar_payloads() {
    let err = json_rows("[]").unwrap_err();
    assert!(err.to_string().contains("no object rows"), "got: {err}");

    let err = json_rows("42").unwrap_err();
    assert!(err.to_string().contains("unexpected number"), "got: {err}");

    let err = json_rows("not json at all").unwrap_err();
    assert!(err.to_string().contains("cim json"), "got: {err}");
}

#[test]
fn test_row_str_normalizes_values() {
    let row = cim_row(json!({
        "Name": "  Samsung SSD 980 PRO 1TB  ",
        "Blank": "   ",
        "Index": 2,
        "Removable": false,
        "Missing": null
    }));
    assert_eq!(row_str(&row, "Name").as_deref(), Some("Samsung SSD 980 PRO 1TB"));
    assert_eq!(row_str(&row, "Blank"), None);
    assert_eq!(row_str(&row, "Index").as_deref(), Some("2"));
    assert_eq!(row_str(&row, "Removable").as_deref(), Some("false"));
    assert_eq!(row_str(&row, "Missing"), None);
    assert_eq!(row_str(&row, "Absent"), None);
}

#[test]
fn test_row_numeric_accessors() {
    let row = cim_row(json!({
        "Speed": 3600,
        "SpeedText": "3600",
        "Temp": 44.95,
        "TempText": "44,95",
        "Negative": -1,
        "Word": "fast"
    }));
    assert_eq!(row_u64(&row, "Speed"), Some(3600));
    assert_eq!(row_u64(&row, "SpeedText"), Some(3600));
    assert_eq!(row_u64(&row, "Negative"), None);
    assert_eq!(row_u64(&row, "Word"), None);
    assert_eq!(row_f64(&row, "Temp"), Some(44.95));
    assert_eq!(row_f64(&row, "TempText"), Some(44.95));
    assert_eq!(row_f64(&row, "Word"), None);
}

#[test]
fn test_row_bool_accepts_common_encodings() {
    let row = cim_row(json!({
        "Plain": true,
        "Text": "True",
        "TextOff": " FALSE ",
        "Bit": 1,
        "Zero": 0,
        "Word": "yes"
    }));
    assert_eq!(row_bool(&row, "Plain"), Some(true));
    assert_eq!(row_bool(&row, "Text"), Some(true));
    assert_eq!(row_bool(&row, "TextOff"), Some(false));
    assert_eq!(row_bool(&row, "Bit"), Some(true));
    assert_eq!(row_bool(&row, "Zero"), Some(false));
    assert_eq!(row_bool(&row, "Word"), None);
}

#[tokio::test]
async fn test_run_command_missing_binary_is_unavailable() {
    let err = runner::run_command("rigscan-no-such-tool", &[], Duration::from_secs(2))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Unavailable(_)), "got: {err}");
    assert!(err.to_string().contains("rigscan-no-such-tool"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_command_trims_output() {
    let out = runner::run_command("echo", &["  ping ok  "], Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(out, "ping ok");
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_command_empty_output_is_parse_error() {
    let err = runner::run_command("true", &[], Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Parse(_)), "got: {err}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_command_enforces_timeout() {
    let err = runner::run_command("sleep", &["5"], Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Timeout(_)), "got: {err}");
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_command_nonzero_exit_is_unavailable() {
    let err = runner::run_command("false", &[], Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Unavailable(_)), "got: {err}");
}
