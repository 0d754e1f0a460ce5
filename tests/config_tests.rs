// Config loading and validation tests

use rigscan::config::AppConfig;

const VALID_CONFIG: &str = r#"
[scan]
command_timeout_secs = 5
powershell_timeout_secs = 20
ping_timeout_secs = 4
ping_host = "1.1.1.1"

[upload]
url = "https://scans.example.com/api/scan"
timeout_secs = 30
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.scan.command_timeout_secs, 5);
    assert_eq!(config.scan.powershell_timeout_secs, 20);
    assert_eq!(config.scan.ping_timeout_secs, 4);
    assert_eq!(config.scan.ping_host, "1.1.1.1");
    assert_eq!(config.upload.url, "https://scans.example.com/api/scan");
    assert_eq!(config.upload.timeout_secs, 30);
}

#[test]
fn test_config_defaults_when_no_file_given() {
    let config = AppConfig::load(None).expect("defaults");
    assert_eq!(config.scan.command_timeout_secs, 10);
    assert_eq!(config.scan.powershell_timeout_secs, 15);
    assert_eq!(config.scan.ping_timeout_secs, 8);
    assert_eq!(config.scan.ping_host, "8.8.8.8");
    assert_eq!(config.upload.url, "http://localhost:3000/api/scan");
    assert_eq!(config.upload.timeout_secs, 15);
}

#[test]
fn test_config_sections_default_when_omitted() {
    let config = AppConfig::load_from_str("[scan]\nping_host = \"10.0.0.1\"\n").expect("partial");
    assert_eq!(config.scan.ping_host, "10.0.0.1");
    assert_eq!(config.scan.command_timeout_secs, 10);
    assert_eq!(config.upload.timeout_secs, 15);
}

#[test]
fn test_config_validation_rejects_command_timeout_zero() {
    let bad = VALID_CONFIG.replace("command_timeout_secs = 5", "command_timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("scan.command_timeout_secs"));
}

#[test]
fn test_config_validation_rejects_powershell_timeout_zero() {
    let bad = VALID_CONFIG.replace("powershell_timeout_secs = 20", "powershell_timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("scan.powershell_timeout_secs"));
}

#[test]
fn test_config_validation_rejects_ping_timeout_zero() {
    let bad = VALID_CONFIG.replace("ping_timeout_secs = 4", "ping_timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("scan.ping_timeout_secs"));
}

#[test]
fn test_config_validation_rejects_empty_ping_host() {
    let bad = VALID_CONFIG.replace("ping_host = \"1.1.1.1\"", "ping_host = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("scan.ping_host"));
}

#[test]
fn test_config_validation_rejects_empty_upload_url() {
    let bad = VALID_CONFIG.replace(
        "url = \"https://scans.example.com/api/scan\"",
        "url = \"\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("upload.url"));
}

#[test]
fn test_config_validation_rejects_upload_timeout_zero() {
    let bad = VALID_CONFIG.replace("timeout_secs = 30", "timeout_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("upload.timeout_secs"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    let config = AppConfig::load(Some(&path)).expect("load from file");
    assert_eq!(config.scan.command_timeout_secs, 5);
    assert_eq!(config.upload.timeout_secs, 30);
}

#[test]
fn test_config_load_missing_file_errors() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");
    assert!(AppConfig::load(Some(&path)).is_err());
}
