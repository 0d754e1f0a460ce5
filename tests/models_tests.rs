// Model serialization tests (JSON camelCase, explicit nulls)

use rigscan::models::*;

#[test]
fn test_processor_record_serialization_camel_case() {
    let cpu = ProcessorRecord {
        model_name: Some("AMD Ryzen 7 5800X".into()),
        physical_cores: Some(8),
        logical_cores: Some(16),
        base_clock_ghz: Some(3.8),
        current_temp_c: Some(62.0),
        usage_per_core: vec![10.0, 12.5],
        ..ProcessorRecord::default()
    };
    let json = serde_json::to_string(&cpu).unwrap();
    assert!(json.contains("\"modelName\""));
    assert!(json.contains("\"physicalCores\""));
    assert!(json.contains("\"baseClockGhz\""));
    assert!(json.contains("\"usagePerCore\""));
    let back: ProcessorRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cpu);
}

#[test]
fn test_absent_fields_serialize_as_null() {
    let json = serde_json::to_string(&ProcessorRecord::default()).unwrap();
    assert!(json.contains("\"modelName\":null"));
    assert!(json.contains("\"currentTempC\":null"));
    assert!(json.contains("\"usagePerCore\":[]"));
}

#[test]
fn test_drive_kind_serialization_labels() {
    assert_eq!(
        serde_json::to_string(&DriveKind::NvmeSsd).unwrap(),
        "\"NVMe SSD\""
    );
    assert_eq!(
        serde_json::to_string(&DriveKind::SataSsd).unwrap(),
        "\"SATA SSD\""
    );
    assert_eq!(serde_json::to_string(&DriveKind::Hdd).unwrap(), "\"HDD\"");
    let back: DriveKind = serde_json::from_str("\"NVMe SSD\"").unwrap();
    assert_eq!(back, DriveKind::NvmeSsd);
}

#[test]
fn test_storage_record_kind_serializes_as_type() {
    let drive = StorageRecord {
        model: Some("Samsung 980 Pro".into()),
        kind: Some(DriveKind::NvmeSsd),
        capacity_gb: Some(1000.0),
        is_boot_drive: true,
        ..StorageRecord::default()
    };
    let json = serde_json::to_string(&drive).unwrap();
    assert!(json.contains("\"type\":\"NVMe SSD\""));
    assert!(json.contains("\"isBootDrive\":true"));
    assert!(!json.contains("\"kind\""));
    let back: StorageRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, drive);
}

#[test]
fn test_channel_mode_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&ChannelMode::Dual).unwrap(),
        "\"dual\""
    );
    assert_eq!(
        serde_json::to_string(&ChannelMode::Quad).unwrap(),
        "\"quad\""
    );
    let back: ChannelMode = serde_json::from_str("\"single\"").unwrap();
    assert_eq!(back, ChannelMode::Single);
}

#[test]
fn test_channel_mode_labels() {
    assert_eq!(ChannelMode::Single.label(), "Single");
    assert_eq!(ChannelMode::Dual.label(), "Dual");
    assert_eq!(ChannelMode::Triple.label(), "Triple");
    assert_eq!(ChannelMode::Quad.label(), "Quad");
}

#[test]
fn test_connection_type_serialization() {
    assert_eq!(
        serde_json::to_string(&ConnectionType::Wifi).unwrap(),
        "\"WiFi\""
    );
    assert_eq!(
        serde_json::to_string(&ConnectionType::Ethernet).unwrap(),
        "\"Ethernet\""
    );
    assert_eq!(
        serde_json::to_string(&ConnectionType::Other("Wired".into())).unwrap(),
        "\"Wired\""
    );
}

#[test]
fn test_connection_type_deserialization_prefers_known_variants() {
    let wifi: ConnectionType = serde_json::from_str("\"WiFi\"").unwrap();
    assert_eq!(wifi, ConnectionType::Wifi);
    let other: ConnectionType = serde_json::from_str("\"Bluetooth PAN\"").unwrap();
    assert_eq!(other, ConnectionType::Other("Bluetooth PAN".into()));
}

#[test]
fn test_memory_record_json_roundtrip() {
    let ram = MemoryRecord {
        total_gb: Some(32.0),
        speed_mhz: Some(3600),
        rated_speed_mhz: Some(3600),
        num_sticks: Some(2),
        channel_mode: Some(ChannelMode::Dual),
        form_factor: Some("DIMM".into()),
        ..MemoryRecord::default()
    };
    let json = serde_json::to_string(&ram).unwrap();
    assert!(json.contains("\"totalGb\""));
    assert!(json.contains("\"channelMode\":\"dual\""));
    assert!(json.contains("\"ratedSpeedMhz\""));
    let back: MemoryRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ram);
}

#[test]
fn test_memory_timings_default_is_all_null() {
    let json = serde_json::to_string(&MemoryTimings::default()).unwrap();
    assert!(json.contains("\"cl\":null"));
    assert!(json.contains("\"tras\":null"));
}

#[test]
fn test_snapshot_serialization() {
    let snapshot = Snapshot {
        scan_id: "f3b9".into(),
        timestamp: "2025-01-01T00:00:00+00:00".into(),
        scan_duration_seconds: 4.21,
        processor: ProcessorRecord::default(),
        graphics: GraphicsRecord::default(),
        memory: MemoryRecord::default(),
        storage: vec![StorageRecord::default()],
        mainboard: MainboardRecord::default(),
        os: OsRecord::default(),
        network: NetworkRecord::default(),
        firmware: FirmwareRecord::default(),
        issues: vec!["RAM running in single-channel mode -- dual-channel provides significantly better performance".into()],
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"scanId\":\"f3b9\""));
    assert!(json.contains("\"scanDurationSeconds\":4.21"));
    assert!(json.contains("\"issues\""));
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.scan_id, snapshot.scan_id);
    assert_eq!(back.issues.len(), 1);
    assert_eq!(back.storage.len(), 1);
}

#[test]
fn test_os_record_serialization_camel_case() {
    let os = OsRecord {
        version: Some("Windows 11 Pro 24H2".into()),
        build_number: Some("26100".into()),
        power_plan: Some("High performance".into()),
        game_mode: Some(true),
        hw_accelerated_gpu_scheduling: Some(false),
        virtual_memory_gb: Some(8.0),
    };
    let json = serde_json::to_string(&os).unwrap();
    assert!(json.contains("\"buildNumber\""));
    assert!(json.contains("\"hwAcceleratedGpuScheduling\":false"));
    assert!(json.contains("\"gameMode\":true"));
    let back: OsRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, os);
}

#[test]
fn test_firmware_record_json_roundtrip() {
    let fw = FirmwareRecord {
        xmp_enabled: Some(false),
        resizable_bar: Some(true),
        tpm_status: Some("enabled".into()),
        virtualization: None,
        secure_boot: Some(true),
    };
    let json = serde_json::to_string(&fw).unwrap();
    assert!(json.contains("\"xmpEnabled\":false"));
    assert!(json.contains("\"resizableBar\":true"));
    assert!(json.contains("\"virtualization\":null"));
    let back: FirmwareRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, fw);
}
