// Collector helper tests: drive typing, stick aggregation, adapter
// classification, firmware verdicts

use rigscan::collect::{firmware, memory, network, os, storage};
use rigscan::models::{ChannelMode, ConnectionType, DriveKind};

#[test]
fn test_infer_drive_kind_nvme_from_model() {
    let (kind, iface) = storage::infer_drive_kind("Samsung SSD 980 PRO NVMe", "SCSI", "");
    assert_eq!(kind, Some(DriveKind::NvmeSsd));
    assert_eq!(iface.as_deref(), Some("NVMe"));
}

#[test]
fn test_infer_drive_kind_nvme_from_interface() {
    let (kind, iface) = storage::infer_drive_kind("WD_BLACK SN850X", "NVMe", "Fixed hard disk media");
    assert_eq!(kind, Some(DriveKind::NvmeSsd));
    assert_eq!(iface.as_deref(), Some("NVMe"));
}

#[test]
fn test_infer_drive_kind_sata_ssd_from_model() {
    let (kind, iface) =
        storage::infer_drive_kind("Crucial MX500 SSD", "SATA", "Fixed hard disk media");
    assert_eq!(kind, Some(DriveKind::SataSsd));
    assert_eq!(iface.as_deref(), Some("SATA"));
}

#[test]
fn test_infer_drive_kind_fixed_media_hdd_keyword() {
    let (kind, _) =
        storage::infer_drive_kind("ST2000DM008 Barracuda", "SATA", "Fixed hard disk media");
    assert_eq!(kind, Some(DriveKind::Hdd));
}

#[test]
fn test_infer_drive_kind_fixed_media_defaults_to_ssd() {
    // fixed media without a mechanical marker is most likely an SSD
    let (kind, _) = storage::infer_drive_kind("SK hynix BC711", "SATA", "Fixed hard disk media");
    assert_eq!(kind, Some(DriveKind::SataSsd));
}

#[test]
fn test_infer_drive_kind_sata_without_media_class_is_hdd() {
    let (kind, iface) = storage::infer_drive_kind("WDC WD40EZRZ-00GXCB0", "IDE", "");
    assert_eq!(kind, Some(DriveKind::Hdd));
    assert_eq!(iface.as_deref(), Some("SATA"));
}

#[test]
fn test_infer_drive_kind_unrecognized_interface_stays_undecided() {
    let (kind, iface) = storage::infer_drive_kind("SanDisk Extreme 55AE", "USB", "External");
    assert_eq!(kind, None);
    assert_eq!(iface.as_deref(), Some("USB"));
}

#[test]
fn test_infer_drive_kind_empty_inputs() {
    let (kind, iface) = storage::infer_drive_kind("", "", "");
    assert_eq!(kind, None);
    assert_eq!(iface, None);
}

#[test]
fn test_refine_kind_tables() {
    assert_eq!(storage::refine_kind("SSD", "NVMe"), Some(DriveKind::NvmeSsd));
    assert_eq!(storage::refine_kind("4", "17"), Some(DriveKind::NvmeSsd));
    assert_eq!(storage::refine_kind("SSD", "SATA"), Some(DriveKind::SataSsd));
    assert_eq!(storage::refine_kind("4", "11"), Some(DriveKind::SataSsd));
    assert_eq!(storage::refine_kind("HDD", "SATA"), Some(DriveKind::Hdd));
    assert_eq!(storage::refine_kind("3", "11"), Some(DriveKind::Hdd));
    assert_eq!(storage::refine_kind("Unspecified", "RAID"), None);
    assert_eq!(storage::refine_kind("", ""), None);
}

#[test]
fn test_aggregate_sticks_empty_is_none() {
    assert_eq!(memory::aggregate_sticks(&[]), None);
}

#[test]
fn test_aggregate_sticks_min_configured_max_rated() {
    let sticks = vec![
        memory::StickReading {
            configured_mhz: Some(3200),
            rated_mhz: Some(3600),
            form_factor: Some("DIMM".into()),
        },
        memory::StickReading {
            configured_mhz: Some(3000),
            rated_mhz: Some(3200),
            form_factor: Some("DIMM".into()),
        },
    ];
    let agg = memory::aggregate_sticks(&sticks).expect("aggregate");
    assert_eq!(agg.num_sticks, 2);
    assert_eq!(agg.speed_mhz, Some(3000));
    assert_eq!(agg.rated_speed_mhz, Some(3600));
    assert_eq!(agg.form_factor.as_deref(), Some("DIMM"));
}

#[test]
fn test_aggregate_sticks_ignores_zero_speeds() {
    let sticks = vec![
        memory::StickReading {
            configured_mhz: Some(0),
            rated_mhz: Some(0),
            form_factor: None,
        },
        memory::StickReading {
            configured_mhz: Some(2400),
            rated_mhz: None,
            form_factor: None,
        },
    ];
    let agg = memory::aggregate_sticks(&sticks).expect("aggregate");
    assert_eq!(agg.speed_mhz, Some(2400));
    assert_eq!(agg.rated_speed_mhz, None);
}

#[test]
fn test_channel_mode_for_sticks_table() {
    assert_eq!(memory::channel_mode_for_sticks(0), None);
    assert_eq!(memory::channel_mode_for_sticks(1), Some(ChannelMode::Single));
    assert_eq!(memory::channel_mode_for_sticks(2), Some(ChannelMode::Dual));
    assert_eq!(memory::channel_mode_for_sticks(3), Some(ChannelMode::Triple));
    assert_eq!(memory::channel_mode_for_sticks(4), Some(ChannelMode::Quad));
    assert_eq!(memory::channel_mode_for_sticks(5), Some(ChannelMode::Quad));
    assert_eq!(memory::channel_mode_for_sticks(6), Some(ChannelMode::Triple));
    assert_eq!(memory::channel_mode_for_sticks(8), Some(ChannelMode::Quad));
}

#[test]
fn test_form_factor_label() {
    assert_eq!(memory::form_factor_label(8), "DIMM");
    assert_eq!(memory::form_factor_label(12), "SODIMM");
    assert_eq!(memory::form_factor_label(0), "code_0");
}

#[test]
fn test_classify_adapter_wifi_names() {
    for name in [
        "Intel(R) Wi-Fi 6 AX200 160MHz",
        "Qualcomm Atheros Wireless Network Adapter",
        "WLAN Module",
    ] {
        assert_eq!(
            network::classify_adapter(name, ""),
            Some(ConnectionType::Wifi),
            "{name}"
        );
    }
}

#[test]
fn test_classify_adapter_ethernet_names() {
    for name in [
        "Realtek PCIe GbE Family Controller",
        "Intel I225-V",
        "Killer E3100G 2.5 Gigabit Ethernet Controller",
    ] {
        assert_eq!(
            network::classify_adapter(name, ""),
            Some(ConnectionType::Ethernet),
            "{name}"
        );
    }
}

#[test]
fn test_classify_adapter_falls_back_to_adapter_type() {
    assert_eq!(
        network::classify_adapter("Generic NIC", "Ethernet 802.3"),
        Some(ConnectionType::Ethernet)
    );
    assert_eq!(
        network::classify_adapter("Some Modem", "Point-to-Point"),
        Some(ConnectionType::Other("Point-to-Point".into()))
    );
    assert_eq!(network::classify_adapter("Some Modem", ""), None);
}

#[test]
fn test_classify_interface_names() {
    assert_eq!(network::classify_interface("wlan0"), ConnectionType::Wifi);
    assert_eq!(network::classify_interface("eth0"), ConnectionType::Ethernet);
    assert_eq!(
        network::classify_interface("enp3s0"),
        ConnectionType::Other("Connected".into())
    );
}

#[test]
fn test_xmp_state_bands() {
    // at or above 95% of rated: profile active
    assert_eq!(firmware::xmp_state(Some(3600), Some(3600)), Some(true));
    assert_eq!(firmware::xmp_state(Some(3420), Some(3600)), Some(true));
    // below 80%: JEDEC defaults
    assert_eq!(firmware::xmp_state(Some(2133), Some(3600)), Some(false));
    // in between: undecided
    assert_eq!(firmware::xmp_state(Some(3200), Some(3600)), None);
    // absent or zero input: undecided
    assert_eq!(firmware::xmp_state(None, Some(3600)), None);
    assert_eq!(firmware::xmp_state(Some(3600), None), None);
    assert_eq!(firmware::xmp_state(Some(0), Some(3600)), None);
    assert_eq!(firmware::xmp_state(Some(3600), Some(0)), None);
}

#[test]
fn test_refine_windows_version_corrects_w11_builds() {
    assert_eq!(
        os::refine_windows_version("Microsoft Windows 10 Pro", "10.0.22631"),
        Some("Microsoft Windows 11 Pro".to_string())
    );
    assert_eq!(
        os::refine_windows_version("Microsoft Windows 10 Home", "22000"),
        Some("Microsoft Windows 11 Home".to_string())
    );
}

#[test]
fn test_refine_windows_version_leaves_correct_strings() {
    // already says 11
    assert_eq!(
        os::refine_windows_version("Microsoft Windows 11 Pro", "10.0.22631"),
        None
    );
    // genuinely Windows 10 build
    assert_eq!(
        os::refine_windows_version("Microsoft Windows 10 Pro", "10.0.19045"),
        None
    );
    // not a Windows 10 product string
    assert_eq!(os::refine_windows_version("Ubuntu 24.04", "6.8.0"), None);
}
