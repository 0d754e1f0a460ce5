// Unit-aware parsing for provider output.
//
// Providers hand back free-form text (brand strings, wmic key=value blocks,
// CSV rows, thermal counters in odd units). Everything here returns Option:
// a value that fails to parse is absence, never a guess.

use std::collections::HashMap;

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

pub fn mb_to_gb(mb: f64) -> f64 {
    round2(mb / 1024.0)
}

/// Lenient float parse: plain, comma decimal separator, or digits embedded
/// in surrounding junk.
pub fn parse_f64_loose(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return Some(v);
    }
    if let Ok(v) = trimmed.replace(',', ".").parse::<f64>() {
        return Some(v);
    }
    let filtered: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+')
        .collect();
    if filtered.is_empty() {
        return None;
    }
    filtered.parse::<f64>().ok()
}

pub fn parse_u64_loose(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if let Ok(v) = trimmed.parse::<u64>() {
        return Some(v);
    }
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

/// Extract a clock in GHz from a brand-style string ("... CPU @ 3.60GHz").
/// Takes the number immediately preceding the first "GHz" marker.
pub fn clock_ghz_from_brand(s: &str) -> Option<f64> {
    let lower = s.to_ascii_lowercase();
    let idx = lower.find("ghz")?;
    let head = s[..idx].trim_end();
    let start = head
        .rfind(|c: char| !c.is_ascii_digit() && c != '.')
        .map(|i| i + 1)
        .unwrap_or(0);
    let num = &head[start..];
    if num.is_empty() {
        return None;
    }
    num.parse::<f64>().ok().filter(|v| *v > 0.0)
}

/// Suffix multipliers for cache-size strings.
/// Two-letter forms are checked before the bare-letter ones.
const SIZE_SUFFIXES: &[(&str, u64)] = &[
    ("KB", 1024),
    ("MB", 1024 * 1024),
    ("GB", 1024 * 1024 * 1024),
    ("K", 1024),
    ("M", 1024 * 1024),
    ("G", 1024 * 1024 * 1024),
    ("B", 1),
];

/// Parse a size like "8MB", "512 KB", or "32K" into bytes. A bare number is
/// taken as bytes. Returns None when no number is present.
pub fn parse_cache_size(s: &str) -> Option<u64> {
    let cleaned = s.to_uppercase().replace(',', "");
    let cleaned = cleaned.trim();
    let start = cleaned.find(|c: char| c.is_ascii_digit())?;
    let rest = &cleaned[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    let num: f64 = rest[..end].parse().ok()?;
    let tail = rest[end..].trim_start();
    let mult = SIZE_SUFFIXES
        .iter()
        .find(|(suffix, _)| tail.starts_with(suffix))
        .map(|(_, m)| *m)
        .unwrap_or(1);
    Some((num * mult as f64) as u64)
}

/// Convert an ACPI thermal-zone reading in tenths of Kelvin to Celsius.
/// Readings outside (0, 120) C are platform misreports and yield None.
pub fn kelvin_tenths_to_celsius(raw: f64) -> Option<f64> {
    let celsius = raw / 10.0 - 273.15;
    if celsius > 0.0 && celsius < 120.0 {
        Some(round1(celsius))
    } else {
        None
    }
}

/// Parse `wmic ... /format:list` output: KEY=value lines grouped into
/// blank-line-separated blocks, one map per instance.
pub fn parse_wmic_blocks(output: &str) -> Vec<HashMap<String, String>> {
    let mut entries = Vec::new();
    let mut current = HashMap::new();
    for line in output.lines() {
        let line = line.trim();
        if let Some((key, value)) = line.split_once('=') {
            current.insert(key.trim().to_string(), value.trim().to_string());
        } else if line.is_empty() && !current.is_empty() {
            entries.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        entries.push(current);
    }
    entries
}

/// Pull the plan name out of `powercfg /getactivescheme` output:
/// `Power Scheme GUID: <guid>  (Plan Name)`.
pub fn power_plan_name(output: &str) -> Option<String> {
    let open = output.find('(')?;
    let close = output.rfind(')')?;
    if close <= open + 1 {
        return None;
    }
    let name = output[open + 1..close].trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Round-trip time from ping output. Handles the Windows summary line
/// ("Average = 23ms") and per-reply forms ("time=22.4 ms", "time<1ms").
pub fn parse_ping_latency_ms(output: &str) -> Option<f64> {
    if let Some(idx) = output.find("Average") {
        let after = &output[idx..];
        if let Some(eq) = after.find('=') {
            if let Some(v) = leading_number(&after[eq + 1..]) {
                return Some(v);
            }
        }
    }
    for marker in ["time=", "time<"] {
        if let Some(idx) = output.find(marker) {
            if let Some(v) = leading_number(&output[idx + marker.len()..]) {
                return Some(v);
            }
        }
    }
    None
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Normalize a DMTF/WMI date ("20230415000000.000000+000") to yyyy-mm-dd.
pub fn bios_release_date(raw: &str) -> Option<String> {
    let digits: Vec<char> = raw.chars().take_while(char::is_ascii_digit).collect();
    if digits.len() < 8 {
        return None;
    }
    let s: String = digits[..8].iter().collect();
    Some(format!("{}-{}-{}", &s[0..4], &s[4..6], &s[6..8]))
}

/// One nvidia-smi CSV cell; the tool's not-available placeholders map to None.
pub fn csv_field(raw: &str) -> Option<String> {
    let v = raw.trim();
    if v.is_empty() || v.eq_ignore_ascii_case("N/A") || (v.starts_with('[') && v.ends_with(']')) {
        None
    } else {
        Some(v.to_string())
    }
}

/// Disk index out of a partition reference like "Disk #1, Partition #0".
pub fn disk_index_from_partition_ref(s: &str) -> Option<u32> {
    let idx = s.find("Disk #")?;
    let rest = &s[idx + "Disk #".len()..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse::<u32>().ok()
}

/// Drive letter out of a logical-disk reference like
/// `Win32_LogicalDisk.DeviceID="C:"`.
pub fn drive_letter_from_ref(s: &str) -> Option<String> {
    let (_, rest) = s.split_once("DeviceID=")?;
    let rest = rest.trim_start_matches(['"', '\\']);
    let end = rest.find('"').unwrap_or(rest.len());
    let letter = rest[..end].trim();
    if letter.is_empty() {
        None
    } else {
        Some(letter.to_string())
    }
}
