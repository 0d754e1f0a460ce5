// Windows management plumbing: CIM queries over PowerShell, wmic fallback,
// registry value reads. Query strings live with the collectors; this module
// owns invocation and row decoding.

use crate::parse;
use crate::probes::Probes;
use crate::resolver::{ProbeError, ProbeResult};
use serde_json::Value;
use std::collections::HashMap;

pub type CimRow = serde_json::Map<String, Value>;

impl Probes {
    /// `Get-CimInstance` rows for a class, as JSON maps. Single instances
    /// come back as one-element vectors.
    pub async fn cim_rows(&self, class: &str, props: &[&str]) -> ProbeResult<Vec<CimRow>> {
        let script = format!(
            "Get-CimInstance -ClassName {class} -ErrorAction Stop | Select-Object {} | ConvertTo-Json -Compress",
            props.join(",")
        );
        let raw = self.powershell(&script).await?;
        json_rows(&raw)
    }

    /// Same as [`cim_rows`] but against a non-default WMI namespace
    /// (thermal zones, hardware-monitor bridges, TPM).
    pub async fn cim_rows_in(
        &self,
        namespace: &str,
        class: &str,
        props: &[&str],
    ) -> ProbeResult<Vec<CimRow>> {
        let script = format!(
            "Get-CimInstance -Namespace '{namespace}' -ClassName {class} -ErrorAction Stop | Select-Object {} | ConvertTo-Json -Compress",
            props.join(",")
        );
        let raw = self.powershell(&script).await?;
        json_rows(&raw)
    }

    /// `wmic <path> get <fields> /format:list` rows. Kept as the lowest
    /// tier: wmic is deprecated but still present where PowerShell CIM
    /// queries are policy-blocked.
    pub async fn wmic_rows(
        &self,
        path: &str,
        fields: &str,
    ) -> ProbeResult<Vec<HashMap<String, String>>> {
        let mut args: Vec<&str> = path.split_whitespace().collect();
        args.extend(["get", fields, "/format:list"]);
        let raw = self.command("wmic", &args).await?;
        let rows = parse::parse_wmic_blocks(&raw);
        if rows.is_empty() {
            return Err(ProbeError::Parse("wmic returned no instances".into()));
        }
        Ok(rows)
    }

    /// One registry value via Get-ItemProperty. A missing key or value is
    /// an error here, which callers treat as absence.
    pub async fn registry_value(&self, path: &str, name: &str) -> ProbeResult<String> {
        let script =
            format!("(Get-ItemProperty -Path '{path}' -Name '{name}' -ErrorAction Stop).{name}");
        self.powershell(&script).await
    }
}

/// Normalize ConvertTo-Json output: a lone object becomes a one-row vec.
pub fn json_rows(raw: &str) -> ProbeResult<Vec<CimRow>> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|e| ProbeError::Parse(format!("cim json: {e}")))?;
    match value {
        Value::Object(map) => Ok(vec![map]),
        Value::Array(items) => {
            let rows: Vec<CimRow> = items
                .into_iter()
                .filter_map(|v| match v {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect();
            if rows.is_empty() {
                return Err(ProbeError::Parse("cim json: no object rows".into()));
            }
            Ok(rows)
        }
        other => Err(ProbeError::Parse(format!(
            "cim json: unexpected {}",
            type_name(&other)
        ))),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Non-empty string property; numbers are rendered, null is absence.
pub fn row_str(row: &CimRow, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { None } else { Some(s.to_string()) }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn row_u64(row: &CimRow, key: &str) -> Option<u64> {
    match row.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => parse::parse_u64_loose(s),
        _ => None,
    }
}

pub fn row_f64(row: &CimRow, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse::parse_f64_loose(s),
        _ => None,
    }
}

pub fn row_bool(row: &CimRow, key: &str) -> Option<bool> {
    match row.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        _ => None,
    }
}
