use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scan: ScanConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub command_timeout_secs: u64,
    pub powershell_timeout_secs: u64,
    pub ping_timeout_secs: u64,
    pub ping_host: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: 10,
            powershell_timeout_secs: 15,
            ping_timeout_secs: 8,
            ping_host: "8.8.8.8".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000/api/scan".to_string(),
            timeout_secs: 15,
        }
    }
}

impl AppConfig {
    /// Defaults when no file is given; a named file must exist and parse.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let s = std::fs::read_to_string(path)?;
                Self::load_from_str(&s)
            }
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.scan.command_timeout_secs > 0,
            "scan.command_timeout_secs must be > 0, got {}",
            self.scan.command_timeout_secs
        );
        anyhow::ensure!(
            self.scan.powershell_timeout_secs > 0,
            "scan.powershell_timeout_secs must be > 0, got {}",
            self.scan.powershell_timeout_secs
        );
        anyhow::ensure!(
            self.scan.ping_timeout_secs > 0,
            "scan.ping_timeout_secs must be > 0, got {}",
            self.scan.ping_timeout_secs
        );
        anyhow::ensure!(
            !self.scan.ping_host.trim().is_empty(),
            "scan.ping_host must be non-empty"
        );
        anyhow::ensure!(!self.upload.url.trim().is_empty(), "upload.url must be non-empty");
        anyhow::ensure!(
            self.upload.timeout_secs > 0,
            "upload.timeout_secs must be > 0, got {}",
            self.upload.timeout_secs
        );
        Ok(())
    }
}
