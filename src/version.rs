// Build identity, read from Cargo.toml at compile time.

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Identity string the upload client sends as its User-Agent.
pub fn user_agent() -> String {
    format!("{NAME}/{VERSION}")
}
