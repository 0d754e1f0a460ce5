// Field resolution across ranked providers.
//
// Every provider failure mode collapses to "no value" here; nothing a
// provider does can abort a collector or the scan.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a probe produced no value. All variants are equivalent to the
/// caller: the field stays unset and the next provider gets its turn.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Tool or library missing, inaccessible, or lacking privilege.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
    /// External call exceeded its deadline.
    #[error("provider timed out after {0:?}")]
    Timeout(Duration),
    /// Output present but malformed or out of accepted range.
    #[error("unparseable provider output: {0}")]
    Parse(String),
    /// Data present but insufficient to decide either way.
    #[error("ambiguous provider data: {0}")]
    Ambiguous(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;

/// One resolvable field. Starts unset; the first probe to return a value
/// wins and later probes are not invoked at all. The fill-if-absent
/// invariant lives here, once, instead of being re-derived per field.
#[derive(Debug)]
pub struct Field<T> {
    name: &'static str,
    value: Option<T>,
}

impl<T> Field<T> {
    pub fn new(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Accept a plain optional value while the field is unset.
    pub fn fill(&mut self, value: Option<T>) {
        if self.value.is_none() {
            self.value = value;
        }
    }

    /// Run `probe` only while the field is unset and keep its `Ok` value.
    /// A set field skips the probe entirely.
    pub fn fill_with<F>(&mut self, provider: &str, probe: F)
    where
        F: FnOnce() -> ProbeResult<T>,
    {
        if self.value.is_some() {
            return;
        }
        match probe() {
            Ok(v) => self.value = Some(v),
            Err(e) => {
                tracing::debug!(field = self.name, provider, error = %e, "probe yielded no value");
            }
        }
    }

    /// Async form of [`fill_with`]. The future is awaited only while the
    /// field is unset; otherwise it is dropped unpolled, so the provider
    /// call never starts.
    pub async fn fill_with_async<F>(&mut self, provider: &str, probe: F)
    where
        F: Future<Output = ProbeResult<T>>,
    {
        if self.value.is_some() {
            return;
        }
        match probe.await {
            Ok(v) => self.value = Some(v),
            Err(e) => {
                tracing::debug!(field = self.name, provider, error = %e, "probe yielded no value");
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }
}

impl<T: Clone> Field<T> {
    pub fn cloned(&self) -> Option<T> {
        self.value.clone()
    }
}
