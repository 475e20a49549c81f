use std::path::PathBuf;

use thiserror::Error;

use super::network::NetworkCounters;
use super::process::ProcessInfo;
use super::snapshot::{CpuInfo, GpuInfo, MemoryInfo, OsInfo};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{category} probe is not supported on this platform")]
    Unsupported { category: &'static str },

    #[error("{category} probe returned no data: {reason}")]
    Unavailable {
        category: &'static str,
        reason: String,
    },

    #[error("network interface `{0}` not found")]
    InterfaceNotFound(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProbeError {
    pub fn unavailable(category: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            category,
            reason: reason.into(),
        }
    }
}

/// Synchronous queries against the operating system, one per metric
/// category. Calls may be slow and each one may fail on its own.
pub trait Probe: Send {
    fn query_cpu(&mut self) -> Result<CpuInfo, ProbeError>;
    fn query_memory(&mut self) -> Result<MemoryInfo, ProbeError>;
    fn query_gpu(&mut self) -> Result<GpuInfo, ProbeError>;
    fn query_os(&mut self) -> Result<OsInfo, ProbeError>;
    fn query_processes(&mut self) -> Result<Vec<ProcessInfo>, ProbeError>;

    /// Name of the interface to sample: `preferred` when it exists,
    /// otherwise the implementation's best guess at the active one.
    fn query_network_interface(&mut self, preferred: Option<&str>) -> Result<String, ProbeError>;

    fn query_network_counters(&mut self, interface: &str) -> Result<NetworkCounters, ProbeError>;
}
