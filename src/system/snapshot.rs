use std::time::SystemTime;

use serde::Serialize;

use super::process::ProcessInfo;
use crate::format::percent;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CpuInfo {
    pub vendor: String,
    pub model: String,
    pub model_name: String,
    pub max_frequency_mhz: u64,
    pub physical_cores: usize,
    pub logical_threads: usize,
    /// Global load at the time of the probe, 0-100.
    pub load_percent: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
}

impl MemoryInfo {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    pub fn used_percent(&self) -> f64 {
        percent(self.used_bytes(), self.total_bytes)
    }

    pub fn swap_used_percent(&self) -> f64 {
        percent(self.swap_used_bytes, self.swap_total_bytes)
    }
}

/// Primary display adapter only.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GpuInfo {
    pub name: String,
    pub vendor: String,
    pub vram_bytes: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OsInfo {
    pub family: String,
    pub manufacturer: String,
    pub version: String,
    pub kernel_version: String,
    pub uptime_secs: u64,
    pub process_count: usize,
    /// Threads of this process; not every platform exposes it.
    pub thread_count: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NetworkIdentity {
    pub interface: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub tick: u64,
    pub refreshed_at: SystemTime,
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub gpu: GpuInfo,
    pub os: OsInfo,
    pub network: NetworkIdentity,
    pub processes: Vec<ProcessInfo>,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            tick: 0,
            refreshed_at: SystemTime::UNIX_EPOCH,
            cpu: CpuInfo::default(),
            memory: MemoryInfo::default(),
            gpu: GpuInfo::default(),
            os: OsInfo::default(),
            network: NetworkIdentity::default(),
            processes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_derivations() {
        let memory = MemoryInfo {
            total_bytes: 1000,
            available_bytes: 250,
            swap_total_bytes: 200,
            swap_used_bytes: 50,
        };
        assert_eq!(memory.used_bytes(), 750);
        assert!((memory.used_percent() - 75.0).abs() < f64::EPSILON);
        assert!((memory.swap_used_percent() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_memory_does_not_divide() {
        let memory = MemoryInfo::default();
        assert_eq!(memory.used_percent(), 0.0);
        assert_eq!(memory.swap_used_percent(), 0.0);
    }
}
