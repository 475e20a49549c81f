use std::collections::{HashSet, VecDeque};

use super::network::NetworkCounters;
use super::probe::{Probe, ProbeError};
use super::process::ProcessInfo;
use super::snapshot::{CpuInfo, GpuInfo, MemoryInfo, OsInfo};
use super::store::Category;

/// Scripted probe for tests and demos. Category values are plain fields;
/// network counters are served from a queue in push order.
pub struct FakeProbe {
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub gpu: GpuInfo,
    pub os: OsInfo,
    pub processes: Vec<ProcessInfo>,
    interfaces: Vec<String>,
    failing: HashSet<Category>,
    counters: VecDeque<Result<NetworkCounters, ProbeError>>,
    counter_queries: Vec<String>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProbe {
    pub fn new() -> Self {
        Self {
            cpu: CpuInfo {
                vendor: "GenuineIntel".to_string(),
                model: "Family 6 Model 158 Stepping 10".to_string(),
                model_name: "Intel(R) Core(TM) i7-8700 CPU @ 3.20GHz".to_string(),
                max_frequency_mhz: 4_600,
                physical_cores: 6,
                logical_threads: 12,
                load_percent: 10.0,
            },
            memory: MemoryInfo {
                total_bytes: 16_000_000_000,
                available_bytes: 10_000_000_000,
                swap_total_bytes: 2_000_000_000,
                swap_used_bytes: 100_000_000,
            },
            gpu: GpuInfo {
                name: "GeForce GTX 1070".to_string(),
                vendor: "NVIDIA".to_string(),
                vram_bytes: 8_589_934_592,
            },
            os: OsInfo {
                family: "Debian GNU/Linux".to_string(),
                manufacturer: "GNU/Linux".to_string(),
                version: "Linux 12 Debian GNU/Linux".to_string(),
                kernel_version: "6.1.0-18-amd64".to_string(),
                uptime_secs: 86_400,
                process_count: 3,
                thread_count: Some(24),
            },
            processes: vec![
                fake_process(1, "init", 200, 100_000),
                fake_process(812, "java", 45_000, 90_000),
                fake_process(1024, "sshd", 900, 60_000),
            ],
            interfaces: vec!["eth0".to_string()],
            failing: HashSet::new(),
            counters: VecDeque::new(),
            counter_queries: Vec::new(),
        }
    }

    pub fn fail(&mut self, category: Category) {
        self.failing.insert(category);
    }

    pub fn recover(&mut self, category: Category) {
        self.failing.remove(&category);
    }

    /// Interfaces are resolved in insertion order when no preference matches.
    pub fn add_interface(&mut self, name: &str) {
        self.interfaces.push(name.to_string());
    }

    pub fn remove_interface(&mut self, name: &str) {
        self.interfaces.retain(|i| i != name);
    }

    pub fn push_counters(&mut self, counters: NetworkCounters) {
        self.counters.push_back(Ok(counters));
    }

    pub fn push_counter_error(&mut self, error: ProbeError) {
        self.counters.push_back(Err(error));
    }

    /// Interfaces passed to `query_network_counters`, in call order.
    pub fn counter_queries(&self) -> &[String] {
        &self.counter_queries
    }

    fn check(&self, category: Category) -> Result<(), ProbeError> {
        if self.failing.contains(&category) {
            return Err(ProbeError::unavailable(category.label(), "scripted failure"));
        }
        Ok(())
    }
}

pub fn fake_process(pid: u32, name: &str, busy_ms: u64, uptime_ms: u64) -> ProcessInfo {
    ProcessInfo {
        pid,
        name: name.to_string(),
        kernel_time_ms: busy_ms / 4,
        user_time_ms: busy_ms - busy_ms / 4,
        uptime_ms,
        resident_bytes: 50_000_000 + u64::from(pid) * 1_000,
        virtual_bytes: 400_000_000 + u64::from(pid) * 1_000,
    }
}

impl Probe for FakeProbe {
    fn query_cpu(&mut self) -> Result<CpuInfo, ProbeError> {
        self.check(Category::Cpu)?;
        Ok(self.cpu.clone())
    }

    fn query_memory(&mut self) -> Result<MemoryInfo, ProbeError> {
        self.check(Category::Memory)?;
        Ok(self.memory.clone())
    }

    fn query_gpu(&mut self) -> Result<GpuInfo, ProbeError> {
        self.check(Category::Gpu)?;
        Ok(self.gpu.clone())
    }

    fn query_os(&mut self) -> Result<OsInfo, ProbeError> {
        self.check(Category::Os)?;
        Ok(self.os.clone())
    }

    fn query_processes(&mut self) -> Result<Vec<ProcessInfo>, ProbeError> {
        self.check(Category::Processes)?;
        Ok(self.processes.clone())
    }

    fn query_network_interface(&mut self, preferred: Option<&str>) -> Result<String, ProbeError> {
        self.check(Category::Network)?;
        if let Some(name) = preferred {
            return self
                .interfaces
                .iter()
                .find(|i| i.as_str() == name)
                .cloned()
                .ok_or_else(|| ProbeError::InterfaceNotFound(name.to_string()));
        }
        self.interfaces
            .first()
            .cloned()
            .ok_or_else(|| ProbeError::unavailable("network", "no interfaces"))
    }

    fn query_network_counters(&mut self, interface: &str) -> Result<NetworkCounters, ProbeError> {
        self.counter_queries.push(interface.to_string());
        self.counters
            .pop_front()
            .unwrap_or_else(|| Err(ProbeError::unavailable("network", "counter script exhausted")))
    }
}
