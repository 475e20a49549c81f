use sysinfo::{Networks, ProcessRefreshKind, ProcessesToUpdate, System};

use super::network::NetworkCounters;
use super::platform;
use super::probe::{Probe, ProbeError};
use super::process::ProcessInfo;
use super::snapshot::{CpuInfo, GpuInfo, MemoryInfo, OsInfo};

/// [`Probe`] backed by sysinfo, with the gaps filled by the platform module.
pub struct SysinfoProbe {
    sys: System,
    networks: Networks,
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProbe {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        // CPU usage is a difference between two refreshes; prime the first.
        sys.refresh_cpu_all();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        SysinfoProbe {
            sys,
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

fn is_loopback(name: &str) -> bool {
    name == "lo" || name.starts_with("lo0") || name.to_ascii_lowercase().contains("loopback")
}

impl Probe for SysinfoProbe {
    fn query_cpu(&mut self) -> Result<CpuInfo, ProbeError> {
        self.sys.refresh_cpu_all();
        let cpus = self.sys.cpus();
        let first = cpus
            .first()
            .ok_or_else(|| ProbeError::unavailable("cpu", "no processors reported"))?;

        let max_frequency_mhz = platform::cpu_max_frequency_mhz()
            .unwrap_or_else(|| cpus.iter().map(|c| c.frequency()).max().unwrap_or(0));

        Ok(CpuInfo {
            vendor: first.vendor_id().to_string(),
            model: platform::cpu_model().unwrap_or_default(),
            model_name: first.brand().trim().to_string(),
            max_frequency_mhz,
            physical_cores: System::physical_core_count().unwrap_or(cpus.len()),
            logical_threads: cpus.len(),
            load_percent: self.sys.global_cpu_usage().clamp(0.0, 100.0),
        })
    }

    fn query_memory(&mut self) -> Result<MemoryInfo, ProbeError> {
        self.sys.refresh_memory();
        let total_bytes = self.sys.total_memory();
        if total_bytes == 0 {
            return Err(ProbeError::unavailable("memory", "total memory reported as 0"));
        }
        Ok(MemoryInfo {
            total_bytes,
            available_bytes: self.sys.available_memory(),
            swap_total_bytes: self.sys.total_swap(),
            swap_used_bytes: self.sys.used_swap(),
        })
    }

    fn query_gpu(&mut self) -> Result<GpuInfo, ProbeError> {
        platform::primary_gpu()
    }

    fn query_os(&mut self) -> Result<OsInfo, ProbeError> {
        let family =
            System::name().ok_or_else(|| ProbeError::unavailable("os", "no OS name reported"))?;
        Ok(OsInfo {
            family,
            manufacturer: platform::os_manufacturer().to_string(),
            version: System::long_os_version()
                .or_else(System::os_version)
                .unwrap_or_default(),
            kernel_version: System::kernel_version().unwrap_or_default(),
            uptime_secs: System::uptime(),
            process_count: self.sys.processes().len(),
            thread_count: platform::process_thread_count(),
        })
    }

    fn query_processes(&mut self) -> Result<Vec<ProcessInfo>, ProbeError> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );

        let processes = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| {
                let pid = pid.as_u32();
                let times = platform::process_cpu_times(pid).unwrap_or(platform::CpuTimes {
                    kernel_ms: 0,
                    user_ms: process.accumulated_cpu_time(),
                });
                ProcessInfo {
                    pid,
                    name: process.name().to_string_lossy().to_string(),
                    kernel_time_ms: times.kernel_ms,
                    user_time_ms: times.user_ms,
                    uptime_ms: process.run_time().saturating_mul(1000),
                    resident_bytes: process.memory(),
                    virtual_bytes: process.virtual_memory(),
                }
            })
            .collect::<Vec<_>>();

        if processes.is_empty() {
            return Err(ProbeError::unavailable("processes", "process table is empty"));
        }
        Ok(processes)
    }

    fn query_network_interface(&mut self, preferred: Option<&str>) -> Result<String, ProbeError> {
        self.networks.refresh(true);
        let list = self.networks.list();

        if let Some(name) = preferred {
            return if list.contains_key(name) {
                Ok(name.to_string())
            } else {
                Err(ProbeError::InterfaceNotFound(name.to_string()))
            };
        }

        // Busiest non-loopback interface; ties go to the lower name.
        list.iter()
            .filter(|(name, _)| !is_loopback(name))
            .max_by(|(a_name, a), (b_name, b)| {
                a.total_received()
                    .cmp(&b.total_received())
                    .then_with(|| b_name.cmp(a_name))
            })
            .map(|(name, _)| name.clone())
            .ok_or_else(|| ProbeError::unavailable("network", "no non-loopback interface"))
    }

    fn query_network_counters(&mut self, interface: &str) -> Result<NetworkCounters, ProbeError> {
        self.networks.refresh(true);
        let data = self
            .networks
            .list()
            .get(interface)
            .ok_or_else(|| ProbeError::InterfaceNotFound(interface.to_string()))?;
        Ok(NetworkCounters {
            sent_bytes: data.total_transmitted(),
            received_bytes: data.total_received(),
            sent_packets: data.total_packets_transmitted(),
            received_packets: data.total_packets_received(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_names() {
        assert!(is_loopback("lo"));
        assert!(is_loopback("lo0"));
        assert!(is_loopback("Loopback Pseudo-Interface 1"));
        assert!(!is_loopback("eth0"));
        assert!(!is_loopback("wlo1"));
    }

    #[test]
    fn live_probe_reports_this_host() {
        let mut probe = SysinfoProbe::new();
        let cpu = probe.query_cpu().expect("cpu probe");
        assert!(cpu.logical_threads >= 1);
        assert!((0.0..=100.0).contains(&cpu.load_percent));

        let processes = probe.query_processes().expect("process probe");
        let me = std::process::id();
        assert!(processes.iter().any(|p| p.pid == me));

        let os = probe.query_os().expect("os probe");
        assert_eq!(os.process_count, processes.len());
    }

    #[test]
    fn missing_preferred_interface_is_an_error() {
        let mut probe = SysinfoProbe::new();
        let err = probe
            .query_network_interface(Some("definitely-not-an-interface0"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::InterfaceNotFound(_)));
    }
}
