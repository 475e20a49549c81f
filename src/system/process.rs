use serde::Serialize;

/// One process as observed on a single tick. Times are milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub kernel_time_ms: u64,
    pub user_time_ms: u64,
    pub uptime_ms: u64,
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
}

impl ProcessInfo {
    /// Lifetime CPU utilisation: busy time over wall time since start.
    /// A process with no measurable uptime reports 0.
    pub fn cpu_percent(&self) -> f64 {
        if self.uptime_ms == 0 {
            return 0.0;
        }
        let busy = self.kernel_time_ms.saturating_add(self.user_time_ms);
        100.0 * busy as f64 / self.uptime_ms as f64
    }

    pub fn memory_percent(&self, total_memory: u64) -> f64 {
        crate::format::percent(self.resident_bytes, total_memory)
    }
}

/// Highest CPU users first. Equal percentages keep their input order.
pub fn top_by_cpu(processes: &[ProcessInfo], limit: usize) -> Vec<ProcessInfo> {
    let mut ranked: Vec<(f64, &ProcessInfo)> =
        processes.iter().map(|p| (p.cpu_percent(), p)).collect();
    // sort_by is stable; total_cmp keeps NaN from scrambling the order.
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, p)| p.clone())
        .collect()
}
