use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::format::{format_bytes_u64, format_duration_secs, truncate_unicode};
use crate::system::handle::MetricsHandle;
use crate::system::network::NetworkRateSample;
use crate::system::process::top_by_cpu;
use crate::system::snapshot::MetricsSnapshot;

const NAME_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Summary,
    Network,
    Top,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    snapshot: &'a MetricsSnapshot,
    rates: &'a NetworkRateSample,
}

/// One report for `view` from whatever the handle currently holds.
pub fn render(view: View, handle: &MetricsHandle, top: usize) -> Result<String, serde_json::Error> {
    let snapshot = handle.snapshot();
    let rates = handle.rate_sample();
    let lines = match view {
        View::Summary => summary_lines(&snapshot),
        View::Network => network_lines(&rates, snapshot.network.interface.as_deref()),
        View::Top => top_lines(&snapshot, top),
        View::Json => {
            return serde_json::to_string(&JsonReport {
                snapshot: &snapshot,
                rates: &rates,
            });
        }
    };
    Ok(lines.join("\n"))
}

pub fn summary_lines(snapshot: &MetricsSnapshot) -> Vec<String> {
    let cpu = &snapshot.cpu;
    let memory = &snapshot.memory;
    let gpu = &snapshot.gpu;
    let os = &snapshot.os;

    let model = [cpu.model.as_str(), cpu.model_name.as_str()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let threads = os
        .thread_count
        .map_or_else(|| "unknown".to_string(), |t| t.to_string());

    vec![
        "Processor".to_string(),
        format!("  Vendor: {}", cpu.vendor),
        format!("  Model: {model}"),
        format!("  Clock speed: {:.2} GHz", cpu.max_frequency_mhz as f64 / 1000.0),
        format!("  Physical cores: {}", cpu.physical_cores),
        format!("  Logical cores: {}", cpu.logical_threads),
        format!("  Load: {:.1}%", cpu.load_percent),
        "Memory".to_string(),
        format!("  Total: {}", format_bytes_u64(memory.total_bytes)),
        format!("  Available: {}", format_bytes_u64(memory.available_bytes)),
        format!(
            "  Used: {} ({:.1}%)",
            format_bytes_u64(memory.used_bytes()),
            memory.used_percent()
        ),
        format!(
            "  Swap: {} / {} ({:.1}%)",
            format_bytes_u64(memory.swap_used_bytes),
            format_bytes_u64(memory.swap_total_bytes),
            memory.swap_used_percent()
        ),
        "GPU".to_string(),
        format!("  Name: {}", gpu.name),
        format!("  Vendor: {}", gpu.vendor),
        format!("  VRAM: {}", format_bytes_u64(gpu.vram_bytes)),
        "Operating system".to_string(),
        format!("  Family: {}", os.family),
        format!("  Manufacturer: {}", os.manufacturer),
        format!("  Version: {}", os.version),
        format!("  Kernel: {}", os.kernel_version),
        format!("  Uptime: {}", format_duration_secs(os.uptime_secs)),
        format!("  Processes: {}", os.process_count),
        format!("  Threads: {threads}"),
        "Network".to_string(),
        format!(
            "  Interface: {}",
            snapshot.network.interface.as_deref().unwrap_or("none")
        ),
    ]
}

pub fn network_lines(rates: &NetworkRateSample, interface: Option<&str>) -> Vec<String> {
    vec![
        format!("Interface: {}", interface.unwrap_or("none")),
        format!(
            "Packets received: {} (+{} last tick)",
            rates.total_received_packets, rates.last_received_packets
        ),
        format!(
            "Packets sent: {} (+{} last tick)",
            rates.total_sent_packets, rates.last_sent_packets
        ),
        format!(
            "Bytes received: {} (+{} last tick)",
            format_bytes_u64(rates.total_received_bytes),
            format_bytes_u64(rates.last_received_bytes)
        ),
        format!(
            "Bytes sent: {} (+{} last tick)",
            format_bytes_u64(rates.total_sent_bytes),
            format_bytes_u64(rates.last_sent_bytes)
        ),
    ]
}

pub fn top_lines(snapshot: &MetricsSnapshot, limit: usize) -> Vec<String> {
    let threads = snapshot
        .os
        .thread_count
        .map_or_else(|| "unknown".to_string(), |t| t.to_string());
    let mut lines = vec![
        format!(
            "Processes: {} Threads: {threads}",
            snapshot.os.process_count
        ),
        format!(
            "{:>7} {:>5} {:>5} {:>9} {:>9}  {}",
            "PID", "%CPU", "%MEM", "VSZ", "RSS", "NAME"
        ),
    ];
    for process in top_by_cpu(&snapshot.processes, limit) {
        lines.push(format!(
            "{:>7} {:>5.1} {:>5.1} {:>9} {:>9}  {}",
            process.pid,
            process.cpu_percent(),
            process.memory_percent(snapshot.memory.total_bytes),
            format_bytes_u64(process.virtual_bytes),
            format_bytes_u64(process.resident_bytes),
            truncate_unicode(&process.name, NAME_WIDTH),
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fake::FakeProbe;
    use crate::system::network::NetworkCounters;
    use crate::system::sampler::{Sampler, SamplerOptions};

    #[test]
    fn top_view_is_ranked_and_limited() {
        let sampler = Sampler::new(FakeProbe::new(), SamplerOptions::default());
        let output = render(View::Top, &sampler.handle(), 2).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].ends_with("java"));
        assert!(lines[3].ends_with("sshd"));
    }

    #[test]
    fn json_view_carries_snapshot_and_rates() {
        let mut probe = FakeProbe::new();
        probe.push_counters(NetworkCounters {
            sent_bytes: 42,
            ..Default::default()
        });
        let sampler = Sampler::new(probe, SamplerOptions::default());
        let output = render(View::Json, &sampler.handle(), 8).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["rates"]["total_sent_bytes"], 42);
        assert_eq!(value["snapshot"]["cpu"]["vendor"], "GenuineIntel");
        assert_eq!(value["snapshot"]["processes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn summary_without_interface_or_threads() {
        let mut probe = FakeProbe::new();
        probe.os.thread_count = None;
        probe.cpu.model.clear();
        probe.fail(crate::system::store::Category::Network);
        let sampler = Sampler::new(probe, SamplerOptions::default());
        let lines = summary_lines(&sampler.handle().snapshot());
        assert!(lines.contains(&"  Threads: unknown".to_string()));
        assert!(lines.contains(&"  Interface: none".to_string()));
        assert!(lines.contains(&"  Model: Intel(R) Core(TM) i7-8700 CPU @ 3.20GHz".to_string()));
    }
}
