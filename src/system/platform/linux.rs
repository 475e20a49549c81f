use std::fs;
use std::path::{Path, PathBuf};

use super::{CpuTimes, PlatformExtensions};
use crate::system::probe::ProbeError;
use crate::system::snapshot::GpuInfo;

const DRM_ROOT: &str = "/sys/class/drm";

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
        let contents = fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
        parse_stat_times(&contents, clock_ticks_per_sec())
    }

    fn cpu_max_frequency_mhz() -> Option<u64> {
        // Reported in kHz.
        let raw =
            fs::read_to_string("/sys/devices/system/cpu/cpu0/cpufreq/cpuinfo_max_freq").ok()?;
        raw.trim().parse::<u64>().ok().map(|khz| khz / 1000)
    }

    fn cpu_model() -> Option<String> {
        let contents = fs::read_to_string("/proc/cpuinfo").ok()?;
        parse_cpu_model(&contents)
    }

    fn primary_gpu() -> Result<GpuInfo, ProbeError> {
        let entries = fs::read_dir(DRM_ROOT).map_err(|source| ProbeError::Io {
            path: PathBuf::from(DRM_ROOT),
            source,
        })?;

        let mut cards: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_prefix("card"))
                    .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
            })
            .collect();
        cards.sort();

        let device = cards
            .iter()
            .map(|card| card.join("device"))
            .find(|dev| dev.join("vendor").exists())
            .ok_or_else(|| ProbeError::unavailable("gpu", "no display adapter found"))?;

        let vendor_id = read_trimmed(&device.join("vendor")).unwrap_or_default();
        let device_id = read_trimmed(&device.join("device")).unwrap_or_default();
        let vendor = vendor_name(&vendor_id);

        let name = read_trimmed(&device.join("product_name"))
            .or_else(|| (vendor == "NVIDIA").then(nvidia_model).flatten())
            .unwrap_or_else(|| format!("{vendor} device {device_id}"));

        let vram_bytes = read_trimmed(&device.join("mem_info_vram_total"))
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Ok(GpuInfo {
            name,
            vendor,
            vram_bytes,
        })
    }

    fn process_thread_count() -> Option<usize> {
        let status = fs::read_to_string("/proc/self/status").ok()?;
        status
            .lines()
            .find_map(|line| line.strip_prefix("Threads:"))
            .and_then(|v| v.trim().parse().ok())
    }

    fn os_manufacturer() -> &'static str {
        "GNU/Linux"
    }
}

fn clock_ticks_per_sec() -> u64 {
    // SAFETY: sysconf has no preconditions.
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 { ticks as u64 } else { 100 }
}

fn parse_stat_times(contents: &str, ticks_per_sec: u64) -> Option<CpuTimes> {
    // comm may contain spaces and parens, so split after the last ')'.
    let after_comm = contents.rfind(')')? + 1;
    let fields: Vec<&str> = contents[after_comm..].split_whitespace().collect();
    // state(0) ppid(1) ... utime(11) stime(12)
    let utime: u64 = fields.get(11)?.parse().ok()?;
    let stime: u64 = fields.get(12)?.parse().ok()?;
    Some(CpuTimes {
        kernel_ms: stime * 1000 / ticks_per_sec,
        user_ms: utime * 1000 / ticks_per_sec,
    })
}

fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    let mut family = None;
    let mut model = None;
    let mut stepping = None;
    for line in cpuinfo.lines() {
        // First processor block only.
        if line.trim().is_empty() {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "cpu family" => family = Some(value.trim()),
            "model" => model = Some(value.trim()),
            "stepping" => stepping = Some(value.trim()),
            _ => {}
        }
    }
    Some(format!(
        "Family {} Model {} Stepping {}",
        family?, model?, stepping?
    ))
}

fn vendor_name(pci_id: &str) -> String {
    match pci_id {
        "0x10de" => "NVIDIA".to_string(),
        "0x1002" => "AMD".to_string(),
        "0x8086" => "Intel".to_string(),
        "0x1af4" => "Red Hat".to_string(),
        "0x15ad" => "VMware".to_string(),
        other => other.to_string(),
    }
}

fn nvidia_model() -> Option<String> {
    let gpus = fs::read_dir("/proc/driver/nvidia/gpus").ok()?;
    let mut dirs: Vec<PathBuf> = gpus.flatten().map(|e| e.path()).collect();
    dirs.sort();
    let info = fs::read_to_string(dirs.first()?.join("information")).ok()?;
    info.lines()
        .find_map(|line| line.strip_prefix("Model:"))
        .map(|m| m.trim().to_string())
}

fn read_trimmed(path: &Path) -> Option<String> {
    let value = fs::read_to_string(path).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
