use super::probe::ProbeError;
use super::snapshot::GpuInfo;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuTimes {
    pub kernel_ms: u64,
    pub user_ms: u64,
}

/// Values sysinfo does not expose, or exposes without the detail the
/// snapshot needs.
pub trait PlatformExtensions {
    fn process_cpu_times(pid: u32) -> Option<CpuTimes>;
    fn cpu_max_frequency_mhz() -> Option<u64>;
    fn cpu_model() -> Option<String>;
    fn primary_gpu() -> Result<GpuInfo, ProbeError>;
    fn process_thread_count() -> Option<usize>;
    fn os_manufacturer() -> &'static str;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
    platform_impl::Platform::process_cpu_times(pid)
}

pub fn cpu_max_frequency_mhz() -> Option<u64> {
    platform_impl::Platform::cpu_max_frequency_mhz()
}

pub fn cpu_model() -> Option<String> {
    platform_impl::Platform::cpu_model()
}

pub fn primary_gpu() -> Result<GpuInfo, ProbeError> {
    platform_impl::Platform::primary_gpu()
}

pub fn process_thread_count() -> Option<usize> {
    platform_impl::Platform::process_thread_count()
}

pub fn os_manufacturer() -> &'static str {
    platform_impl::Platform::os_manufacturer()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_do_not_panic_for_current_process() {
        let _ = process_cpu_times(std::process::id());
        let _ = cpu_max_frequency_mhz();
        let _ = cpu_model();
        let _ = primary_gpu();
        let _ = process_thread_count();
        assert!(!os_manufacturer().is_empty());
    }
}
