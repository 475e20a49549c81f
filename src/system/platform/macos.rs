use libproc::libproc::proc_pid::pidinfo;
use libproc::libproc::task_info::TaskInfo;

use super::{CpuTimes, PlatformExtensions};
use crate::system::probe::ProbeError;
use crate::system::snapshot::GpuInfo;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_cpu_times(_pid: u32) -> Option<CpuTimes> {
        // Task times come back in Mach absolute units; the sysinfo
        // accumulated CPU time is used instead.
        None
    }

    fn cpu_max_frequency_mhz() -> Option<u64> {
        None
    }

    fn cpu_model() -> Option<String> {
        None
    }

    fn primary_gpu() -> Result<GpuInfo, ProbeError> {
        Err(ProbeError::Unsupported { category: "gpu" })
    }

    fn process_thread_count() -> Option<usize> {
        let pid = std::process::id() as i32;
        let info = pidinfo::<TaskInfo>(pid, 0).ok()?;
        usize::try_from(info.pti_threadnum).ok()
    }

    fn os_manufacturer() -> &'static str {
        "Apple"
    }
}
