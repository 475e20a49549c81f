use windows_sys::Win32::{
    Foundation::{CloseHandle, FILETIME},
    System::Threading::{GetProcessTimes, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION},
};

use super::{CpuTimes, PlatformExtensions};
use crate::system::probe::ProbeError;
use crate::system::snapshot::GpuInfo;

pub struct Platform;

// FILETIME counts 100ns intervals.
fn filetime_ms(ft: &FILETIME) -> u64 {
    ((u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime)) / 10_000
}

impl PlatformExtensions for Platform {
    fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
        unsafe {
            let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
            if handle.is_null() {
                return None;
            }
            let mut creation = std::mem::zeroed::<FILETIME>();
            let mut exit = std::mem::zeroed::<FILETIME>();
            let mut kernel = std::mem::zeroed::<FILETIME>();
            let mut user = std::mem::zeroed::<FILETIME>();
            let ok = GetProcessTimes(handle, &mut creation, &mut exit, &mut kernel, &mut user);
            CloseHandle(handle);
            if ok == 0 {
                return None;
            }
            Some(CpuTimes {
                kernel_ms: filetime_ms(&kernel),
                user_ms: filetime_ms(&user),
            })
        }
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
        None
    }

    fn os_manufacturer() -> &'static str {
        "Microsoft"
    }
}
