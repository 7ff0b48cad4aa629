//! System-wide statistics from `/proc` and the os-release record.

use std::path::Path;

use crate::collector::procfs::parser::{
    CpuSample, parse_kernel_version, parse_meminfo, parse_os_release, parse_stat, parse_uptime,
};
use crate::collector::traits::FileSystem;

/// Reads system-wide records under a configurable proc root.
///
/// Every method is a fresh, stateless read. Absent records and malformed
/// fields degrade to the documented defaults (`""`, 0, `None`) — nothing
/// here returns an error for an expected condition.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Location of the os-release record, outside the proc root.
    const OS_RELEASE_PATH: &'static str = "/etc/os-release";

    /// Creates a new system collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to the proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// The distribution's `PRETTY_NAME`, or `""` when the os-release
    /// record or the key is absent.
    pub fn os_name(&self) -> String {
        self.fs
            .read_to_string(Path::new(Self::OS_RELEASE_PATH))
            .ok()
            .and_then(|content| parse_os_release(&content))
            .unwrap_or_default()
    }

    /// The kernel release from the version record, or `""`.
    pub fn kernel_version(&self) -> String {
        let path = format!("{}/version", self.proc_path);
        self.fs
            .read_to_string(Path::new(&path))
            .ok()
            .and_then(|content| parse_kernel_version(&content))
            .unwrap_or_default()
    }

    /// PIDs of the processes currently listed under the proc root.
    ///
    /// Every all-digit directory name is a candidate PID. No ordering is
    /// guaranteed, and the listing races with the live process table: a
    /// returned PID may already be gone by the time it is read. Callers
    /// treat that as a normal case, not an error.
    pub fn pids(&self) -> Vec<u32> {
        let Ok(entries) = self.fs.read_dir(Path::new(&self.proc_path)) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| {
                let name = entry.file_name()?.to_str()?;
                if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
                    name.parse().ok()
                } else {
                    None
                }
            })
            .collect()
    }

    /// Fraction of total memory in use: `(MemTotal - MemFree) / MemTotal`.
    ///
    /// Returns `0.0` when `MemTotal` is absent or zero, so a truncated
    /// meminfo record never produces a NaN or a division panic.
    pub fn memory_utilization(&self) -> f64 {
        let path = format!("{}/meminfo", self.proc_path);
        let Ok(content) = self.fs.read_to_string(Path::new(&path)) else {
            return 0.0;
        };
        let info = parse_meminfo(&content);
        if info.mem_total == 0 {
            return 0.0;
        }
        (info.mem_total as f64 - info.mem_free as f64) / info.mem_total as f64
    }

    /// Seconds since boot, truncated; 0 when the uptime record is missing
    /// or malformed (a defined fallback, not a propagated error).
    pub fn uptime_seconds(&self) -> u64 {
        let path = format!("{}/uptime", self.proc_path);
        self.fs
            .read_to_string(Path::new(&path))
            .ok()
            .and_then(|content| parse_uptime(&content))
            .unwrap_or(0)
    }

    /// The aggregate `cpu` line of the stat record, `None` when absent.
    pub fn aggregate_cpu(&self) -> Option<CpuSample> {
        let path = format!("{}/stat", self.proc_path);
        let content = self.fs.read_to_string(Path::new(&path)).ok()?;
        parse_stat(&content).cpu
    }

    /// Total forks since boot (`processes` key of the stat record); 0 on
    /// absence or malformation.
    pub fn total_processes(&self) -> u64 {
        let path = format!("{}/stat", self.proc_path);
        self.fs
            .read_to_string(Path::new(&path))
            .map(|content| parse_stat(&content).processes)
            .unwrap_or(0)
    }

    /// Currently runnable tasks (`procs_running` key); 0 on absence.
    pub fn running_processes(&self) -> u32 {
        let path = format!("{}/stat", self.proc_path);
        self.fs
            .read_to_string(Path::new(&path))
            .map(|content| parse_stat(&content).procs_running)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn os_name_from_scenario() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        assert_eq!(collector.os_name(), "Debian GNU/Linux 12 (bookworm)");
    }

    #[test]
    fn os_name_absent_record_is_empty() {
        let collector = SystemCollector::new(MockFs::new(), "/proc");
        assert_eq!(collector.os_name(), "");
    }

    #[test]
    fn kernel_version_from_scenario() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        assert_eq!(collector.kernel_version(), "6.1.0-18-amd64");
    }

    #[test]
    fn pids_keep_all_digit_names_only() {
        let mut fs = MockFs::new();
        fs.add_dir("/proc/1");
        fs.add_dir("/proc/12");
        fs.add_dir("/proc/abc");
        fs.add_dir("/proc/2.5");
        fs.add_dir("/proc/999");
        fs.add_file("/proc/uptime", "1.0 1.0\n");

        let collector = SystemCollector::new(fs, "/proc");
        let mut pids = collector.pids();
        pids.sort_unstable();
        assert_eq!(pids, vec![1, 12, 999]);
    }

    #[test]
    fn pids_missing_root_is_empty() {
        let collector = SystemCollector::new(MockFs::new(), "/proc");
        assert!(collector.pids().is_empty());
    }

    #[test]
    fn memory_utilization_ratio() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 1000 kB\nMemFree: 400 kB\n");
        let collector = SystemCollector::new(fs, "/proc");
        assert!((collector.memory_utilization() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn memory_utilization_zero_total_is_zero() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemFree: 400 kB\n");
        let collector = SystemCollector::new(fs, "/proc");
        assert_eq!(collector.memory_utilization(), 0.0);

        let collector = SystemCollector::new(MockFs::new(), "/proc");
        assert_eq!(collector.memory_utilization(), 0.0);
    }

    #[test]
    fn uptime_truncated_with_zero_fallback() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        assert_eq!(collector.uptime_seconds(), 86423);

        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "not-a-number\n");
        let collector = SystemCollector::new(fs, "/proc");
        assert_eq!(collector.uptime_seconds(), 0);
    }

    #[test]
    fn aggregate_cpu_fixed_order() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        let cpu = collector.aggregate_cpu().unwrap();
        assert_eq!(cpu.user, 10000);
        assert_eq!(cpu.idle, 80000);
        assert_eq!(cpu.guest_nice, 0);
    }

    #[test]
    fn aggregate_cpu_absent_line() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/stat", "cpu0 1 2 3 4 5 6 7 8 9 10\n");
        let collector = SystemCollector::new(fs, "/proc");
        assert_eq!(collector.aggregate_cpu(), None);
    }

    #[test]
    fn process_counts() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        assert_eq!(collector.total_processes(), 10000);
        assert_eq!(collector.running_processes(), 2);

        let collector = SystemCollector::new(MockFs::new(), "/proc");
        assert_eq!(collector.total_processes(), 0);
        assert_eq!(collector.running_processes(), 0);
    }
}
