//! Per-process statistics from `/proc/[pid]/` records.

use std::path::Path;

use crate::collector::procfs::CLK_TCK;
use crate::collector::procfs::parser::{
    UserResolver, parse_cmdline, parse_proc_status, parse_proc_times, parse_uptime,
};
use crate::collector::traits::FileSystem;
use crate::model::ProcessSnapshot;

/// Per-process CPU time fields converted from ticks to seconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuTimes {
    pub utime: f64,
    pub stime: f64,
    pub cutime: f64,
    pub cstime: f64,
    /// Seconds after boot at which the process started.
    pub starttime: f64,
}

/// Reads `/proc/[pid]/` records and derives [`ProcessSnapshot`]s.
///
/// Construction loads the passwd record once for UID resolution; call
/// [`reload_users`](Self::reload_users) to pick up later changes. All
/// per-PID reads are best-effort: a process that exits between the
/// directory listing and the read yields defaulted fields, never an error.
pub struct ProcessCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
    users: UserResolver,
}

impl<F: FileSystem> ProcessCollector<F> {
    /// Location of the user database record, outside the proc root.
    const PASSWD_PATH: &'static str = "/etc/passwd";

    /// Creates a new process collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to the proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        let mut collector = Self {
            fs,
            proc_path: proc_path.into(),
            users: UserResolver::new(),
        };
        collector.reload_users();
        collector
    }

    /// Reloads the UID → username map from the passwd record.
    pub fn reload_users(&mut self) {
        if let Ok(content) = self.fs.read_to_string(Path::new(Self::PASSWD_PATH)) {
            self.users.load_from_content(&content);
        }
    }

    /// The process command line, NUL separators rendered as spaces;
    /// `""` when the record is unreadable or empty (kernel threads).
    pub fn command(&self, pid: u32) -> String {
        let path = format!("{}/{}/cmdline", self.proc_path, pid);
        self.fs
            .read_to_string(Path::new(&path))
            .map(|content| parse_cmdline(&content))
            .unwrap_or_default()
    }

    /// Data segment size in kB (`VmData` of the status record).
    ///
    /// `None` when the record or the field is absent — kernel threads and
    /// some kernel versions do not report it, and that must stay
    /// distinguishable from a genuine zero.
    pub fn vm_data_kb(&self, pid: u32) -> Option<u64> {
        let path = format!("{}/{}/status", self.proc_path, pid);
        let content = self.fs.read_to_string(Path::new(&path)).ok()?;
        parse_proc_status(&content).vm_data_kb
    }

    /// Real UID of the process owner, from the status record.
    pub fn owner_uid(&self, pid: u32) -> Option<u32> {
        let path = format!("{}/{}/status", self.proc_path, pid);
        let content = self.fs.read_to_string(Path::new(&path)).ok()?;
        parse_proc_status(&content).uid
    }

    /// Username of the process owner; `None` when the UID cannot be read
    /// or has no row in the user database.
    pub fn owner_name(&self, pid: u32) -> Option<String> {
        let uid = self.owner_uid(pid)?;
        self.users.resolve(uid).map(str::to_string)
    }

    /// Seconds the process has been alive: system uptime minus the
    /// starttime field converted from ticks. 0 when the stat record is
    /// unreadable or starttime is malformed.
    pub fn uptime_seconds(&self, pid: u32) -> u64 {
        let path = format!("{}/{}/stat", self.proc_path, pid);
        let Ok(content) = self.fs.read_to_string(Path::new(&path)) else {
            return 0;
        };
        match parse_proc_times(&content) {
            Some(times) => self
                .system_uptime()
                .saturating_sub(times.starttime / CLK_TCK),
            None => 0,
        }
    }

    /// The five CPU time fields of the stat record, each converted from
    /// ticks to seconds.
    ///
    /// `None` — the "no data" signal — when the record is unreadable or
    /// any field is missing or malformed, which happens routinely when a
    /// process exits mid-collection.
    pub fn cpu_times(&self, pid: u32) -> Option<CpuTimes> {
        let path = format!("{}/{}/stat", self.proc_path, pid);
        let content = self.fs.read_to_string(Path::new(&path)).ok()?;
        let raw = parse_proc_times(&content)?;

        let ticks = CLK_TCK as f64;
        Some(CpuTimes {
            utime: raw.utime as f64 / ticks,
            stime: raw.stime as f64 / ticks,
            cutime: raw.cutime as f64 / ticks,
            cstime: raw.cstime as f64 / ticks,
            starttime: raw.starttime as f64 / ticks,
        })
    }

    /// Builds a fully populated snapshot of one process.
    ///
    /// Each field is derived independently and best-effort; a process
    /// that vanished mid-read produces a snapshot with zeroed fields for
    /// this cycle rather than an error.
    pub fn collect(&self, pid: u32) -> ProcessSnapshot {
        let cpu_utilization = self.cpu_usage(pid);
        let user = self.owner_name(pid).unwrap_or_default();
        let command = self.command(pid);
        let ram_mb = match self.vm_data_kb(pid) {
            Some(kb) => (kb / 1024).to_string(),
            None => "0".to_string(),
        };
        let uptime_seconds = self.uptime_seconds(pid);

        ProcessSnapshot {
            pid,
            user,
            command,
            cpu_utilization,
            ram_mb,
            uptime_seconds,
        }
    }

    /// Lifetime CPU usage ratio: total CPU seconds (own plus waited-for
    /// children) over seconds alive.
    ///
    /// 0 when the time fields are unavailable or no wall time has elapsed
    /// yet. The result is deliberately not clamped: accounting for
    /// multi-threaded processes can push it above 1.0 transiently.
    fn cpu_usage(&self, pid: u32) -> f64 {
        let Some(times) = self.cpu_times(pid) else {
            return 0.0;
        };
        let total = times.utime + times.stime + times.cutime + times.cstime;
        let elapsed = self.system_uptime() as f64 - times.starttime;
        if elapsed <= 0.0 {
            return 0.0;
        }
        total / elapsed
    }

    fn system_uptime(&self) -> u64 {
        let path = format!("{}/uptime", self.proc_path);
        self.fs
            .read_to_string(Path::new(&path))
            .ok()
            .and_then(|content| parse_uptime(&content))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    fn stat_line(pid: u32, comm: &str, times: [u64; 4], starttime: u64) -> String {
        format!(
            "{pid} ({comm}) S 1 {pid} {pid} 0 -1 4194304 100 0 0 0 {} {} {} {} 20 0 1 0 {starttime} 10000000 500 18446744073709551615",
            times[0], times[1], times[2], times[3]
        )
    }

    fn collector_with(fs: MockFs) -> ProcessCollector<MockFs> {
        ProcessCollector::new(fs, "/proc")
    }

    #[test]
    fn command_from_cmdline_record() {
        let collector = collector_with(MockFs::typical_system());
        assert_eq!(collector.command(1), "/sbin/init splash");
        // Unreadable record degrades to empty, not an error.
        assert_eq!(collector.command(99999), "");
    }

    #[test]
    fn ram_renders_whole_megabytes() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/10/status", "Uid:\t0\t0\t0\t0\nVmData:\t2048 kB\n");
        let collector = collector_with(fs);
        assert_eq!(collector.vm_data_kb(10), Some(2048));
        assert_eq!(collector.collect(10).ram_mb, "2");
    }

    #[test]
    fn ram_absent_field_renders_zero() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/10/status", "Name:\tkswapd0\nUid:\t0\t0\t0\t0\n");
        let collector = collector_with(fs);
        assert_eq!(collector.vm_data_kb(10), None);
        assert_eq!(collector.collect(10).ram_mb, "0");
    }

    #[test]
    fn owner_resolution() {
        let collector = collector_with(MockFs::typical_system());
        assert_eq!(collector.owner_uid(1), Some(0));
        assert_eq!(collector.owner_name(1).as_deref(), Some("root"));
        assert_eq!(collector.owner_name(4242).as_deref(), Some("postgres"));
    }

    #[test]
    fn owner_unknown_uid_is_none() {
        let mut fs = MockFs::new();
        fs.add_file("/etc/passwd", "root:x:0:0:root:/root:/bin/bash\n");
        fs.add_file("/proc/10/status", "Uid:\t4321\t4321\t4321\t4321\n");
        let collector = collector_with(fs);
        assert_eq!(collector.owner_uid(10), Some(4321));
        assert_eq!(collector.owner_name(10), None);
        assert_eq!(collector.collect(10).user, "");
    }

    #[test]
    fn uptime_subtracts_start_from_system_uptime() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "1000.50 2000.00\n");
        // starttime 40000 ticks = 400 s after boot.
        fs.add_file("/proc/10/stat", stat_line(10, "worker", [0, 0, 0, 0], 40000));
        let collector = collector_with(fs);
        assert_eq!(collector.uptime_seconds(10), 600);
    }

    #[test]
    fn uptime_malformed_starttime_is_zero() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "1000.00 2000.00\n");
        fs.add_file("/proc/10/stat", "10 (worker) S 1 10 10 0 -1 4194304 100");
        let collector = collector_with(fs);
        assert_eq!(collector.uptime_seconds(10), 0);
    }

    #[test]
    fn cpu_times_converted_to_seconds() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "1000.00 2000.00\n");
        fs.add_file(
            "/proc/10/stat",
            stat_line(10, "worker", [1000, 500, 250, 250], 40000),
        );
        let collector = collector_with(fs);
        let times = collector.cpu_times(10).unwrap();
        assert_eq!(times.utime, 10.0);
        assert_eq!(times.stime, 5.0);
        assert_eq!(times.cutime, 2.5);
        assert_eq!(times.cstime, 2.5);
        assert_eq!(times.starttime, 400.0);
    }

    #[test]
    fn cpu_usage_over_elapsed_wall_time() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "1000.00 2000.00\n");
        // 20 CPU seconds over 600 s alive.
        fs.add_file(
            "/proc/10/stat",
            stat_line(10, "worker", [1000, 500, 250, 250], 40000),
        );
        let collector = collector_with(fs);
        let snapshot = collector.collect(10);
        assert!((snapshot.cpu_utilization - 20.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn cpu_usage_truncated_record_is_zero_not_a_crash() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "1000.00 2000.00\n");
        // Record cut off before starttime: partial data reads as no data.
        fs.add_file(
            "/proc/10/stat",
            "10 (worker) S 1 10 10 0 -1 4194304 100 0 0 0 100 50 200 100",
        );
        let collector = collector_with(fs);
        assert_eq!(collector.cpu_times(10), None);
        assert_eq!(collector.collect(10).cpu_utilization, 0.0);
    }

    #[test]
    fn cpu_usage_zero_elapsed_is_zero() {
        let mut fs = MockFs::new();
        // Process started exactly at the current uptime tick.
        fs.add_file("/proc/uptime", "400.00 800.00\n");
        fs.add_file(
            "/proc/10/stat",
            stat_line(10, "worker", [100, 100, 0, 0], 40000),
        );
        let collector = collector_with(fs);
        assert_eq!(collector.collect(10).cpu_utilization, 0.0);
    }

    #[test]
    fn vanished_process_yields_zeroed_snapshot() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/uptime", "1000.00 2000.00\n");
        let collector = collector_with(fs);

        let snapshot = collector.collect(31337);
        assert_eq!(snapshot.pid, 31337);
        assert_eq!(snapshot.user, "");
        assert_eq!(snapshot.command, "");
        assert_eq!(snapshot.cpu_utilization, 0.0);
        assert_eq!(snapshot.ram_mb, "0");
        assert_eq!(snapshot.uptime_seconds, 0);
    }

    #[test]
    fn collect_populates_all_fields_from_scenario() {
        let collector = collector_with(MockFs::typical_system());
        let snapshot = collector.collect(4242);
        assert_eq!(snapshot.pid, 4242);
        assert_eq!(snapshot.user, "postgres");
        assert_eq!(snapshot.command, "postgres -D /var/lib/postgresql/data");
        assert_eq!(snapshot.ram_mb, "150");
        assert!(snapshot.cpu_utilization > 0.0);
        assert!(snapshot.uptime_seconds > 0);
    }
}
