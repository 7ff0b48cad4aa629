//! Derived views produced by the collectors for the display layer.

use std::cmp::Ordering;

/// One process at one observation point.
///
/// Fully populated when built by the process collector and immutable
/// afterwards; refreshing means collecting a new snapshot. Fields are
/// plain values with no live handle back to `/proc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSnapshot {
    pub pid: u32,
    /// Owner username; empty when the UID has no user-database row.
    pub user: String,
    /// Command line; empty for kernel threads and unreadable records.
    pub command: String,
    /// Lifetime CPU usage ratio. Usually within [0, 1] but not clamped:
    /// multi-threaded accounting can push it above 1.0.
    pub cpu_utilization: f64,
    /// Data segment size in whole megabytes, rendered as text ("0" when
    /// the kernel reports nothing).
    pub ram_mb: String,
    pub uptime_seconds: u64,
}

impl ProcessSnapshot {
    /// Comparator for top-style ranking: larger CPU utilization first.
    /// Ties keep whatever order the caller's sort gives them.
    pub fn top_order(a: &Self, b: &Self) -> Ordering {
        b.cpu_utilization.total_cmp(&a.cpu_utilization)
    }
}

/// System-wide figures shown in the header of the display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemOverview {
    pub os_name: String,
    pub kernel_version: String,
    /// Aggregate CPU utilization over the last refresh window, [0, 1].
    pub cpu_utilization: f64,
    /// Fraction of total memory in use, [0, 1].
    pub memory_utilization: f64,
    pub total_processes: u64,
    pub running_processes: u32,
    pub uptime_seconds: u64,
}
