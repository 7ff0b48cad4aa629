//! Parsers for the textual records exposed under `/proc`.
//!
//! These are pure functions from file content to typed data, testable with
//! string inputs and no filesystem. None of them fail hard: a missing key
//! or a non-numeric value becomes `None` or a zeroed field, and the caller
//! decides what default to present. Absence is always distinguishable from
//! a real zero where it matters (`Option` instead of 0).

use std::collections::HashMap;

/// Extracts `PRETTY_NAME` from os-release content.
///
/// Lines are `KEY=value` or `KEY="value"`; surrounding quotes are stripped
/// from the returned value. `None` if the key is not present.
pub fn parse_os_release(content: &str) -> Option<String> {
    for line in content.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim() == "PRETTY_NAME" {
            return Some(value.trim().trim_matches('"').to_string());
        }
    }
    None
}

/// Extracts the kernel release from `/proc/version` content.
///
/// The first line reads `Linux version <release> ...`; the release is the
/// third whitespace-separated token.
pub fn parse_kernel_version(content: &str) -> Option<String> {
    content
        .lines()
        .next()?
        .split_whitespace()
        .nth(2)
        .map(str::to_string)
}

/// Extracts system uptime in whole seconds from `/proc/uptime` content.
///
/// The first whitespace-separated field is uptime as a fractional second
/// count; it is truncated to an integer. `None` if missing or non-numeric.
pub fn parse_uptime(content: &str) -> Option<u64> {
    content
        .split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .map(|secs| secs as u64)
}

/// The two fields of `/proc/meminfo` the memory ratio needs, in kB.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_free: u64,
}

/// Parses `/proc/meminfo` content for `MemTotal` and `MemFree`.
///
/// Lines are `Key:  value kB`. Absent or non-numeric fields stay 0.
pub fn parse_meminfo(content: &str) -> MemInfo {
    let mut info = MemInfo::default();

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total = parse_kb(line);
        } else if line.starts_with("MemFree:") {
            info.mem_free = parse_kb(line);
        }
    }
    info
}

/// Aggregate CPU time counters from the `cpu` line of `/proc/stat`.
///
/// Cumulative kernel ticks since boot, in the kernel's fixed column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuSample {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

/// System-wide data extracted from `/proc/stat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatInfo {
    /// The aggregate `cpu` line (not `cpu0`, `cpu1`, ...). `None` when the
    /// record has no such line.
    pub cpu: Option<CpuSample>,
    /// Total forks since boot (`processes` key).
    pub processes: u64,
    /// Currently runnable tasks (`procs_running` key).
    pub procs_running: u32,
}

/// Parses `/proc/stat` content.
///
/// Only the aggregate `cpu` line is consumed; per-core lines are skipped.
/// Missing or malformed numeric fields become 0.
pub fn parse_stat(content: &str) -> StatInfo {
    let mut info = StatInfo::default();

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "cpu" => {
                let get_val = |idx: usize| -> u64 {
                    parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0)
                };
                info.cpu = Some(CpuSample {
                    user: get_val(1),
                    nice: get_val(2),
                    system: get_val(3),
                    idle: get_val(4),
                    iowait: get_val(5),
                    irq: get_val(6),
                    softirq: get_val(7),
                    steal: get_val(8),
                    guest: get_val(9),
                    guest_nice: get_val(10),
                });
            }
            "processes" => {
                info.processes = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
            }
            "procs_running" => {
                info.procs_running = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0);
            }
            _ => {}
        }
    }
    info
}

// Positional offsets into `/proc/[pid]/stat` counted after the comm field,
// which is field 2 of the record and may itself contain spaces. Field N of
// the record (1-indexed) lands at offset N - 3.
const STAT_UTIME: usize = 11;
const STAT_STIME: usize = 12;
const STAT_CUTIME: usize = 13;
const STAT_CSTIME: usize = 14;
const STAT_STARTTIME: usize = 19;

/// Raw per-process CPU time fields from `/proc/[pid]/stat`, in ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcTimes {
    pub utime: u64,
    pub stime: u64,
    pub cutime: i64,
    pub cstime: i64,
    /// Ticks after boot at which the process started.
    pub starttime: u64,
}

/// Parses the CPU time fields out of `/proc/[pid]/stat` content.
///
/// The comm field is enclosed in parentheses and may contain spaces and
/// parentheses of its own, so fields are counted from the *last* `)`.
/// Returns `None` when any of the five fields is missing or non-numeric —
/// a truncated record from a dying process must read as "no data", not as
/// zeros.
pub fn parse_proc_times(content: &str) -> Option<ProcTimes> {
    let content = content.trim();
    let close_paren = content.rfind(')')?;
    let fields: Vec<&str> = content[close_paren + 1..].split_whitespace().collect();

    Some(ProcTimes {
        utime: fields.get(STAT_UTIME)?.parse().ok()?,
        stime: fields.get(STAT_STIME)?.parse().ok()?,
        cutime: fields.get(STAT_CUTIME)?.parse().ok()?,
        cstime: fields.get(STAT_CSTIME)?.parse().ok()?,
        starttime: fields.get(STAT_STARTTIME)?.parse().ok()?,
    })
}

/// Ownership and memory fields from `/proc/[pid]/status`.
///
/// `None` fields were absent from the record. `VmData` in particular is
/// not reported for kernel threads and varies by kernel version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    /// Real UID (first value of the `Uid` line).
    pub uid: Option<u32>,
    /// Data segment size in kB (`VmData` line).
    pub vm_data_kb: Option<u64>,
}

/// Parses `/proc/[pid]/status` content.
///
/// Lines are `Key:\tvalue ...`; `Uid` carries four values (real,
/// effective, saved, fs) of which only the first is taken.
pub fn parse_proc_status(content: &str) -> StatusInfo {
    let mut info = StatusInfo::default();

    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        match key.trim() {
            "Uid" => {
                info.uid = value.split_whitespace().next().and_then(|s| s.parse().ok());
            }
            "VmData" => {
                info.vm_data_kb = value.split_whitespace().next().and_then(|s| s.parse().ok());
            }
            _ => {}
        }
    }
    info
}

/// Renders `/proc/[pid]/cmdline` content for display.
///
/// Arguments are NUL-separated in the record; separators become spaces and
/// the result is trimmed. An empty record (kernel thread) stays empty.
pub fn parse_cmdline(content: &str) -> String {
    content.replace('\0', " ").trim().to_string()
}

/// Parses passwd content (`name:password:uid:...`) into a UID → username map.
///
/// Comment and malformed lines are skipped; rows with a non-numeric UID
/// field are ignored.
pub fn parse_passwd(content: &str) -> HashMap<u32, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split(':').collect();
        if parts.len() >= 3
            && let Ok(uid) = parts[2].parse::<u32>()
        {
            map.insert(uid, parts[0].to_string());
        }
    }
    map
}

/// UID → username lookup backed by a parsed passwd record.
#[derive(Debug, Clone, Default)]
pub struct UserResolver {
    uid_to_name: HashMap<u32, String>,
}

impl UserResolver {
    /// Creates an empty resolver; every lookup misses until loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the mappings with those parsed from passwd content.
    pub fn load_from_content(&mut self, content: &str) {
        self.uid_to_name = parse_passwd(content);
    }

    /// Resolves a UID to its username, `None` when no row matches.
    pub fn resolve(&self, uid: u32) -> Option<&str> {
        self.uid_to_name.get(&uid).map(String::as_str)
    }

    pub fn is_loaded(&self) -> bool {
        !self.uid_to_name.is_empty()
    }
}
