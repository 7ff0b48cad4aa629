//! Delta-based aggregate CPU utilization.
//!
//! `/proc/stat` CPU counters are cumulative ticks since boot, so a
//! utilization percentage only exists between two samples. This module is
//! the single piece of cross-call state in the whole collection layer.

use crate::collector::procfs::parser::CpuSample;

/// Previous-sample state for the aggregate CPU utilization computation.
///
/// Starts at zero, so the first utilization reported spans the entire
/// uptime since boot rather than a short window; subsequent calls measure
/// the interval between samples. Single-writer: the two floats are read
/// and then rewritten non-atomically, so concurrent use of one instance
/// requires external serialization.
#[derive(Debug, Clone, Default)]
pub struct CpuRateState {
    prev_total: f64,
    prev_idle: f64,
}

impl CpuRateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the previous sample; the next utilization spans since boot
    /// again.
    pub fn reset(&mut self) {
        self.prev_total = 0.0;
        self.prev_idle = 0.0;
    }
}

/// Updates `state` with `sample` and returns the utilization of the
/// elapsed window as a ratio in [0, 1].
///
/// Total time excludes guest and guest_nice: the kernel already accounts
/// guest time inside user and nice. Idle time is idle plus iowait.
///
/// Returns 0.0 when no ticks elapsed between samples (identical samples,
/// or counters that went backwards after a counter reset) instead of
/// dividing by zero.
pub fn cpu_utilization(state: &mut CpuRateState, sample: &CpuSample) -> f64 {
    let total = (sample.user
        + sample.nice
        + sample.system
        + sample.idle
        + sample.iowait
        + sample.irq
        + sample.softirq
        + sample.steal) as f64;
    let idle = (sample.idle + sample.iowait) as f64;

    let diff_total = total - state.prev_total;
    let diff_idle = idle - state.prev_idle;

    state.prev_total = total;
    state.prev_idle = idle;

    if diff_total <= 0.0 {
        return 0.0;
    }
    (diff_total - diff_idle) / diff_total
}
