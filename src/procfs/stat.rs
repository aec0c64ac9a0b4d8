//! Schema for `/proc/stat`.
//!
//! Only system-wide lines are captured. Per-CPU lines (`cpu0`, `cpu1`, ...) share the
//! `cpu` prefix with the aggregate line, so keys are matched exactly. Multi-number
//! values such as the `cpu` jiffies or the `intr` counters are kept as a single
//! space-separated text value.

use super::{KeyFieldMapping, MatchPolicy, MetricValue, MetricsSchema};

/// Kernel and system statistics from `/proc/stat`.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct KernelStat {
    /// Aggregate CPU time in USER_HZ: user nice system idle iowait irq softirq steal guest guest_nice.
    pub cpu: Option<MetricValue>,
    /// Total interrupts serviced followed by per-interrupt counts.
    pub intr: Option<MetricValue>,
    /// Context switches since boot.
    pub ctxt: Option<MetricValue>,
    /// Boot time in seconds since the epoch.
    pub btime: Option<MetricValue>,
    /// Forks since boot.
    pub processes: Option<MetricValue>,
    pub procs_running: Option<MetricValue>,
    pub procs_blocked: Option<MetricValue>,
    pub softirq: Option<MetricValue>,
}

impl MetricsSchema for KernelStat {
    const DELIMITER: char = ' ';

    fn mapping() -> KeyFieldMapping<Self> {
        KeyFieldMapping::<Self>::builder(MatchPolicy::Exact)
            .field("cpu", |s, v| s.cpu = Some(v))
            .field("intr", |s, v| s.intr = Some(v))
            .field("ctxt", |s, v| s.ctxt = Some(v))
            .field("btime", |s, v| s.btime = Some(v))
            .field("processes", |s, v| s.processes = Some(v))
            .field("procs_running", |s, v| s.procs_running = Some(v))
            .field("procs_blocked", |s, v| s.procs_blocked = Some(v))
            .field("softirq", |s, v| s.softirq = Some(v))
            .build()
    }
}
