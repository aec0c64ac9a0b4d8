use crate::collector;
use crate::procfs::{KernelStat, MemInfo, VmStat};

/// Wire form of a single snapshot.
#[derive(Debug, serde::Serialize)]
pub struct SnapshotBody<S> {
    pub timestamp: u64,
    pub metrics: S,
}

impl<S> From<collector::Snapshot<S>> for SnapshotBody<S> {
    fn from(value: collector::Snapshot<S>) -> Self {
        Self {
            timestamp: value.timestamp(),
            metrics: value.into_metrics(),
        }
    }
}

/// Wire form of `/proc`; sources that could not be read are left out.
#[derive(Debug, Default, serde::Serialize)]
pub struct AllSnapshots {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meminfo: Option<SnapshotBody<MemInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vmstat: Option<SnapshotBody<VmStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stat: Option<SnapshotBody<KernelStat>>,
}

impl AllSnapshots {
    /// True when no source could be read.
    pub fn is_empty(&self) -> bool {
        self.meminfo.is_none() && self.vmstat.is_none() && self.stat.is_none()
    }
}
