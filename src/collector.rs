//! Reads procfs files into timestamped snapshots.
//!
//! [`ProcCollector`] owns one [`Extractor`] per supported source, each built once at
//! construction. Every call opens its file anew, so concurrent calls never share
//! anything but the read-only mapping tables.

use std::path::{Path, PathBuf};

use crate::procfs::{
    ExtractError, Extractor, FileSource, KernelStat, MemInfo, MetricsSchema, VmStat,
};

/// A snapshot together with the time it was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<S> {
    /// Timestamp (in UNIX epoch seconds)
    timestamp: u64,
    metrics: S,
}

impl<S> Snapshot<S> {
    pub fn new(timestamp: u64, metrics: S) -> Self {
        Self { timestamp, metrics }
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn metrics(&self) -> &S {
        &self.metrics
    }

    pub fn into_metrics(self) -> S {
        self.metrics
    }
}

/// Collects snapshots from the files below a procfs root.
#[derive(Debug)]
pub struct ProcCollector {
    root: PathBuf,
    meminfo: Extractor<MemInfo>,
    vmstat: Extractor<VmStat>,
    kernel_stat: Extractor<KernelStat>,
}

impl ProcCollector {
    /// Creates a collector for the procfs mounted at `root`, usually `/proc`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            meminfo: Extractor::new(),
            vmstat: Extractor::new(),
            kernel_stat: Extractor::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads `<root>/meminfo`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceUnavailable`] if the file cannot be read.
    pub fn meminfo(&self) -> Result<Snapshot<MemInfo>, ExtractError> {
        self.collect(&self.meminfo, "meminfo")
    }

    /// Reads `<root>/vmstat`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceUnavailable`] if the file cannot be read.
    pub fn vmstat(&self) -> Result<Snapshot<VmStat>, ExtractError> {
        self.collect(&self.vmstat, "vmstat")
    }

    /// Reads `<root>/stat`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceUnavailable`] if the file cannot be read.
    pub fn kernel_stat(&self) -> Result<Snapshot<KernelStat>, ExtractError> {
        self.collect(&self.kernel_stat, "stat")
    }

    fn collect<S: MetricsSchema>(
        &self,
        extractor: &Extractor<S>,
        file: &str,
    ) -> Result<Snapshot<S>, ExtractError> {
        let timestamp = unix_timestamp();
        let metrics = extractor.extract(FileSource::new(self.root.join(file)))?;
        Ok(Snapshot::new(timestamp, metrics))
    }
}

fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
