//! Schema for `/proc/meminfo`.
//!
//! Every line has the form `Key:   value [kB]`. Keys are matched by prefix with the
//! longest key tried first, so the qualified `Active(anon)` and friends never end up in
//! `Active`. Newer kernels add keys that start with an older key (`ShmemHugePages` vs
//! `Shmem`, `Zswapped` vs `Zswap`); those have their own fields for the same reason.
//! Values keep their unit suffix.
//!
//! ```rust
//! use proc_metrics::procfs::{Extractor, MemInfo, MetricValue, ReaderSource};
//!
//! let data = "MemTotal:      3965536 kB\nActive(anon):  50 kB\n";
//! let info = Extractor::<MemInfo>::new()
//!     .extract(ReaderSource::new("meminfo", data.as_bytes()))
//!     .unwrap();
//! assert_eq!(info.mem_total, Some(MetricValue::new("3965536 kB")));
//! assert_eq!(info.active_anon, Some(MetricValue::new("50 kB")));
//! assert_eq!(info.active, None);
//! ```
//!
//! # Bare numbers
//!
//! The shipped table uses [`ValueNormalization::KeepUnit`] everywhere. A consumer that
//! wants bare numbers builds its own table with [`ValueNormalization::StripUnit`] and hands
//! it to [`Extractor::with_parts`]:
//!
//! ```rust
//! use proc_metrics::procfs::{
//!     Extractor, KeyFieldMapping, LineTokenizer, MatchPolicy, MemInfo, MetricValue,
//!     ReaderSource, ValueNormalization,
//! };
//!
//! let mapping = KeyFieldMapping::<MemInfo>::builder(MatchPolicy::LongestPrefix)
//!     .field_with("MemTotal", ValueNormalization::StripUnit, |s, v| s.mem_total = Some(v))
//!     .build();
//! let info = Extractor::with_parts(LineTokenizer::default(), mapping)
//!     .extract(ReaderSource::new("meminfo", "MemTotal: 3965536 kB\n".as_bytes()))
//!     .unwrap();
//! assert_eq!(info.mem_total, Some(MetricValue::new("3965536")));
//! ```
//!
//! [`ValueNormalization::KeepUnit`]: super::ValueNormalization::KeepUnit
//! [`ValueNormalization::StripUnit`]: super::ValueNormalization::StripUnit
//! [`Extractor::with_parts`]: super::Extractor::with_parts

use super::{KeyFieldMapping, MatchPolicy, MetricValue, MetricsSchema};

/// Memory usage information for physical memory and swap, from `/proc/meminfo`.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct MemInfo {
    /// Usable RAM, i.e. physical RAM minus reserved bits and the kernel binary.
    pub mem_total: Option<MetricValue>,
    /// RAM left unused by the system.
    pub mem_free: Option<MetricValue>,
    /// Estimate of memory available for new workloads without swapping.
    pub mem_available: Option<MetricValue>,
    /// Temporary storage for raw disk blocks.
    pub buffers: Option<MetricValue>,
    /// In-memory cache for files read from disk, excluding swap cache.
    pub cached: Option<MetricValue>,
    /// Memory swapped out once and back in, still present in the swap file.
    pub swap_cached: Option<MetricValue>,
    /// Memory used recently and usually not reclaimed unless necessary.
    pub active: Option<MetricValue>,
    /// Memory used less recently and eligible for reclaim.
    pub inactive: Option<MetricValue>,
    /// `Active(anon)`
    pub active_anon: Option<MetricValue>,
    /// `Inactive(anon)`
    pub inactive_anon: Option<MetricValue>,
    /// `Active(file)`
    pub active_file: Option<MetricValue>,
    /// `Inactive(file)`
    pub inactive_file: Option<MetricValue>,
    /// `Unevictable`
    pub unevictable: Option<MetricValue>,
    /// `Mlocked`
    pub mlocked: Option<MetricValue>,
    /// Total swap space.
    pub swap_total: Option<MetricValue>,
    /// Unused swap space.
    pub swap_free: Option<MetricValue>,
    /// `Zswap`
    pub zswap: Option<MetricValue>,
    /// `Zswapped`
    pub zswapped: Option<MetricValue>,
    /// Memory waiting to be written back to disk.
    pub dirty: Option<MetricValue>,
    /// Memory actively being written back to disk.
    pub writeback: Option<MetricValue>,
    /// Non file backed pages mapped into user space page tables.
    pub anon_pages: Option<MetricValue>,
    /// Files which have been mapped, such as libraries.
    pub mapped: Option<MetricValue>,
    /// `Shmem`
    pub shmem: Option<MetricValue>,
    /// `KReclaimable`
    pub kreclaimable: Option<MetricValue>,
    /// In-kernel data structures cache.
    pub slab: Option<MetricValue>,
    /// Part of `Slab` that might be reclaimed.
    pub sreclaimable: Option<MetricValue>,
    /// Part of `Slab` that cannot be reclaimed.
    pub sunreclaim: Option<MetricValue>,
    /// `KernelStack`
    pub kernel_stack: Option<MetricValue>,
    /// `ShadowCallStack`
    pub shadow_call_stack: Option<MetricValue>,
    /// Memory dedicated to the lowest level of page tables.
    pub page_tables: Option<MetricValue>,
    /// `SecPageTables`
    pub sec_page_tables: Option<MetricValue>,
    /// `NFS_Unstable`
    pub nfs_unstable: Option<MetricValue>,
    /// Memory used for block device bounce buffers.
    pub bounce: Option<MetricValue>,
    /// `WritebackTmp`
    pub writeback_tmp: Option<MetricValue>,
    /// `CommitLimit`
    pub commit_limit: Option<MetricValue>,
    /// `Committed_AS`
    pub committed_as: Option<MetricValue>,
    /// Total size of the vmalloc virtual address space.
    pub vmalloc_total: Option<MetricValue>,
    /// Used part of the vmalloc area.
    pub vmalloc_used: Option<MetricValue>,
    /// `VmallocChunk`
    pub vmalloc_chunk: Option<MetricValue>,
    /// `Percpu`
    pub percpu: Option<MetricValue>,
    /// Memory the kernel removed after detecting hardware faults.
    pub hardware_corrupted: Option<MetricValue>,
    /// `AnonHugePages`
    pub anon_huge_pages: Option<MetricValue>,
    /// `ShmemHugePages`
    pub shmem_huge_pages: Option<MetricValue>,
    /// `ShmemPmdMapped`
    pub shmem_pmd_mapped: Option<MetricValue>,
    /// `FileHugePages`
    pub file_huge_pages: Option<MetricValue>,
    /// `FilePmdMapped`
    pub file_pmd_mapped: Option<MetricValue>,
    /// `CmaTotal`
    pub cma_total: Option<MetricValue>,
    /// `CmaFree`
    pub cma_free: Option<MetricValue>,
    /// `Unaccepted`
    pub unaccepted: Option<MetricValue>,
    /// Size of the huge page pool (`vm.nr_hugepages`).
    pub huge_pages_total: Option<MetricValue>,
    /// `HugePages_Free`
    pub huge_pages_free: Option<MetricValue>,
    /// `HugePages_Rsvd`
    pub huge_pages_rsvd: Option<MetricValue>,
    /// `HugePages_Surp`
    pub huge_pages_surp: Option<MetricValue>,
    /// `Hugepagesize`
    pub huge_page_size: Option<MetricValue>,
    /// `Hugetlb`
    pub hugetlb: Option<MetricValue>,
    /// `DirectMap4k`
    pub direct_map_4k: Option<MetricValue>,
    /// `DirectMap2M`
    pub direct_map_2m: Option<MetricValue>,
    /// `DirectMap1G`
    pub direct_map_1g: Option<MetricValue>,
}

impl MetricsSchema for MemInfo {
    fn mapping() -> KeyFieldMapping<Self> {
        KeyFieldMapping::<Self>::builder(MatchPolicy::LongestPrefix)
            .field("MemTotal", |m, v| m.mem_total = Some(v))
            .field("MemFree", |m, v| m.mem_free = Some(v))
            .field("MemAvailable", |m, v| m.mem_available = Some(v))
            .field("Buffers", |m, v| m.buffers = Some(v))
            .field("Cached", |m, v| m.cached = Some(v))
            .field("SwapCached", |m, v| m.swap_cached = Some(v))
            .field("Active", |m, v| m.active = Some(v))
            .field("Inactive", |m, v| m.inactive = Some(v))
            .field("Active(anon)", |m, v| m.active_anon = Some(v))
            .field("Inactive(anon)", |m, v| m.inactive_anon = Some(v))
            .field("Active(file)", |m, v| m.active_file = Some(v))
            .field("Inactive(file)", |m, v| m.inactive_file = Some(v))
            .field("Unevictable", |m, v| m.unevictable = Some(v))
            .field("Mlocked", |m, v| m.mlocked = Some(v))
            .field("SwapTotal", |m, v| m.swap_total = Some(v))
            .field("SwapFree", |m, v| m.swap_free = Some(v))
            .field("Zswap", |m, v| m.zswap = Some(v))
            .field("Zswapped", |m, v| m.zswapped = Some(v))
            .field("Dirty", |m, v| m.dirty = Some(v))
            .field("Writeback", |m, v| m.writeback = Some(v))
            .field("AnonPages", |m, v| m.anon_pages = Some(v))
            .field("Mapped", |m, v| m.mapped = Some(v))
            .field("Shmem", |m, v| m.shmem = Some(v))
            .field("KReclaimable", |m, v| m.kreclaimable = Some(v))
            .field("Slab", |m, v| m.slab = Some(v))
            .field("SReclaimable", |m, v| m.sreclaimable = Some(v))
            .field("SUnreclaim", |m, v| m.sunreclaim = Some(v))
            .field("KernelStack", |m, v| m.kernel_stack = Some(v))
            .field("ShadowCallStack", |m, v| m.shadow_call_stack = Some(v))
            .field("PageTables", |m, v| m.page_tables = Some(v))
            .field("SecPageTables", |m, v| m.sec_page_tables = Some(v))
            .field("NFS_Unstable", |m, v| m.nfs_unstable = Some(v))
            .field("Bounce", |m, v| m.bounce = Some(v))
            .field("WritebackTmp", |m, v| m.writeback_tmp = Some(v))
            .field("CommitLimit", |m, v| m.commit_limit = Some(v))
            .field("Committed_AS", |m, v| m.committed_as = Some(v))
            .field("VmallocTotal", |m, v| m.vmalloc_total = Some(v))
            .field("VmallocUsed", |m, v| m.vmalloc_used = Some(v))
            .field("VmallocChunk", |m, v| m.vmalloc_chunk = Some(v))
            .field("Percpu", |m, v| m.percpu = Some(v))
            .field("HardwareCorrupted", |m, v| m.hardware_corrupted = Some(v))
            .field("AnonHugePages", |m, v| m.anon_huge_pages = Some(v))
            .field("ShmemHugePages", |m, v| m.shmem_huge_pages = Some(v))
            .field("ShmemPmdMapped", |m, v| m.shmem_pmd_mapped = Some(v))
            .field("FileHugePages", |m, v| m.file_huge_pages = Some(v))
            .field("FilePmdMapped", |m, v| m.file_pmd_mapped = Some(v))
            .field("CmaTotal", |m, v| m.cma_total = Some(v))
            .field("CmaFree", |m, v| m.cma_free = Some(v))
            .field("Unaccepted", |m, v| m.unaccepted = Some(v))
            .field("HugePages_Total", |m, v| m.huge_pages_total = Some(v))
            .field("HugePages_Free", |m, v| m.huge_pages_free = Some(v))
            .field("HugePages_Rsvd", |m, v| m.huge_pages_rsvd = Some(v))
            .field("HugePages_Surp", |m, v| m.huge_pages_surp = Some(v))
            .field("Hugepagesize", |m, v| m.huge_page_size = Some(v))
            .field("Hugetlb", |m, v| m.hugetlb = Some(v))
            .field("DirectMap4k", |m, v| m.direct_map_4k = Some(v))
            .field("DirectMap2M", |m, v| m.direct_map_2m = Some(v))
            .field("DirectMap1G", |m, v| m.direct_map_1g = Some(v))
            .build()
    }
}
