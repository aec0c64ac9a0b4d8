//! Schema for `/proc/vmstat`.
//!
//! Lines are `name value` pairs separated by a single space. Counter names are plain
//! identifiers and many of them share prefixes (`nr_dirty`, `nr_dirty_threshold`,
//! `nr_dirtied`), so keys are matched exactly.

use super::{KeyFieldMapping, MatchPolicy, MetricValue, MetricsSchema};

/// Virtual memory counters from `/proc/vmstat`.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct VmStat {
    /// Free pages.
    pub nr_free_pages: Option<MetricValue>,
    /// Pages waiting to be written back.
    pub nr_dirty: Option<MetricValue>,
    /// Pages under writeback.
    pub nr_writeback: Option<MetricValue>,
    pub nr_dirty_threshold: Option<MetricValue>,
    pub nr_dirty_background_threshold: Option<MetricValue>,
    /// KiB paged in from disk since boot.
    pub pgpgin: Option<MetricValue>,
    /// KiB paged out to disk since boot.
    pub pgpgout: Option<MetricValue>,
    /// Pages swapped in since boot.
    pub pswpin: Option<MetricValue>,
    /// Pages swapped out since boot.
    pub pswpout: Option<MetricValue>,
    pub pgfault: Option<MetricValue>,
    pub pgmajfault: Option<MetricValue>,
    /// Number of OOM kills since boot.
    pub oom_kill: Option<MetricValue>,
}

impl MetricsSchema for VmStat {
    const DELIMITER: char = ' ';

    fn mapping() -> KeyFieldMapping<Self> {
        KeyFieldMapping::<Self>::builder(MatchPolicy::Exact)
            .field("nr_free_pages", |s, v| s.nr_free_pages = Some(v))
            .field("nr_dirty", |s, v| s.nr_dirty = Some(v))
            .field("nr_writeback", |s, v| s.nr_writeback = Some(v))
            .field("nr_dirty_threshold", |s, v| s.nr_dirty_threshold = Some(v))
            .field("nr_dirty_background_threshold", |s, v| {
                s.nr_dirty_background_threshold = Some(v)
            })
            .field("pgpgin", |s, v| s.pgpgin = Some(v))
            .field("pgpgout", |s, v| s.pgpgout = Some(v))
            .field("pswpin", |s, v| s.pswpin = Some(v))
            .field("pswpout", |s, v| s.pswpout = Some(v))
            .field("pgfault", |s, v| s.pgfault = Some(v))
            .field("pgmajfault", |s, v| s.pgmajfault = Some(v))
            .field("oom_kill", |s, v| s.oom_kill = Some(v))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procfs::{Extractor, ReaderSource};

    fn extract(data: &str) -> VmStat {
        Extractor::<VmStat>::new()
            .extract(ReaderSource::new("vmstat", data.as_bytes()))
            .unwrap()
    }

    #[test]
    fn test_parse_vmstat() {
        let data = "\
nr_free_pages 25000
nr_zone_inactive_anon 1000
nr_dirty 87
nr_writeback 0
nr_writeback_temp 5
nr_dirtied 123456
nr_dirty_threshold 150000
nr_dirty_background_threshold 75000
pgpgin 4000000
pgpgout 9000000
pswpin 0
pswpout 0
pgfault 700000000
pgmajfault 20000
oom_kill 1
";
        let stat = extract(data);
        assert_eq!(stat.nr_free_pages.unwrap(), "25000");
        assert_eq!(stat.nr_dirty.unwrap(), "87");
        assert_eq!(stat.nr_writeback.unwrap(), "0");
        assert_eq!(stat.nr_dirty_threshold.unwrap(), "150000");
        assert_eq!(stat.nr_dirty_background_threshold.unwrap(), "75000");
        assert_eq!(stat.pgpgin.unwrap(), "4000000");
        assert_eq!(stat.pgpgout.unwrap(), "9000000");
        assert_eq!(stat.pswpin.unwrap(), "0");
        assert_eq!(stat.pswpout.unwrap(), "0");
        assert_eq!(stat.pgfault.unwrap(), "700000000");
        assert_eq!(stat.pgmajfault.unwrap(), "20000");
        assert_eq!(stat.oom_kill.unwrap(), "1");
    }

    #[test]
    fn test_similar_names_do_not_collide() {
        let stat = extract("nr_dirty 1\nnr_dirtied 2\nnr_writeback_temp 3\n");
        assert_eq!(stat.nr_dirty.unwrap(), "1");
        assert_eq!(stat.nr_writeback, None);
    }

    #[test]
    fn test_older_kernel_without_oom_kill() {
        let stat = extract("pgfault 10\n");
        assert_eq!(stat.oom_kill, None);
        assert_eq!(stat.pgfault.unwrap(), "10");
    }
}
