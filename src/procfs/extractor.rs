//! Generic extraction of typed snapshots from `key: value` style procfs files.
//!
//! A metrics source is described by a snapshot type implementing [`MetricsSchema`]. The
//! schema supplies its delimiter and its [`KeyFieldMapping`]; everything else (reading
//! lines, tokenizing, key resolution, storing values) is shared by all schemas through
//! [`Extractor`].
//!
//! # Behaviour
//!
//! - Lines without a delimiter and lines whose key is unknown are skipped.
//! - Values are stored as text; nothing is validated numerically.
//! - A key seen twice in one pass keeps the value of its last occurrence.
//! - Fields whose key never appears stay `None`.
//! - Invalid UTF-8 is replaced with `U+FFFD` line by line and never fails the extraction.
//! - Only a failure to open or read the source fails the extraction, and then no
//!   partial snapshot is returned.
//!
//! # Example: adding a schema
//!
//! ```rust
//! use proc_metrics::procfs::{
//!     Extractor, KeyFieldMapping, MatchPolicy, MetricValue, MetricsSchema, ReaderSource,
//! };
//!
//! #[derive(Debug, Default)]
//! struct LoadStat {
//!     foo: Option<MetricValue>,
//!     bar: Option<MetricValue>,
//! }
//!
//! impl MetricsSchema for LoadStat {
//!     const DELIMITER: char = '=';
//!
//!     fn mapping() -> KeyFieldMapping<Self> {
//!         KeyFieldMapping::<Self>::builder(MatchPolicy::Exact)
//!             .field("foo", |s, v| s.foo = Some(v))
//!             .field("bar", |s, v| s.bar = Some(v))
//!             .build()
//!     }
//! }
//!
//! let extractor = Extractor::<LoadStat>::new();
//! let stat = extractor
//!     .extract(ReaderSource::new("inline", "foo=1\nbaz=2\n".as_bytes()))
//!     .unwrap();
//! assert_eq!(stat.foo, Some(MetricValue::new("1")));
//! assert_eq!(stat.bar, None);
//! ```

use std::io::BufRead;

use super::tokenizer::DEFAULT_DELIMITER;
use super::{ExtractError, KeyFieldMapping, LineSource, LineTokenizer, TokenizeError};

/// A snapshot type together with the knowledge needed to fill it from a source.
pub trait MetricsSchema: Default + Sized {
    /// Character separating a line's key from its value.
    const DELIMITER: char = DEFAULT_DELIMITER;

    /// Builds the key to field table for this schema.
    ///
    /// Called once per [`Extractor`]; the result is never mutated afterwards.
    fn mapping() -> KeyFieldMapping<Self>;

    /// Called for every line whose key does not resolve to a field.
    ///
    /// Unknown keys are expected as the kernel gains new ones, so the default does nothing.
    #[inline]
    fn on_unknown_key(_key: &str, _value: &str, _lineno: usize) {}

    /// Called for every line that could not be split into key and value.
    #[inline]
    fn on_untokenizable_line(_err: &TokenizeError, _lineno: usize) {}
}

/// Reads a [`LineSource`] into a snapshot of type `S`.
///
/// An extractor owns its tokenizer and mapping table. It holds no other state, so one
/// instance can serve any number of concurrent extractions.
pub struct Extractor<S> {
    tokenizer: LineTokenizer,
    mapping: KeyFieldMapping<S>,
}

impl<S: MetricsSchema> Extractor<S> {
    /// Creates an extractor using the schema's delimiter and mapping table.
    pub fn new() -> Self {
        Self::with_parts(LineTokenizer::new(S::DELIMITER), S::mapping())
    }

    /// Extracts a snapshot from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceUnavailable`] if the source cannot be opened or a
    /// read fails midway.
    pub fn extract(&self, source: impl LineSource) -> Result<S, ExtractError> {
        let name = source.name();
        let mut reader = source.open()?;
        self.extract_reader(&mut reader)
            .map_err(|err| ExtractError::unavailable(name, err))
    }

    /// Extracts a snapshot from an already opened reader.
    ///
    /// Lines are decoded lossily: bytes that are not valid UTF-8 become `U+FFFD` and the
    /// line is processed like any other.
    ///
    /// # Errors
    ///
    /// Returns the underlying `io::Error` if reading fails.
    pub fn extract_reader<R: BufRead>(&self, buf: &mut R) -> std::io::Result<S> {
        let mut snapshot = S::default();

        let mut line = Vec::new();
        let mut lineno = 0;
        while buf.read_until(b'\n', &mut line)? != 0 {
            lineno += 1;
            self.apply_line(&mut snapshot, &String::from_utf8_lossy(&line), lineno);
            line.clear();
        }

        Ok(snapshot)
    }

    fn apply_line(&self, snapshot: &mut S, line: &str, lineno: usize) {
        let token = match self.tokenizer.tokenize(line) {
            Ok(token) => token,
            Err(err) => {
                S::on_untokenizable_line(&err, lineno);
                return;
            }
        };

        match self.mapping.resolve(token.key) {
            Some(field) => field.apply(snapshot, token.value),
            None => S::on_unknown_key(token.key, &token.value, lineno),
        }
    }
}

impl<S> Extractor<S> {
    /// Creates an extractor from an explicit tokenizer and mapping table.
    pub fn with_parts(tokenizer: LineTokenizer, mapping: KeyFieldMapping<S>) -> Self {
        Self { tokenizer, mapping }
    }

    pub fn tokenizer(&self) -> &LineTokenizer {
        &self.tokenizer
    }

    pub fn mapping(&self) -> &KeyFieldMapping<S> {
        &self.mapping
    }
}

impl<S: MetricsSchema> Default for Extractor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for Extractor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("tokenizer", &self.tokenizer)
            .field("mapping", &self.mapping)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::{BufReader, Read};

    use super::*;
    use crate::procfs::{MatchPolicy, MetricValue, ReaderSource};

    #[derive(Debug, Default, PartialEq, Eq)]
    struct TestStat {
        active: Option<MetricValue>,
        active_anon: Option<MetricValue>,
        total: Option<MetricValue>,
    }

    thread_local! {
        static UNKNOWN: RefCell<Vec<(String, usize)>> = const { RefCell::new(Vec::new()) };
        static UNTOKENIZABLE: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    }

    impl MetricsSchema for TestStat {
        fn mapping() -> KeyFieldMapping<Self> {
            KeyFieldMapping::<Self>::builder(MatchPolicy::LongestPrefix)
                .field("Active", |s, v| s.active = Some(v))
                .field("Active(anon)", |s, v| s.active_anon = Some(v))
                .field("Total", |s, v| s.total = Some(v))
                .build()
        }

        fn on_unknown_key(key: &str, _value: &str, lineno: usize) {
            UNKNOWN.with(|u| u.borrow_mut().push((key.to_owned(), lineno)));
        }

        fn on_untokenizable_line(_err: &TokenizeError, lineno: usize) {
            UNTOKENIZABLE.with(|u| u.borrow_mut().push(lineno));
        }
    }

    fn extract(data: &str) -> TestStat {
        Extractor::<TestStat>::new()
            .extract(ReaderSource::new("test", data.as_bytes()))
            .unwrap()
    }

    /// Reader that yields some data and then fails.
    struct FailingReader {
        data: &'static [u8],
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.data.is_empty() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "device went away",
                ));
            }
            let n = buf.len().min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn empty_source_yields_empty_snapshot() {
        assert_eq!(extract(""), TestStat::default());
    }

    #[test]
    fn specific_key_is_not_captured_by_prefix() {
        let stat = extract("Active: 100 kB\nActive(anon): 50 kB\n");
        assert_eq!(stat.active, Some(MetricValue::new("100 kB")));
        assert_eq!(stat.active_anon, Some(MetricValue::new("50 kB")));

        let reversed = extract("Active(anon): 50 kB\nActive: 100 kB\n");
        assert_eq!(stat, reversed);
    }

    #[test]
    fn last_occurrence_wins() {
        let stat = extract("Total: 1 kB\nTotal: 2 kB\n");
        assert_eq!(stat.total, Some(MetricValue::new("2 kB")));
    }

    #[test]
    fn skipped_lines_reach_hooks() {
        UNKNOWN.with(|u| u.borrow_mut().clear());
        UNTOKENIZABLE.with(|u| u.borrow_mut().clear());

        let stat = extract("garbage line\nTotal: 1 kB\nMystery: 2 kB\n\n");
        assert_eq!(stat.total, Some(MetricValue::new("1 kB")));

        UNKNOWN.with(|u| assert_eq!(*u.borrow(), vec![("Mystery".to_owned(), 3)]));
        UNTOKENIZABLE.with(|u| assert_eq!(*u.borrow(), vec![1, 4]));
    }

    #[test]
    fn line_without_trailing_newline() {
        let stat = extract("Total: 1 kB");
        assert_eq!(stat.total, Some(MetricValue::new("1 kB")));
    }

    #[test]
    fn crlf_line_endings() {
        let stat = extract("Total: 1 kB\r\nActive: 2 kB\r\n");
        assert_eq!(stat.total, Some(MetricValue::new("1 kB")));
        assert_eq!(stat.active, Some(MetricValue::new("2 kB")));
    }

    #[test]
    fn read_failure_is_fatal() {
        let reader = BufReader::new(FailingReader {
            data: b"Total: 1 kB\n",
        });
        let err = Extractor::<TestStat>::new()
            .extract(ReaderSource::new("flaky", reader))
            .unwrap_err();
        match err {
            ExtractError::SourceUnavailable { name, source } => {
                assert_eq!(name, "flaky");
                assert_eq!(source.kind(), std::io::ErrorKind::Other);
            }
        }
    }

    #[test]
    fn invalid_utf8_line_does_not_drop_neighbours() {
        let data: &[u8] = b"Total: 1 kB\nVendorNote: \xff\xfe\nActive: 2 kB\n";
        let stat = Extractor::<TestStat>::new()
            .extract(ReaderSource::new("binary", data))
            .unwrap();
        assert_eq!(stat.total, Some(MetricValue::new("1 kB")));
        assert_eq!(stat.active, Some(MetricValue::new("2 kB")));
    }

    #[test]
    fn invalid_utf8_value_is_stored_lossily() {
        let data: &[u8] = b"Total: \xff kB\n";
        let stat = Extractor::<TestStat>::new()
            .extract(ReaderSource::new("binary", data))
            .unwrap();
        assert_eq!(stat.total, Some(MetricValue::new("\u{FFFD} kB")));
    }

    #[test]
    fn custom_parts() {
        let mapping = KeyFieldMapping::<TestStat>::builder(MatchPolicy::Exact)
            .field("total", |s, v| s.total = Some(v))
            .build();
        let extractor = Extractor::with_parts(LineTokenizer::new('='), mapping);
        let stat = extractor
            .extract_reader(&mut "total=42\ntotal_extra=1\n".as_bytes())
            .unwrap();
        assert_eq!(stat.total, Some(MetricValue::new("42")));
        assert_eq!(extractor.tokenizer().delimiter(), '=');
        assert_eq!(extractor.mapping().policy(), MatchPolicy::Exact);
    }

    #[test]
    fn extractor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Extractor<TestStat>>();
    }
}
