//! Line sources feeding the extractor.
//!
//! A [`LineSource`] names a resource and opens it as a buffered reader. The extractor
//! pulls lines from that reader one at a time, so a source is read lazily, front to back,
//! exactly once per extraction. Opening a source again starts over from the beginning.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::ExtractError;

/// Anything that can be opened as an ordered, finite sequence of text lines.
pub trait LineSource {
    type Reader: BufRead;

    /// Human readable name used in errors, e.g. the file path.
    fn name(&self) -> String;

    /// Opens the source for a single forward pass.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::SourceUnavailable`] if the resource cannot be opened.
    fn open(self) -> Result<Self::Reader, ExtractError>;
}

/// A file on disk, typically below `/proc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    type Reader = BufReader<File>;

    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(self) -> Result<Self::Reader, ExtractError> {
        (&self).open()
    }
}

impl LineSource for &FileSource {
    type Reader = BufReader<File>;

    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(self) -> Result<Self::Reader, ExtractError> {
        let file = File::open(&self.path).map_err(|source| {
            ExtractError::unavailable(self.path.display().to_string(), source)
        })?;
        Ok(BufReader::new(file))
    }
}

/// An already opened reader with a name attached.
///
/// ```rust
/// use proc_metrics::procfs::{LineSource, ReaderSource};
///
/// let source = ReaderSource::new("inline", "MemTotal: 1 kB\n".as_bytes());
/// assert_eq!(source.name(), "inline");
/// ```
#[derive(Debug)]
pub struct ReaderSource<R> {
    name: String,
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    type Reader = R;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn open(self) -> Result<Self::Reader, ExtractError> {
        Ok(self.reader)
    }
}
