//! Defines structured error types for extracting procfs metrics.
//!
//! - [`ExtractError`] is the only error an extraction can end with. It signals that the
//!   line source could not be opened or read to completion.
//! - [`TokenizeError`] describes why a single line could not be split into a key and a
//!   value. The extractor skips such lines, so this error never leaves an extraction.
//!
//! # Example
//!
//! ```rust
//! use proc_metrics::procfs::{LineTokenizer, TokenizeError};
//!
//! let tokenizer = LineTokenizer::default();
//! let err = tokenizer.tokenize("no delimiter here").unwrap_err();
//! assert!(matches!(err, TokenizeError::NoDelimiterFound { .. }));
//! ```

/// Errors that abort a whole extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("source `{name}` is unavailable: {source}")]
    SourceUnavailable {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    pub(crate) fn unavailable(name: impl Into<String>, source: std::io::Error) -> Self {
        ExtractError::SourceUnavailable {
            name: name.into(),
            source,
        }
    }

    /// Returns the name of the source that failed.
    pub fn source_name(&self) -> &str {
        match self {
            ExtractError::SourceUnavailable { name, .. } => name,
        }
    }
}

/// Errors for a single line that cannot be tokenized.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    #[error("missing delimiter `{delimiter}` in line: `{line}`")]
    NoDelimiterFound { delimiter: char, line: String },

    #[error("empty key before delimiter `{delimiter}` in line: `{line}`")]
    EmptyKey { delimiter: char, line: String },
}
