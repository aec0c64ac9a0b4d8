//! Splits procfs lines into a key and a value.
//!
//! The tokenizer is format-agnostic: it knows nothing about units or numbers and only
//! returns text. A line is split on the *first* occurrence of the delimiter, both halves
//! are trimmed, and runs of whitespace inside the value are collapsed to a single space.
//!
//! ```rust
//! use proc_metrics::procfs::LineTokenizer;
//!
//! let token = LineTokenizer::default().tokenize("MemTotal:      3965536 kB").unwrap();
//! assert_eq!(token.key, "MemTotal");
//! assert_eq!(token.value, "3965536 kB");
//! ```

use super::TokenizeError;

/// The default delimiter, as used by `/proc/meminfo`.
pub const DEFAULT_DELIMITER: char = ':';

/// A line split into its key and normalized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Leading key, trimmed.
    pub key: &'a str,
    /// Value with surrounding whitespace removed and internal whitespace collapsed.
    pub value: String,
}

/// Splits lines on a configurable delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTokenizer {
    delimiter: char,
}

impl Default for LineTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl LineTokenizer {
    pub const fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Splits `line` into a [`Token`].
    ///
    /// Leading whitespace of the line is ignored before looking for the delimiter, so a
    /// whitespace delimiter still yields a non-empty key for indented lines.
    ///
    /// # Errors
    ///
    /// - [`TokenizeError::NoDelimiterFound`] if the delimiter does not occur in the line.
    /// - [`TokenizeError::EmptyKey`] if nothing but whitespace precedes the delimiter.
    pub fn tokenize<'a>(&self, line: &'a str) -> Result<Token<'a>, TokenizeError> {
        let (key, value) = line.trim_start().split_once(self.delimiter).ok_or_else(|| {
            TokenizeError::NoDelimiterFound {
                delimiter: self.delimiter,
                line: line.trim_end().to_owned(),
            }
        })?;

        let key = key.trim();
        if key.is_empty() {
            return Err(TokenizeError::EmptyKey {
                delimiter: self.delimiter,
                line: line.trim_end().to_owned(),
            });
        }

        Ok(Token {
            key,
            value: collapse_whitespace(value),
        })
    }
}

fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for part in value.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}
