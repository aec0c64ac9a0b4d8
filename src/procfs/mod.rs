//! Extraction of typed snapshots from line-oriented procfs files.
//!
//! One tokenizer and one resolution algorithm serve every source; a source type only
//! contributes a snapshot struct and a key to field table.
//!
//! # Main types
//!
//! - [`LineTokenizer`]: splits a line into key and normalized value.
//! - [`KeyFieldMapping`]: ordered key to field table with a [`MatchPolicy`].
//! - [`Extractor`]: walks a [`LineSource`] and fills a [`MetricsSchema`] snapshot.
//! - [`MemInfo`], [`VmStat`], [`KernelStat`]: schemas for `/proc/meminfo`,
//!   `/proc/vmstat` and `/proc/stat`.
//!
//! Values are stored as [`MetricValue`] text; see [`MetricValue::quantity`] for a numeric
//! view.

mod error;
mod extractor;
mod mapping;
mod meminfo;
mod source;
mod stat;
mod tokenizer;
mod value;
mod vmstat;

pub use error::{ExtractError, TokenizeError};
pub use extractor::{Extractor, MetricsSchema};
pub use mapping::{
    FieldMapping, KeyFieldMapping, KeyFieldMappingBuilder, MatchPolicy, Setter,
    ValueNormalization,
};
pub use meminfo::MemInfo;
pub use source::{FileSource, LineSource, ReaderSource};
pub use stat::KernelStat;
pub use tokenizer::{DEFAULT_DELIMITER, LineTokenizer, Token};
pub use value::{MetricValue, Quantity, Unit};
pub use vmstat::VmStat;
