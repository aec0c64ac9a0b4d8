//! Key to field mapping tables.
//!
//! A [`KeyFieldMapping`] is the schema knowledge for one source type: which line keys
//! exist, which field of the snapshot each one fills, and how its value is normalized.
//! It is built once and only read afterwards, so one table can be shared freely between
//! threads.
//!
//! # Resolution
//!
//! Entries are kept sorted by key length, longest first. A lookup scans the table in
//! that order and returns the first entry that matches under the table's
//! [`MatchPolicy`]. For [`MatchPolicy::LongestPrefix`] this guarantees that a
//! specific key such as `Active(anon)` is tried before the shorter `Active` it starts
//! with, and that an exact match always wins.
//!
//! ```rust
//! use proc_metrics::procfs::{KeyFieldMapping, MatchPolicy, MetricValue};
//!
//! #[derive(Default)]
//! struct Stat {
//!     active: Option<MetricValue>,
//!     active_anon: Option<MetricValue>,
//! }
//!
//! let mapping = KeyFieldMapping::<Stat>::builder(MatchPolicy::LongestPrefix)
//!     .field("Active", |s, v| s.active = Some(v))
//!     .field("Active(anon)", |s, v| s.active_anon = Some(v))
//!     .build();
//!
//! assert_eq!(mapping.resolve("Active(anon)").unwrap().key(), "Active(anon)");
//! assert_eq!(mapping.resolve("Active").unwrap().key(), "Active");
//! assert!(mapping.resolve("Inactive").is_none());
//! ```

use std::cmp::Reverse;
use std::fmt;

use super::MetricValue;

/// Setter that stores a normalized value into a snapshot field.
pub type Setter<S> = fn(&mut S, MetricValue);

/// How a line key is compared against mapping keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// The line key must start with the mapping key; longer mapping keys are tried first.
    #[default]
    LongestPrefix,
    /// The line key must equal the mapping key.
    Exact,
}

impl MatchPolicy {
    fn matches(self, line_key: &str, mapping_key: &str) -> bool {
        match self {
            MatchPolicy::LongestPrefix => line_key.starts_with(mapping_key),
            MatchPolicy::Exact => line_key == mapping_key,
        }
    }
}

/// How a tokenized value is turned into the stored [`MetricValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueNormalization {
    /// Store the tokenized text as is, unit suffix included.
    #[default]
    KeepUnit,
    /// Drop a trailing alphabetic unit token, e.g. `"100 kB"` becomes `"100"`.
    StripUnit,
}

impl ValueNormalization {
    pub fn apply(self, value: String) -> MetricValue {
        match self {
            ValueNormalization::KeepUnit => MetricValue::new(value),
            ValueNormalization::StripUnit => match value.rsplit_once(' ') {
                Some((number, unit)) if unit.chars().all(|c| c.is_ascii_alphabetic()) => {
                    MetricValue::new(number)
                }
                _ => MetricValue::new(value),
            },
        }
    }
}

/// A single table entry.
pub struct FieldMapping<S> {
    key: &'static str,
    normalization: ValueNormalization,
    setter: Setter<S>,
}

impl<S> FieldMapping<S> {
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn normalization(&self) -> ValueNormalization {
        self.normalization
    }

    /// Normalizes `value` and stores it into `snapshot`.
    pub fn apply(&self, snapshot: &mut S, value: String) {
        (self.setter)(snapshot, self.normalization.apply(value));
    }
}

impl<S> Clone for FieldMapping<S> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            normalization: self.normalization,
            setter: self.setter,
        }
    }
}

impl<S> fmt::Debug for FieldMapping<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMapping")
            .field("key", &self.key)
            .field("normalization", &self.normalization)
            .finish_non_exhaustive()
    }
}

/// Ordered, read-only table of [`FieldMapping`]s for snapshot type `S`.
pub struct KeyFieldMapping<S> {
    policy: MatchPolicy,
    entries: Vec<FieldMapping<S>>,
}

impl<S> KeyFieldMapping<S> {
    pub fn builder(policy: MatchPolicy) -> KeyFieldMappingBuilder<S> {
        KeyFieldMappingBuilder {
            policy,
            entries: Vec::new(),
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Returns the entry responsible for `line_key`, if any.
    pub fn resolve(&self, line_key: &str) -> Option<&FieldMapping<S>> {
        self.entries
            .iter()
            .find(|entry| self.policy.matches(line_key, entry.key))
    }

    /// Mapping keys in resolution order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> Clone for KeyFieldMapping<S> {
    fn clone(&self) -> Self {
        Self {
            policy: self.policy,
            entries: self.entries.clone(),
        }
    }
}

impl<S> fmt::Debug for KeyFieldMapping<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFieldMapping")
            .field("policy", &self.policy)
            .field("entries", &self.entries)
            .finish()
    }
}

/// Collects entries and sorts them into resolution order.
pub struct KeyFieldMappingBuilder<S> {
    policy: MatchPolicy,
    entries: Vec<FieldMapping<S>>,
}

impl<S> KeyFieldMappingBuilder<S> {
    /// Adds an entry that keeps the unit suffix.
    pub fn field(self, key: &'static str, setter: Setter<S>) -> Self {
        self.field_with(key, ValueNormalization::KeepUnit, setter)
    }

    /// Adds an entry with an explicit [`ValueNormalization`].
    ///
    /// Registering the same key twice replaces the earlier entry.
    pub fn field_with(
        mut self,
        key: &'static str,
        normalization: ValueNormalization,
        setter: Setter<S>,
    ) -> Self {
        self.entries.retain(|entry| entry.key != key);
        self.entries.push(FieldMapping {
            key,
            normalization,
            setter,
        });
        self
    }

    pub fn build(mut self) -> KeyFieldMapping<S> {
        // Stable, so equal-length keys keep registration order.
        self.entries.sort_by_key(|entry| Reverse(entry.key.len()));
        KeyFieldMapping {
            policy: self.policy,
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Stat {
        active: Option<MetricValue>,
        active_anon: Option<MetricValue>,
        active_file: Option<MetricValue>,
    }

    fn mapping(policy: MatchPolicy) -> KeyFieldMapping<Stat> {
        // Shorter key registered first on purpose.
        KeyFieldMapping::<Stat>::builder(policy)
            .field("Active", |s, v| s.active = Some(v))
            .field("Active(anon)", |s, v| s.active_anon = Some(v))
            .field("Active(file)", |s, v| s.active_file = Some(v))
            .build()
    }

    #[test]
    fn longer_keys_precede_their_prefixes() {
        let mapping = mapping(MatchPolicy::LongestPrefix);
        let keys: Vec<_> = mapping.keys().collect();
        assert_eq!(keys, vec!["Active(anon)", "Active(file)", "Active"]);

        for (i, earlier) in keys.iter().copied().enumerate() {
            for later in keys[i + 1..].iter().copied() {
                assert!(
                    !later.starts_with(earlier),
                    "`{later}` would be shadowed by `{earlier}`"
                );
            }
        }
    }

    #[test]
    fn prefix_resolution_prefers_specific_key() {
        let mapping = mapping(MatchPolicy::LongestPrefix);
        assert_eq!(mapping.resolve("Active(anon)").unwrap().key(), "Active(anon)");
        assert_eq!(mapping.resolve("Active(file)").unwrap().key(), "Active(file)");
        assert_eq!(mapping.resolve("Active").unwrap().key(), "Active");
        // Unknown qualifier falls back to the generic key.
        assert_eq!(mapping.resolve("Active(other)").unwrap().key(), "Active");
        assert!(mapping.resolve("Act").is_none());
    }

    #[test]
    fn exact_resolution() {
        let mapping = mapping(MatchPolicy::Exact);
        assert_eq!(mapping.resolve("Active").unwrap().key(), "Active");
        assert!(mapping.resolve("Active(other)").is_none());
    }

    #[test]
    fn apply_runs_setter_with_normalized_value() {
        let mapping = KeyFieldMapping::<Stat>::builder(MatchPolicy::Exact)
            .field_with("Active", ValueNormalization::StripUnit, |s, v| {
                s.active = Some(v)
            })
            .build();
        let mut stat = Stat::default();
        mapping
            .resolve("Active")
            .unwrap()
            .apply(&mut stat, "100 kB".to_owned());
        assert_eq!(stat.active, Some(MetricValue::new("100")));
    }

    #[test]
    fn duplicate_registration_replaces_entry() {
        let mapping = KeyFieldMapping::<Stat>::builder(MatchPolicy::Exact)
            .field("Active", |s, v| s.active = Some(v))
            .field("Active", |s, v| s.active_anon = Some(v))
            .build();
        assert_eq!(mapping.len(), 1);
        let mut stat = Stat::default();
        mapping.resolve("Active").unwrap().apply(&mut stat, "1".to_owned());
        assert_eq!(stat.active, None);
        assert_eq!(stat.active_anon, Some(MetricValue::new("1")));
    }

    #[test]
    fn strip_unit() {
        let strip = ValueNormalization::StripUnit;
        assert_eq!(strip.apply("100 kB".to_owned()), MetricValue::new("100"));
        assert_eq!(strip.apply("100".to_owned()), MetricValue::new("100"));
        assert_eq!(strip.apply("1 2 3".to_owned()), MetricValue::new("1 2 3"));
        assert_eq!(strip.apply(String::new()), MetricValue::new(""));
    }
}
