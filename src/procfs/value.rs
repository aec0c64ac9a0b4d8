//! Normalized metric values.
//!
//! A [`MetricValue`] is the text the kernel emitted for a key, with whitespace normalized.
//! Extraction never interprets it. Consumers that want numbers can ask for a
//! [`Quantity`], which is `None` for anything that is not `<u64>` or `<u64> <unit>`.

use std::fmt;

/// Opaque text value of a single metric, e.g. `"3965536 kB"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MetricValue(String);

impl MetricValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Interprets the value as a number with an optional unit suffix.
    ///
    /// ```rust
    /// use proc_metrics::procfs::{MetricValue, Unit};
    ///
    /// let q = MetricValue::new("2048 kB").quantity().unwrap();
    /// assert_eq!(q.value, 2048);
    /// assert_eq!(q.unit, Some(Unit::Kilobytes));
    /// assert_eq!(q.bytes(), Some(2048 * 1024));
    ///
    /// assert!(MetricValue::new("n/a").quantity().is_none());
    /// ```
    pub fn quantity(&self) -> Option<Quantity> {
        let mut parts = self.0.split_whitespace();
        let value = parts.next()?.parse::<u64>().ok()?;
        let unit = parts.next().map(Unit::from);
        if parts.next().is_some() {
            return None;
        }
        Some(Quantity { value, unit })
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for MetricValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MetricValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Unit suffix of a [`Quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    /// `kB`. The kernel means 1024 bytes.
    Kilobytes,
    Other(String),
}

impl From<&str> for Unit {
    fn from(unit: &str) -> Self {
        match unit {
            "kB" => Unit::Kilobytes,
            other => Unit::Other(other.to_owned()),
        }
    }
}

/// Numeric interpretation of a [`MetricValue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    pub value: u64,
    pub unit: Option<Unit>,
}

impl Quantity {
    /// Returns the amount in bytes for unit-less and `kB` values.
    ///
    /// Returns `None` for unknown units or on overflow.
    pub fn bytes(&self) -> Option<u64> {
        match &self.unit {
            None => Some(self.value),
            Some(Unit::Kilobytes) => self.value.checked_mul(1024),
            Some(Unit::Other(_)) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_number() {
        let q = MetricValue::new("512").quantity().unwrap();
        assert_eq!(q, Quantity { value: 512, unit: None });
        assert_eq!(q.bytes(), Some(512));
    }

    #[test]
    fn unknown_unit() {
        let q = MetricValue::new("7 pages").quantity().unwrap();
        assert_eq!(q.unit, Some(Unit::Other("pages".to_owned())));
        assert_eq!(q.bytes(), None);
    }

    #[test]
    fn non_numeric_and_multi_token_values() {
        assert!(MetricValue::new("").quantity().is_none());
        assert!(MetricValue::new("abc kB").quantity().is_none());
        assert!(MetricValue::new("-1 kB").quantity().is_none());
        assert!(MetricValue::new("1 2 3").quantity().is_none());
    }

    #[test]
    fn kilobytes_overflow() {
        let q = MetricValue::new(format!("{} kB", u64::MAX)).quantity().unwrap();
        assert_eq!(q.bytes(), None);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&MetricValue::new("1 kB")).unwrap();
        assert_eq!(json, "\"1 kB\"");
    }
}
