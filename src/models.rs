//! Typed records produced by page extraction.
//!
//! - [`FieldValue`]: one decoded field (text, integer, optional text, or a nested value)
//! - [`Record`]: an ordered mapping of field name to [`FieldValue`]
//! - [`Extraction`]: the product of one extraction pass plus its elapsed time
//! - [`PageReport`]: an extraction bundled with fetch bookkeeping
//!
//! Records are partial by nature. A field whose node or label was not found is
//! simply not present, so callers look fields up with [`Record::get`] rather
//! than assuming a fixed shape.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::time::Duration;

/// A single decoded field.
///
/// Serializes untagged, so JSON output reads as plain strings, numbers, `null`,
/// objects and arrays.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text taken from a node or label.
    Text(String),
    /// A count, parsed after stripping thousands separators.
    Integer(i64),
    /// A tuple member that may be absent (e.g. location after `sex/location`).
    OptionalText(Option<String>),
    /// A nested record, used by the today-page aggregate.
    Record(Record),
    /// An ordered list of values, in document order.
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::OptionalText(s) => s.as_deref(),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<Record> for FieldValue {
    fn from(r: Record) -> Self {
        FieldValue::Record(r)
    }
}

impl From<Vec<Record>> for FieldValue {
    fn from(records: Vec<Record>) -> Self {
        FieldValue::List(records.into_iter().map(FieldValue::Record).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items.into_iter().map(FieldValue::Text).collect())
    }
}

/// An ordered mapping of field name to value.
///
/// Insertion order is preserved. Inserting an existing key replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Shorthand for `get(key).and_then(FieldValue::as_text)`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Shorthand for `get(key).and_then(FieldValue::as_integer)`.
    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FieldValue::as_integer)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Turn page label text into a symbol-like record key.
///
/// Lower-cases, trims and joins inner whitespace with `_`, so `"Happy"` becomes
/// `happy` and `"Deviants Online"` becomes `deviants_online`.
pub fn symbol(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// The product of one extraction pass.
///
/// `elapsed` covers extraction only; fetch time is reported separately in
/// [`PageReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub data: T,
    pub elapsed: Duration,
}

/// One fetched and extracted page.
///
/// `total_time_ms` is fetch time plus extraction time.
#[derive(Debug, serde::Serialize)]
pub struct PageReport<T> {
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub fetch_time_ms: u128,
    pub parse_time_ms: u128,
    pub total_time_ms: u128,
    pub data: T,
}

impl<T> PageReport<T> {
    pub fn new(url: String, fetched_at: DateTime<Utc>, fetch_time: Duration, extraction: Extraction<T>) -> Self {
        Self {
            url,
            fetched_at,
            fetch_time_ms: fetch_time.as_millis(),
            parse_time_ms: extraction.elapsed.as_millis(),
            total_time_ms: (fetch_time + extraction.elapsed).as_millis(),
            data: extraction.data,
        }
    }
}
