//! Common types used throughout the entity-adapter core
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
///
/// This is the dynamically-typed document model used for records: one of
/// null, bool, number, string, object, or array. Nothing in the core forces
/// records into a fixed schema.
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One flattened result item: a field-name to JSON value map.
///
/// Nested objects and arrays are retained as nested values, never flattened
/// further by the core.
pub type Record = JsonObject;

// ============================================================================
// Query Parameters
// ============================================================================

/// Ordered, case-insensitive string-to-string query parameter map.
///
/// Keys are unique under case-insensitive comparison; inserting an existing
/// key replaces the value in place (last write wins) while keeping the
/// original key casing and position. Iteration order is insertion order,
/// which keeps outgoing query strings reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any existing value under the same
    /// case-insensitive key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by case-insensitive key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|idx| self.entries[idx].1.as_str())
    }

    /// Check whether a key is present (case-insensitive)
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Remove a parameter, returning its value if it was present
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying pairs (for `reqwest::RequestBuilder::query`)
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.entries
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k.eq_ignore_ascii_case(key))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

// ============================================================================
// Filter Operator
// ============================================================================

/// Comparison operator carried by a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Exact equality (the default; renders as `field=value`)
    #[default]
    Equals,
    /// Greater-than (renders as `field[gt]=value`)
    GreaterThan,
    /// Greater-than-or-equal (renders as `field[gte]=value`)
    GreaterOrEqual,
    /// Less-than (renders as `field[lt]=value`)
    LessThan,
    /// Less-than-or-equal (renders as `field[lte]=value`)
    LessOrEqual,
}

impl FilterOperator {
    /// Query-string suffix for this operator, if any
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Equals => None,
            Self::GreaterThan => Some("gt"),
            Self::GreaterOrEqual => Some("gte"),
            Self::LessThan => Some("lt"),
            Self::LessOrEqual => Some("lte"),
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
