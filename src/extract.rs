//! Response extraction: raw JSON payload to a uniform record sequence
//!
//! Vendors disagree on response envelopes: some return a bare array, some
//! nest the results under a root property, some return a single object for
//! by-ID lookups, and many omit the root key entirely when there is no data.
//! The extractor normalizes all of these into `Vec<Record>`.
//!
//! Malformed JSON is the only fatal case. A well-formed payload never
//! errors: a missing root yields an empty sequence.

use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};
use tracing::debug;

/// Extracts uniform records from a raw JSON payload
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    /// Single JSON property name the results are nested under.
    /// `None` treats the whole payload as the result node.
    root: Option<String>,
}

impl Extractor {
    /// Extractor that treats the whole payload as the result node
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor that navigates one level to the named property
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Extractor for an optional root, as stored on a descriptor
    pub fn from_root(root: Option<&str>) -> Self {
        Self {
            root: root.map(ToString::to_string),
        }
    }

    /// Parse a byte payload and extract records.
    ///
    /// Malformed JSON is a fatal [`Error::PayloadParse`], never swallowed.
    pub fn extract_bytes(&self, body: &[u8]) -> Result<Vec<Record>> {
        let value = parse_payload(body)?;
        Ok(self.extract_value(&value))
    }

    /// Extract records from an already-parsed payload. Never fails.
    pub fn extract_value(&self, value: &JsonValue) -> Vec<Record> {
        let node = match &self.root {
            Some(root) => match value.get(root) {
                Some(node) => node,
                None => {
                    // Many vendor "no data" responses omit the root key.
                    debug!(root = root.as_str(), "result root absent, empty page");
                    return Vec::new();
                }
            },
            None => value,
        };

        match node {
            JsonValue::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    JsonValue::Object(map) => Some(map.clone()),
                    _ => None,
                })
                .collect(),
            JsonValue::Object(map) => vec![map.clone()],
            _ => Vec::new(),
        }
    }
}

/// Parse a byte payload as JSON
pub fn parse_payload(body: &[u8]) -> Result<JsonValue> {
    serde_json::from_slice(body).map_err(|e| Error::payload_parse(e.to_string()))
}
