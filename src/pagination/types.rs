//! Pagination types shared by all strategies

use crate::types::{JsonValue, Record};
use reqwest::header::HeaderMap;

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// One logical page requested by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page_number: u32,
    /// Requested page size (strategies may clamp to a vendor maximum)
    pub page_size: u32,
    /// Opaque continuation token, populated only for cursor pagination
    /// and round-tripped verbatim
    pub continuation_token: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            continuation_token: None,
        }
    }
}

impl PageRequest {
    /// Request a specific page
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.max(1),
            continuation_token: None,
        }
    }

    /// Attach a continuation token from a previous [`PageResult`]
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }
}

/// One page of uniform records plus paging metadata
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// Records in upstream order
    pub records: Vec<Record>,
    /// Page number this result answers
    pub page_number: u32,
    /// Effective page size used for the request
    pub page_size: u32,
    /// Total record count when the upstream declares one.
    /// `None` when unknowable, e.g. cursor paging.
    pub total_records: Option<u64>,
    /// Total page count when derivable from the total
    pub total_pages: Option<u32>,
    /// Whether more pages exist after this one
    pub has_next_page: bool,
    /// Token for the next page, cursor pagination only
    pub next_continuation_token: Option<String>,
}

impl PageResult {
    /// Empty result for a page request.
    ///
    /// This is what the adapter returns on a transport failure; callers
    /// cannot distinguish it from a truly empty entity, which is the
    /// documented policy.
    pub fn empty(request: &PageRequest) -> Self {
        Self {
            records: Vec::new(),
            page_number: request.page_number,
            page_size: request.page_size,
            total_records: None,
            total_pages: None,
            has_next_page: false,
            next_continuation_token: None,
        }
    }

    /// Number of records in this page
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the page carries no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Borrowed view of one raw HTTP page handed to a strategy
#[derive(Debug, Clone, Copy)]
pub struct RawPage<'a> {
    /// Response headers
    pub headers: &'a HeaderMap,
    /// Parsed response body
    pub body: &'a JsonValue,
}

/// Read a numeric response header, e.g. `X-WP-Total: 250`
pub(crate) fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Total page count for a known total record count
pub(crate) fn pages_for(total_records: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_records.div_ceil(u64::from(page_size)) as u32
}

/// Navigate a dot-path (e.g. `meta.next_token`) to a string value.
///
/// Numbers stringify; anything else yields `None`.
pub(crate) fn string_at_path(value: &JsonValue, path: &str) -> Option<String> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = value;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    match current {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
