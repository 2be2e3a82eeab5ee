//! Pagination strategy implementations
//!
//! Three incompatible vendor conventions behind one tagged variant:
//! offset/limit parameters, opaque forward cursors, and header-declared
//! totals. Strategies only shape query parameters and interpret responses;
//! the adapter owns the request loop.

use super::types::{header_u64, pages_for, string_at_path, PageRequest, PageResult, RawPage};
use crate::types::{JsonValue, OptionStringExt, QueryParams, Record};
use serde::{Deserialize, Serialize};

// ============================================================================
// Offset / Limit
// ============================================================================

/// How the page-number parameter is expressed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetMode {
    /// 1-based page number, e.g. `page=3&per_page=50`
    #[default]
    PageNumber,
    /// Zero-based record offset, e.g. `offset=100&limit=50`
    RecordOffset,
}

/// Offset/limit pagination (e.g. WooCommerce, SQL-style APIs)
///
/// Sets a page-number (or record-offset) parameter and a page-size parameter
/// computed from the request. `has_next_page` comes from a total-count
/// response header when one is declared, otherwise from the
/// "full page returned" heuristic.
#[derive(Debug, Clone)]
pub struct OffsetLimit {
    /// Query parameter carrying the page number or offset
    pub page_param: String,
    /// Query parameter carrying the page size
    pub size_param: String,
    /// Wire convention for the page parameter
    pub mode: OffsetMode,
    /// Vendor-declared maximum page size; requests clamp to it
    pub page_size_max: Option<u32>,
    /// Response header carrying the total record count, when the vendor
    /// exposes one
    pub total_header: Option<String>,
}

impl Default for OffsetLimit {
    fn default() -> Self {
        Self {
            page_param: "page".to_string(),
            size_param: "per_page".to_string(),
            mode: OffsetMode::PageNumber,
            page_size_max: None,
            total_header: None,
        }
    }
}

impl OffsetLimit {
    /// Offset/limit strategy with custom parameter names
    pub fn new(page_param: impl Into<String>, size_param: impl Into<String>) -> Self {
        Self {
            page_param: page_param.into(),
            size_param: size_param.into(),
            ..Default::default()
        }
    }

    /// Use zero-based record offsets instead of page numbers
    #[must_use]
    pub fn record_offset(mut self) -> Self {
        self.mode = OffsetMode::RecordOffset;
        self
    }

    /// Clamp requested page sizes to a vendor maximum
    #[must_use]
    pub fn with_max_page_size(mut self, max: u32) -> Self {
        self.page_size_max = Some(max);
        self
    }

    /// Read the total record count from a response header
    #[must_use]
    pub fn with_total_header(mut self, header: impl Into<String>) -> Self {
        self.total_header = Some(header.into());
        self
    }

    pub fn effective_size(&self, request: &PageRequest) -> u32 {
        match self.page_size_max {
            Some(max) => request.page_size.min(max),
            None => request.page_size,
        }
    }

    pub fn prepare(&self, request: &PageRequest, params: &mut QueryParams) {
        let size = self.effective_size(request);
        let page_value = match self.mode {
            OffsetMode::PageNumber => request.page_number,
            OffsetMode::RecordOffset => request.page_number.saturating_sub(1) * size,
        };
        params.insert(&self.page_param, page_value.to_string());
        params.insert(&self.size_param, size.to_string());
    }

    pub fn assemble(&self, page: RawPage<'_>, records: Vec<Record>, request: &PageRequest) -> PageResult {
        let size = self.effective_size(request);
        let total = self
            .total_header
            .as_deref()
            .and_then(|h| header_u64(page.headers, h));
        let total_pages = total.map(|t| pages_for(t, size));

        let has_next = match total_pages {
            Some(pages) => request.page_number < pages,
            // No declared total: a full page is the continuation signal
            None => size > 0 && records.len() as u32 == size,
        };

        PageResult {
            records,
            page_number: request.page_number,
            page_size: size,
            total_records: total,
            total_pages,
            has_next_page: has_next,
            next_continuation_token: None,
        }
    }
}

// ============================================================================
// Cursor / Token
// ============================================================================

/// Opaque-cursor pagination (e.g. Twitter, Stripe)
///
/// The upstream only exposes a forward cursor: the response body carries a
/// token that must be echoed back to fetch the next page. There is no random
/// access; jumping to logical page N costs N-1 sequential advance requests
/// (driven by the adapter). An absent or empty token marks the terminal page.
#[derive(Debug, Clone)]
pub struct CursorToken {
    /// Query parameter the token is echoed back in
    pub token_param: String,
    /// Dot-path to the next token in the response body, e.g. `meta.next_token`
    pub token_path: String,
    /// Optional page-size parameter, used only to bound result volume
    pub size_param: Option<String>,
    /// Vendor-declared maximum page size
    pub page_size_max: Option<u32>,
}

impl CursorToken {
    /// Cursor strategy reading the next token from `token_path`
    pub fn new(token_param: impl Into<String>, token_path: impl Into<String>) -> Self {
        Self {
            token_param: token_param.into(),
            token_path: token_path.into(),
            size_param: None,
            page_size_max: None,
        }
    }

    /// Bound result volume with a page-size parameter
    #[must_use]
    pub fn with_size_param(mut self, param: impl Into<String>) -> Self {
        self.size_param = Some(param.into());
        self
    }

    /// Clamp requested page sizes to a vendor maximum
    #[must_use]
    pub fn with_max_page_size(mut self, max: u32) -> Self {
        self.page_size_max = Some(max);
        self
    }

    pub fn effective_size(&self, request: &PageRequest) -> u32 {
        match self.page_size_max {
            Some(max) => request.page_size.min(max),
            None => request.page_size,
        }
    }

    /// Next-page token from a response body; `None` means terminal page
    pub fn next_token(&self, body: &JsonValue) -> Option<String> {
        string_at_path(body, &self.token_path).and_then(OptionStringExt::none_if_empty)
    }

    pub fn prepare(&self, request: &PageRequest, params: &mut QueryParams) {
        if let Some(token) = &request.continuation_token {
            params.insert(&self.token_param, token.clone());
        }
        if let Some(size_param) = &self.size_param {
            params.insert(size_param, self.effective_size(request).to_string());
        }
    }

    pub fn assemble(&self, page: RawPage<'_>, records: Vec<Record>, request: &PageRequest) -> PageResult {
        let token = self.next_token(page.body);
        PageResult {
            records,
            page_number: request.page_number,
            page_size: self.effective_size(request),
            total_records: None,
            total_pages: None,
            has_next_page: token.is_some(),
            next_continuation_token: token,
        }
    }
}

// ============================================================================
// Header-declared Total
// ============================================================================

/// Header-total pagination (e.g. WordPress `X-WP-Total`)
///
/// One request per page with page-number/page-size parameters; total record
/// and page counts come from response headers rather than the body. A
/// missing total header falls back to the returned record count, which is
/// inaccurate but non-fatal.
#[derive(Debug, Clone)]
pub struct HeaderTotal {
    /// Query parameter carrying the page number
    pub page_param: String,
    /// Query parameter carrying the page size
    pub size_param: String,
    /// Response header carrying the total record count
    pub total_header: String,
    /// Optional response header carrying the total page count
    pub pages_header: Option<String>,
    /// Vendor-declared maximum page size
    pub page_size_max: Option<u32>,
}

impl Default for HeaderTotal {
    fn default() -> Self {
        Self {
            page_param: "page".to_string(),
            size_param: "per_page".to_string(),
            total_header: "X-WP-Total".to_string(),
            pages_header: None,
            page_size_max: None,
        }
    }
}

impl HeaderTotal {
    /// Header-total strategy reading the total from `total_header`
    pub fn new(total_header: impl Into<String>) -> Self {
        Self {
            total_header: total_header.into(),
            ..Default::default()
        }
    }

    /// Set the page and size parameter names
    #[must_use]
    pub fn with_params(mut self, page_param: impl Into<String>, size_param: impl Into<String>) -> Self {
        self.page_param = page_param.into();
        self.size_param = size_param.into();
        self
    }

    /// Read the total page count from its own header
    #[must_use]
    pub fn with_pages_header(mut self, header: impl Into<String>) -> Self {
        self.pages_header = Some(header.into());
        self
    }

    /// Clamp requested page sizes to a vendor maximum
    #[must_use]
    pub fn with_max_page_size(mut self, max: u32) -> Self {
        self.page_size_max = Some(max);
        self
    }

    pub fn effective_size(&self, request: &PageRequest) -> u32 {
        match self.page_size_max {
            Some(max) => request.page_size.min(max),
            None => request.page_size,
        }
    }

    pub fn prepare(&self, request: &PageRequest, params: &mut QueryParams) {
        params.insert(&self.page_param, request.page_number.to_string());
        params.insert(&self.size_param, self.effective_size(request).to_string());
    }

    pub fn assemble(&self, page: RawPage<'_>, records: Vec<Record>, request: &PageRequest) -> PageResult {
        let size = self.effective_size(request);
        let total = header_u64(page.headers, &self.total_header)
            .unwrap_or(records.len() as u64);
        let total_pages = self
            .pages_header
            .as_deref()
            .and_then(|h| header_u64(page.headers, h))
            .map(|p| p as u32)
            .unwrap_or_else(|| pages_for(total, size));

        PageResult {
            records,
            page_number: request.page_number,
            page_size: size,
            total_records: Some(total),
            total_pages: Some(total_pages),
            has_next_page: request.page_number < total_pages,
            next_continuation_token: None,
        }
    }
}

// ============================================================================
// Tagged strategy
// ============================================================================

/// The pagination capability attached to an endpoint descriptor.
///
/// A tagged variant rather than a trait object: every entity picks one of
/// three wire conventions (or none), and the adapter needs to know which one
/// it is driving because cursor paging changes the request loop.
#[derive(Debug, Clone, Default)]
pub enum PageStrategy {
    /// Single unpaged request
    #[default]
    None,
    /// Offset/limit or page/per_page parameters
    OffsetLimit(OffsetLimit),
    /// Opaque forward cursor in the response body
    CursorToken(CursorToken),
    /// Page parameters with header-declared totals
    HeaderTotal(HeaderTotal),
}

impl PageStrategy {
    /// Add this strategy's query parameters for the requested page
    pub fn prepare(&self, request: &PageRequest, params: &mut QueryParams) {
        match self {
            Self::None => {}
            Self::OffsetLimit(s) => s.prepare(request, params),
            Self::CursorToken(s) => s.prepare(request, params),
            Self::HeaderTotal(s) => s.prepare(request, params),
        }
    }

    /// Interpret one raw page into a [`PageResult`]
    pub fn assemble(
        &self,
        page: RawPage<'_>,
        records: Vec<Record>,
        request: &PageRequest,
    ) -> PageResult {
        match self {
            Self::None => {
                let total = records.len() as u64;
                PageResult {
                    records,
                    page_number: request.page_number,
                    page_size: request.page_size,
                    total_records: Some(total),
                    total_pages: Some(1),
                    has_next_page: false,
                    next_continuation_token: None,
                }
            }
            Self::OffsetLimit(s) => s.assemble(page, records, request),
            Self::CursorToken(s) => s.assemble(page, records, request),
            Self::HeaderTotal(s) => s.assemble(page, records, request),
        }
    }

    /// Cursor strategy view, when this is one.
    ///
    /// The adapter uses this to drive the sequential jump-ahead loop.
    pub fn as_cursor(&self) -> Option<&CursorToken> {
        match self {
            Self::CursorToken(s) => Some(s),
            _ => None,
        }
    }
}
