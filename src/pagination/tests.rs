//! Tests for pagination strategies

use super::*;
use crate::types::{QueryParams, Record};
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;

fn records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let mut map = Record::new();
            map.insert("id".to_string(), json!(i));
            map
        })
        .collect()
}

fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_str(value).unwrap());
    }
    map
}

// ============================================================================
// PageRequest
// ============================================================================

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page_number, 1);
    assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
    assert!(request.continuation_token.is_none());
}

#[test]
fn test_page_request_floors_invalid_values() {
    let request = PageRequest::new(0, 0);
    assert_eq!(request.page_number, 1);
    assert_eq!(request.page_size, 1);
}

#[test]
fn test_page_result_empty() {
    let result = PageResult::empty(&PageRequest::new(3, 25));
    assert!(result.is_empty());
    assert_eq!(result.page_number, 3);
    assert_eq!(result.page_size, 25);
    assert!(!result.has_next_page);
    assert!(result.total_records.is_none());
}

// ============================================================================
// OffsetLimit
// ============================================================================

#[test]
fn test_offset_limit_prepare_page_mode() {
    let strategy = OffsetLimit::new("page", "per_page");
    let mut params = QueryParams::new();

    strategy.prepare(&PageRequest::new(3, 50), &mut params);

    assert_eq!(params.get("page"), Some("3"));
    assert_eq!(params.get("per_page"), Some("50"));
}

#[test]
fn test_offset_limit_prepare_record_offset_mode() {
    let strategy = OffsetLimit::new("offset", "limit").record_offset();
    let mut params = QueryParams::new();

    strategy.prepare(&PageRequest::new(3, 50), &mut params);

    assert_eq!(params.get("offset"), Some("100"));
    assert_eq!(params.get("limit"), Some("50"));
}

#[test]
fn test_offset_limit_prepare_tolerates_zero_page_number() {
    // Struct-literal construction can bypass the new() floor
    let strategy = OffsetLimit::new("offset", "limit").record_offset();
    let mut params = QueryParams::new();
    let request = PageRequest {
        page_number: 0,
        page_size: 50,
        continuation_token: None,
    };

    strategy.prepare(&request, &mut params);

    assert_eq!(params.get("offset"), Some("0"));
}

#[test]
fn test_offset_limit_clamps_page_size_to_vendor_max() {
    let strategy = OffsetLimit::new("page", "per_page").with_max_page_size(100);
    let mut params = QueryParams::new();

    strategy.prepare(&PageRequest::new(1, 500), &mut params);

    assert_eq!(params.get("per_page"), Some("100"));
}

#[test]
fn test_offset_limit_full_page_heuristic() {
    let strategy = PageStrategy::OffsetLimit(OffsetLimit::new("page", "per_page"));
    let body = json!([]);
    let empty = HeaderMap::new();
    let page = RawPage {
        headers: &empty,
        body: &body,
    };
    let request = PageRequest::new(1, 50);

    // Full page means more may exist
    let result = strategy.assemble(page, records(50), &request);
    assert!(result.has_next_page);
    assert!(result.total_records.is_none());

    // Short page is terminal
    let result = strategy.assemble(page, records(20), &request);
    assert!(!result.has_next_page);
}

#[test]
fn test_offset_limit_total_header_drives_has_next() {
    let strategy =
        PageStrategy::OffsetLimit(OffsetLimit::new("page", "per_page").with_total_header("X-Total"));
    let body = json!([]);
    let hdrs = headers(&[("X-Total", "120")]);
    let page = RawPage {
        headers: &hdrs,
        body: &body,
    };

    let result = strategy.assemble(page, records(50), &PageRequest::new(2, 50));
    assert_eq!(result.total_records, Some(120));
    assert_eq!(result.total_pages, Some(3));
    assert!(result.has_next_page);

    let result = strategy.assemble(page, records(20), &PageRequest::new(3, 50));
    assert!(!result.has_next_page);
}

// ============================================================================
// CursorToken
// ============================================================================

#[test]
fn test_cursor_prepare_without_token() {
    let strategy = CursorToken::new("next_token", "meta.next_token");
    let mut params = QueryParams::new();

    strategy.prepare(&PageRequest::default(), &mut params);
    assert!(params.is_empty());
}

#[test]
fn test_cursor_prepare_round_trips_token_verbatim() {
    let strategy = CursorToken::new("next_token", "meta.next_token")
        .with_size_param("max_results")
        .with_max_page_size(250);
    let mut params = QueryParams::new();
    let request = PageRequest::new(2, 500).with_token("tok==/abc");

    strategy.prepare(&request, &mut params);

    assert_eq!(params.get("next_token"), Some("tok==/abc"));
    assert_eq!(params.get("max_results"), Some("250"));
}

#[test]
fn test_cursor_next_token_from_dot_path() {
    let strategy = CursorToken::new("cursor", "meta.next_token");

    let body = json!({"data": [], "meta": {"next_token": "t2"}});
    assert_eq!(strategy.next_token(&body), Some("t2".to_string()));

    // Absent and empty both mean terminal
    let body = json!({"data": [], "meta": {}});
    assert_eq!(strategy.next_token(&body), None);

    let body = json!({"data": [], "meta": {"next_token": ""}});
    assert_eq!(strategy.next_token(&body), None);
}

#[test]
fn test_cursor_assemble_continue_and_terminal() {
    let strategy = PageStrategy::CursorToken(CursorToken::new("cursor", "meta.next_token"));
    let empty = HeaderMap::new();
    let request = PageRequest::default();

    let body = json!({"meta": {"next_token": "t2"}});
    let result = strategy.assemble(
        RawPage {
            headers: &empty,
            body: &body,
        },
        records(10),
        &request,
    );
    assert!(result.has_next_page);
    assert_eq!(result.next_continuation_token, Some("t2".to_string()));
    // Cursor paging cannot know the total
    assert!(result.total_records.is_none());
    assert!(result.total_pages.is_none());

    let body = json!({"meta": {}});
    let result = strategy.assemble(
        RawPage {
            headers: &empty,
            body: &body,
        },
        records(3),
        &request,
    );
    assert!(!result.has_next_page);
    assert!(result.next_continuation_token.is_none());
}

// ============================================================================
// HeaderTotal
// ============================================================================

#[test]
fn test_header_total_prepare() {
    let strategy = HeaderTotal::new("X-WP-Total").with_max_page_size(100);
    let mut params = QueryParams::new();

    strategy.prepare(&PageRequest::new(2, 500), &mut params);

    assert_eq!(params.get("page"), Some("2"));
    assert_eq!(params.get("per_page"), Some("100"));
}

#[test]
fn test_header_total_reads_totals_from_headers() {
    let strategy = PageStrategy::HeaderTotal(HeaderTotal::new("X-WP-Total"));
    let body = json!([]);
    let hdrs = headers(&[("X-WP-Total", "250")]);

    let result = strategy.assemble(
        RawPage {
            headers: &hdrs,
            body: &body,
        },
        records(50),
        &PageRequest::new(1, 50),
    );

    assert_eq!(result.total_records, Some(250));
    assert_eq!(result.total_pages, Some(5));
    assert!(result.has_next_page);
}

#[test]
fn test_header_total_pages_header_wins() {
    let strategy = PageStrategy::HeaderTotal(
        HeaderTotal::new("X-WP-Total").with_pages_header("X-WP-TotalPages"),
    );
    let body = json!([]);
    let hdrs = headers(&[("X-WP-Total", "250"), ("X-WP-TotalPages", "7")]);

    let result = strategy.assemble(
        RawPage {
            headers: &hdrs,
            body: &body,
        },
        records(50),
        &PageRequest::new(7, 50),
    );

    assert_eq!(result.total_pages, Some(7));
    assert!(!result.has_next_page);
}

#[test]
fn test_header_total_missing_header_falls_back_to_record_count() {
    let strategy = PageStrategy::HeaderTotal(HeaderTotal::new("X-WP-Total"));
    let body = json!([]);
    let empty = HeaderMap::new();

    let result = strategy.assemble(
        RawPage {
            headers: &empty,
            body: &body,
        },
        records(30),
        &PageRequest::new(1, 50),
    );

    // Inaccurate but non-fatal
    assert_eq!(result.total_records, Some(30));
    assert_eq!(result.total_pages, Some(1));
    assert!(!result.has_next_page);
}

// ============================================================================
// None strategy
// ============================================================================

#[test]
fn test_no_pagination_single_page() {
    let strategy = PageStrategy::None;
    let body = json!([]);
    let empty = HeaderMap::new();

    let mut params = QueryParams::new();
    strategy.prepare(&PageRequest::default(), &mut params);
    assert!(params.is_empty());

    let result = strategy.assemble(
        RawPage {
            headers: &empty,
            body: &body,
        },
        records(7),
        &PageRequest::default(),
    );
    assert_eq!(result.len(), 7);
    assert_eq!(result.total_records, Some(7));
    assert_eq!(result.total_pages, Some(1));
    assert!(!result.has_next_page);
}

#[test]
fn test_as_cursor() {
    assert!(PageStrategy::None.as_cursor().is_none());
    let strategy = PageStrategy::CursorToken(CursorToken::new("cursor", "next"));
    assert!(strategy.as_cursor().is_some());
}
