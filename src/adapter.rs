//! The entity adapter: one generic query path for every REST entity
//!
//! Orchestration order is fixed: catalog lookup, filter translation and
//! validation, endpoint resolution, pagination-aware HTTP call(s),
//! extraction, result assembly. Validation failures never reach the network.
//!
//! Transport policy: a non-success status or a connection failure yields an
//! *empty* [`PageResult`], not an error. This mirrors the behavior callers
//! already depend on, but it means "no results" can also mean "the upstream
//! was down" — wrap [`EntityAdapter::query`] yourself if you need to tell
//! the two apart. Cancellation and malformed payloads always surface as
//! errors.

use crate::catalog::{EndpointDescriptor, EntityCatalog};
use crate::error::{Error, Result};
use crate::extract::{parse_payload, Extractor};
use crate::filter::{self, FilterClause};
use crate::http::{HttpGateway, HttpResponse, ReqwestGateway};
use crate::pagination::{PageRequest, PageResult, RawPage};
use crate::types::QueryParams;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Generic REST entity adapter over an immutable catalog and an HTTP gateway
#[derive(Debug)]
pub struct EntityAdapter<G = ReqwestGateway> {
    catalog: EntityCatalog,
    gateway: G,
}

impl<G: HttpGateway> EntityAdapter<G> {
    /// Create an adapter from a built catalog and a gateway
    pub fn new(catalog: EntityCatalog, gateway: G) -> Self {
        Self { catalog, gateway }
    }

    /// The catalog this adapter serves
    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Query records of an entity matching the given filters.
    ///
    /// `page` defaults to the first page with [`crate::pagination::DEFAULT_PAGE_SIZE`].
    pub async fn query(
        &self,
        entity: &str,
        filters: &[FilterClause],
        page: Option<PageRequest>,
    ) -> Result<PageResult> {
        self.query_cancellable(entity, filters, page, &CancellationToken::new())
            .await
    }

    /// [`Self::query`] with an external cancellation signal.
    ///
    /// On cancellation the whole call fails with [`Error::Cancelled`];
    /// partial pages are never returned.
    pub async fn query_cancellable(
        &self,
        entity: &str,
        filters: &[FilterClause],
        page: Option<PageRequest>,
        cancel: &CancellationToken,
    ) -> Result<PageResult> {
        let descriptor = self.catalog.lookup(entity)?;
        let mut params = filter::translate(filters);
        filter::validate(&descriptor.entity, &params, &descriptor.required_filters)?;
        let url = crate::endpoint::resolve(descriptor, &mut params)?;

        let mut request = page.unwrap_or_default();
        debug!(
            entity = descriptor.entity.as_str(),
            url = url.as_str(),
            page = request.page_number,
            "querying entity"
        );

        if let Some(token) = self
            .advance_cursor(descriptor, &url, &params, &request, cancel)
            .await?
        {
            match token {
                CursorPosition::At(token) => request.continuation_token = token,
                CursorPosition::Exhausted => return Ok(PageResult::empty(&request)),
                CursorPosition::TransportFailed => return Ok(PageResult::empty(&request)),
            }
        }

        let mut page_params = params.clone();
        descriptor.pagination.prepare(&request, &mut page_params);

        let response = match self.issue(&url, &page_params, cancel).await? {
            Some(response) => response,
            None => return Ok(PageResult::empty(&request)),
        };

        let body = parse_payload(&response.body)?;
        let records = Extractor::from_root(descriptor.result_root.as_deref()).extract_value(&body);

        Ok(descriptor.pagination.assemble(
            RawPage {
                headers: &response.headers,
                body: &body,
            },
            records,
            &request,
        ))
    }

    /// Walk the forward cursor up to the requested page.
    ///
    /// Cursor APIs have no random access: page N costs N-1 sequential
    /// advance requests whose bodies are discarded except for the
    /// next-token field. Returns `None` when no walking is needed.
    async fn advance_cursor(
        &self,
        descriptor: &EndpointDescriptor,
        url: &str,
        params: &QueryParams,
        request: &PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<CursorPosition>> {
        let Some(cursor) = descriptor.pagination.as_cursor() else {
            return Ok(None);
        };
        if request.page_number <= 1 || request.continuation_token.is_some() {
            return Ok(None);
        }

        let mut token: Option<String> = None;
        for advance in 1..request.page_number {
            let advance_request = PageRequest {
                page_number: advance,
                page_size: request.page_size,
                continuation_token: token.clone(),
            };
            let mut advance_params = params.clone();
            descriptor.pagination.prepare(&advance_request, &mut advance_params);

            let response = match self.issue(url, &advance_params, cancel).await? {
                Some(response) => response,
                None => return Ok(Some(CursorPosition::TransportFailed)),
            };

            let body = parse_payload(&response.body)?;
            token = cursor.next_token(&body);
            if token.is_none() {
                debug!(
                    entity = descriptor.entity.as_str(),
                    reached = advance,
                    requested = request.page_number,
                    "cursor exhausted before requested page"
                );
                return Ok(Some(CursorPosition::Exhausted));
            }
        }

        Ok(Some(CursorPosition::At(token)))
    }

    /// Issue one GET and apply the transport-failure policy.
    ///
    /// `Ok(None)` means "empty page, by policy". Cancellation and payload
    /// errors propagate through `Err`.
    async fn issue(
        &self,
        url: &str,
        params: &QueryParams,
        cancel: &CancellationToken,
    ) -> Result<Option<HttpResponse>> {
        match self.gateway.get(url, params, cancel).await {
            Ok(response) if response.is_success() => Ok(Some(response)),
            Ok(response) => {
                warn!(
                    url,
                    status = response.status,
                    "non-success status, returning empty page"
                );
                Ok(None)
            }
            Err(Error::Cancelled) => Err(Error::Cancelled),
            Err(Error::Http(e)) => {
                warn!(url, error = %e, "transport failure, returning empty page");
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }
}

/// Where the cursor walk ended up
enum CursorPosition {
    /// Reached the page before the requested one; carry this token forward
    At(Option<String>),
    /// The upstream ran out of pages before the requested page
    Exhausted,
    /// A request in the walk failed; empty page by policy
    TransportFailed,
}
