//! # entity-adapter
//!
//! A generic REST entity-adapter core. Maps "get records of entity E
//! matching filters F, optionally paged" onto a concrete HTTP call against a
//! third-party API and normalizes the heterogeneous response shape back into
//! a uniform record sequence.
//!
//! Everything vendor-specific is configuration data: URL templates, result
//! roots, required filters, pagination knobs. One adapter serves every
//! entity in the catalog; there is no per-vendor subclassing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use entity_adapter::{
//!     CatalogConfig, EntityAdapter, EntityCatalog, FilterClause, GatewayConfig,
//!     PageRequest, ReqwestGateway, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = CatalogConfig::from_yaml_file("catalog.yaml")?;
//!     let catalog = EntityCatalog::from_config(&config)?;
//!     let gateway = ReqwestGateway::with_config(
//!         GatewayConfig::builder()
//!             .base_url("https://shop.example.com")
//!             .build(),
//!     );
//!
//!     let adapter = EntityAdapter::new(catalog, gateway);
//!     let page = adapter
//!         .query(
//!             "products",
//!             &[FilterClause::equals("category", "books")],
//!             Some(PageRequest::new(1, 50)),
//!         )
//!         .await?;
//!
//!     for record in &page.records {
//!         println!("{record:?}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Query(entity, filters, page)
//!     │
//!     ├── EntityCatalog ──── entity name → EndpointDescriptor
//!     ├── filter ─────────── FilterClause[] → QueryParams, required-name check
//!     ├── endpoint ───────── {name} template substitution, percent-encoded
//!     ├── pagination ─────── OffsetLimit | CursorToken | HeaderTotal | None
//!     ├── http ───────────── HttpGateway: GET → (status, headers, bytes)
//!     └── extract ────────── payload → Vec<Record>
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the adapter core
pub mod error;

/// Common types and type aliases
pub mod types;

/// Entity catalog and endpoint descriptors
pub mod catalog;

/// Filter translation and validation
pub mod filter;

/// URL template resolution
pub mod endpoint;

/// Pagination strategies
pub mod pagination;

/// Response extraction
pub mod extract;

/// HTTP gateway (the transport seam)
pub mod http;

/// The query facade
pub mod adapter;

/// Catalog configuration and YAML loading
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use adapter::EntityAdapter;
pub use catalog::{EndpointDescriptor, EntityCatalog};
pub use config::{CatalogConfig, EntityConfig, PaginationConfig};
pub use endpoint::PlaceholderSpec;
pub use error::{Error, Result};
pub use extract::Extractor;
pub use filter::FilterClause;
pub use http::{GatewayConfig, HttpGateway, HttpResponse, ReqwestGateway};
pub use pagination::{
    CursorToken, HeaderTotal, OffsetLimit, OffsetMode, PageRequest, PageResult, PageStrategy,
};
pub use types::{FilterOperator, JsonValue, QueryParams, Record};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
