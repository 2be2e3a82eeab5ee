//! Catalog configuration
//!
//! Everything vendor-specific about an entity is data: URL template, result
//! root, required filters, placeholder policy, pagination knobs. The catalog
//! is rebuilt from this configuration on every process start; nothing is
//! persisted by the core.
//!
//! ```yaml
//! entities:
//!   - name: products
//!     url_template: /wp-json/wc/v3/products
//!     pagination:
//!       kind: header_total
//!       total_header: X-WP-Total
//!       page_size_max: 100
//!   - name: tweets
//!     url_template: /2/tweets/search/recent
//!     required_filters: [query]
//!     result_root: data
//!     pagination:
//!       kind: cursor_token
//!       token_param: next_token
//!       token_path: meta.next_token
//! ```

use crate::catalog::{EndpointDescriptor, EntityCatalog};
use crate::endpoint::PlaceholderSpec;
use crate::error::{Result, ResultExt};
use crate::pagination::{CursorToken, HeaderTotal, OffsetLimit, OffsetMode, PageStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Entity definitions, one per logical resource
    pub entities: Vec<EntityConfig>,
}

impl CatalogConfig {
    /// Parse a YAML configuration string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML configuration file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog config {}", path.display()))?;
        Self::from_yaml_str(&content)
    }
}

/// One entity definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Logical entity name
    pub name: String,
    /// URL template, may contain `{name}` placeholders
    pub url_template: String,
    /// Property name the result array/object is nested under
    #[serde(default)]
    pub result_root: Option<String>,
    /// Filter names required before any request is issued
    #[serde(default)]
    pub required_filters: Vec<String>,
    /// Placeholder resolution policy, in resolution order
    #[serde(default)]
    pub placeholders: Vec<PlaceholderSpec>,
    /// Pagination convention for this entity
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Pagination configuration, tagged by convention
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaginationConfig {
    /// Single unpaged request
    #[default]
    None,

    /// Offset/limit or page/per_page parameters
    OffsetLimit {
        #[serde(default = "default_page_param")]
        page_param: String,
        #[serde(default = "default_size_param")]
        size_param: String,
        #[serde(default)]
        mode: OffsetMode,
        #[serde(default)]
        page_size_max: Option<u32>,
        #[serde(default)]
        total_header: Option<String>,
    },

    /// Opaque forward cursor in the response body
    CursorToken {
        token_param: String,
        token_path: String,
        #[serde(default)]
        size_param: Option<String>,
        #[serde(default)]
        page_size_max: Option<u32>,
    },

    /// Page parameters with header-declared totals
    HeaderTotal {
        #[serde(default = "default_page_param")]
        page_param: String,
        #[serde(default = "default_size_param")]
        size_param: String,
        #[serde(default = "default_total_header")]
        total_header: String,
        #[serde(default)]
        pages_header: Option<String>,
        #[serde(default)]
        page_size_max: Option<u32>,
    },
}

fn default_page_param() -> String {
    "page".to_string()
}

fn default_size_param() -> String {
    "per_page".to_string()
}

fn default_total_header() -> String {
    "X-WP-Total".to_string()
}

impl PaginationConfig {
    /// Build the runtime strategy for this configuration
    pub fn build(&self) -> PageStrategy {
        match self {
            Self::None => PageStrategy::None,
            Self::OffsetLimit {
                page_param,
                size_param,
                mode,
                page_size_max,
                total_header,
            } => PageStrategy::OffsetLimit(OffsetLimit {
                page_param: page_param.clone(),
                size_param: size_param.clone(),
                mode: *mode,
                page_size_max: *page_size_max,
                total_header: total_header.clone(),
            }),
            Self::CursorToken {
                token_param,
                token_path,
                size_param,
                page_size_max,
            } => PageStrategy::CursorToken(CursorToken {
                token_param: token_param.clone(),
                token_path: token_path.clone(),
                size_param: size_param.clone(),
                page_size_max: *page_size_max,
            }),
            Self::HeaderTotal {
                page_param,
                size_param,
                total_header,
                pages_header,
                page_size_max,
            } => PageStrategy::HeaderTotal(HeaderTotal {
                page_param: page_param.clone(),
                size_param: size_param.clone(),
                total_header: total_header.clone(),
                pages_header: pages_header.clone(),
                page_size_max: *page_size_max,
            }),
        }
    }
}

impl EntityConfig {
    /// Build the runtime descriptor for this entity
    pub fn build(&self) -> EndpointDescriptor {
        let mut descriptor = EndpointDescriptor::new(&self.name, &self.url_template)
            .with_pagination(self.pagination.build());
        descriptor.result_root = self.result_root.clone();
        descriptor.required_filters = self.required_filters.clone();
        descriptor.placeholders = self.placeholders.clone();
        descriptor
    }
}

impl EntityCatalog {
    /// Build a catalog from configuration.
    ///
    /// Duplicate entity names fail here, at startup, rather than shadowing
    /// each other at query time.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        Self::new(config.entities.iter().map(EntityConfig::build))
    }
}
