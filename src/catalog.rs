//! Entity catalog: immutable registry of endpoint descriptors
//!
//! The catalog maps a logical entity name (e.g. "products") to the
//! [`EndpointDescriptor`] that says how to reach it: URL template, result
//! root, required filters, placeholder policy, and pagination strategy.
//!
//! The catalog is built once at startup and never mutated afterwards, so
//! lookups are safe for concurrent readers without locking.

use crate::endpoint::PlaceholderSpec;
use crate::error::{Error, Result};
use crate::pagination::PageStrategy;
use std::collections::HashMap;

/// How to reach one logical entity on the upstream API.
///
/// Created once at catalog construction and immutable thereafter.
#[derive(Debug, Clone)]
pub struct EndpointDescriptor {
    /// Logical entity name (unique key, matched case-insensitively)
    pub entity: String,
    /// URL template, may contain `{name}` placeholders
    pub url_template: String,
    /// Single JSON property name the result array/object is nested under.
    /// `None` means the whole payload is the result.
    pub result_root: Option<String>,
    /// Filter names that must be present and non-blank before any request
    pub required_filters: Vec<String>,
    /// Declared placeholders, in resolution order
    pub placeholders: Vec<PlaceholderSpec>,
    /// Pagination strategy for this entity
    pub pagination: PageStrategy,
}

impl EndpointDescriptor {
    /// Create a descriptor with no root, no required filters, no pagination
    pub fn new(entity: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            url_template: url_template.into(),
            result_root: None,
            required_filters: Vec::new(),
            placeholders: Vec::new(),
            pagination: PageStrategy::None,
        }
    }

    /// Set the result root property name
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.result_root = Some(root.into());
        self
    }

    /// Add a required filter name
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required_filters.push(name.into());
        self
    }

    /// Declare a placeholder (resolution happens in declaration order)
    #[must_use]
    pub fn with_placeholder(mut self, spec: PlaceholderSpec) -> Self {
        self.placeholders.push(spec);
        self
    }

    /// Set the pagination strategy
    #[must_use]
    pub fn with_pagination(mut self, strategy: PageStrategy) -> Self {
        self.pagination = strategy;
        self
    }
}

/// Immutable, case-insensitive registry of endpoint descriptors
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entries: HashMap<String, EndpointDescriptor>,
}

impl EntityCatalog {
    /// Build a catalog from descriptors.
    ///
    /// Registering two descriptors under the same normalized name is an
    /// error rather than a silent overwrite. Every `{name}` token in a
    /// descriptor's template must be covered by a declared placeholder or a
    /// required filter, so a misconfigured template fails at startup instead
    /// of on the first query.
    pub fn new(descriptors: impl IntoIterator<Item = EndpointDescriptor>) -> Result<Self> {
        let mut entries = HashMap::new();
        for descriptor in descriptors {
            validate_template(&descriptor)?;
            let key = normalize(&descriptor.entity);
            if entries.contains_key(&key) {
                return Err(Error::duplicate_entity(&descriptor.entity));
            }
            entries.insert(key, descriptor);
        }
        Ok(Self { entries })
    }

    /// Look up a descriptor by entity name (case-insensitive exact match)
    pub fn lookup(&self, entity: &str) -> Result<&EndpointDescriptor> {
        self.entries
            .get(&normalize(entity))
            .ok_or_else(|| Error::unknown_entity(entity))
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over registered descriptors (no particular order)
    pub fn descriptors(&self) -> impl Iterator<Item = &EndpointDescriptor> {
        self.entries.values()
    }
}

fn normalize(entity: &str) -> String {
    entity.trim().to_ascii_lowercase()
}

fn validate_template(descriptor: &EndpointDescriptor) -> Result<()> {
    for token in crate::endpoint::template_tokens(&descriptor.url_template) {
        let covered = descriptor.placeholders.iter().any(|p| p.name == token)
            || descriptor.required_filters.iter().any(|f| f == token);
        if !covered {
            return Err(Error::config(format!(
                "entity '{}': template placeholder '{{{token}}}' is neither declared nor a required filter",
                descriptor.entity
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        let catalog = EntityCatalog::new([EndpointDescriptor::new("Products", "/products")])
            .unwrap();

        assert!(catalog.lookup("products").is_ok());
        assert!(catalog.lookup("PRODUCTS").is_ok());
        assert_eq!(catalog.lookup("Products").unwrap().url_template, "/products");
    }

    #[test]
    fn test_lookup_unknown_entity() {
        let catalog = EntityCatalog::new([EndpointDescriptor::new("products", "/products")])
            .unwrap();

        let err = catalog.lookup("orders").unwrap_err();
        assert!(matches!(err, Error::UnknownEntity { entity } if entity == "orders"));
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let catalog = EntityCatalog::new([EndpointDescriptor::new("products", "/products")
            .with_root("data")
            .with_required("store_id")])
        .unwrap();

        let first = catalog.lookup("products").unwrap();
        let second = catalog.lookup("products").unwrap();
        assert_eq!(first.url_template, second.url_template);
        assert_eq!(first.result_root, second.result_root);
        assert_eq!(first.required_filters, second.required_filters);
    }

    #[test]
    fn test_duplicate_registration_is_an_error() {
        let result = EntityCatalog::new([
            EndpointDescriptor::new("products", "/v1/products"),
            EndpointDescriptor::new("PRODUCTS", "/v2/products"),
        ]);

        assert!(matches!(result, Err(Error::DuplicateEntity { .. })));
    }

    #[test]
    fn test_undeclared_template_token_fails_at_build() {
        let result = EntityCatalog::new([EndpointDescriptor::new("items", "stores/{store}/items")]);

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("{store}"));
    }

    #[test]
    fn test_template_token_covered_by_placeholder_or_required_filter() {
        use crate::endpoint::PlaceholderSpec;

        let catalog = EntityCatalog::new([
            EndpointDescriptor::new("files", "fs/{path}")
                .with_placeholder(PlaceholderSpec::new("path")),
            EndpointDescriptor::new("items", "stores/{store}/items").with_required("store"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = EntityCatalog::new([]).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
