//! Endpoint resolution: `{name}` placeholder substitution in URL templates
//!
//! Placeholders are resolved in the order the descriptor declares them (not
//! discovery order in the string), so resolution is reproducible. Each
//! substituted value is percent-encoded with standard URL component escaping
//! before insertion.

use crate::catalog::EndpointDescriptor;
use crate::error::{Error, Result};
use crate::types::QueryParams;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Regex for matching template placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// URL component escaping: everything but unreserved characters is encoded
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Per-placeholder resolution policy declared by a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderSpec {
    /// Placeholder name as it appears in the template
    pub name: String,
    /// Value substituted when the query parameters carry none.
    /// A placeholder without a default fails resolution when absent.
    #[serde(default)]
    pub default: Option<String>,
    /// When true, the consumed parameter is removed from the query string.
    /// The default leaves it in place, which upstream APIs ignore.
    #[serde(default)]
    pub path_only: bool,
}

impl PlaceholderSpec {
    /// Declare a placeholder with no default, kept in the query string
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            path_only: false,
        }
    }

    /// Set the fallback value used when no parameter is supplied
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Remove the consumed parameter from the query string after substitution
    #[must_use]
    pub fn path_only(mut self) -> Self {
        self.path_only = true;
        self
    }
}

/// Substitute every placeholder in the descriptor's URL template.
///
/// Declared placeholders resolve first, in declaration order; any token left
/// in the template afterwards resolves from the query parameters in discovery
/// order and always stays in the query string. A token with no value and no
/// default is an [`Error::EndpointResolution`].
pub fn resolve(descriptor: &EndpointDescriptor, params: &mut QueryParams) -> Result<String> {
    let template = &descriptor.url_template;
    let mut resolved = template.clone();

    for spec in &descriptor.placeholders {
        let token = format!("{{{}}}", spec.name);
        if !resolved.contains(&token) {
            continue;
        }

        let value = match params.get(&spec.name) {
            Some(v) => v.to_string(),
            None => spec
                .default
                .clone()
                .ok_or_else(|| Error::endpoint_resolution(template, &spec.name))?,
        };

        resolved = resolved.replace(&token, &encode(&value));
        if spec.path_only {
            params.remove(&spec.name);
        }
    }

    // Undeclared tokens fall back to plain query-parameter lookup.
    while let Some(cap) = PLACEHOLDER_REGEX.captures(&resolved) {
        let token = cap.get(0).unwrap().as_str().to_string();
        let name = cap.get(1).unwrap().as_str();

        let value = params
            .get(name)
            .map(ToString::to_string)
            .ok_or_else(|| Error::endpoint_resolution(template, name))?;

        resolved = resolved.replace(&token, &encode(&value));
    }

    Ok(resolved)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Names of every `{name}` token in a template, in discovery order.
///
/// The catalog uses this to reject descriptors whose templates reference
/// names nothing can supply.
pub(crate) fn template_tokens(template: &str) -> Vec<&str> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|cap| cap.get(1).unwrap().as_str())
        .collect()
}
