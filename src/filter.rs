//! Filter translation and required-parameter validation
//!
//! Converts caller-supplied filter clauses into a normalized
//! [`QueryParams`] map and checks that every required filter name is
//! present and non-blank before any network call is issued.

use crate::error::{Error, Result};
use crate::types::{FilterOperator, QueryParams};
use serde::{Deserialize, Serialize};

/// One caller-supplied filter clause.
///
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Field name the filter applies to
    pub field: String,
    /// Filter value, always carried as a string
    pub value: String,
    /// Comparison operator, defaults to equality
    #[serde(default)]
    pub operator: FilterOperator,
}

impl FilterClause {
    /// Create an equality filter
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: FilterOperator::Equals,
        }
    }

    /// Create a filter with an explicit operator
    pub fn new(
        field: impl Into<String>,
        value: impl Into<String>,
        operator: FilterOperator,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator,
        }
    }
}

/// Translate filter clauses into a query parameter map.
///
/// Clauses with a blank field name are silently dropped (permissive caller
/// input, not an error). Duplicate field names collapse last-write-wins.
/// Range operators render as `field[op]` keys, e.g. `created[gte]`.
pub fn translate(filters: &[FilterClause]) -> QueryParams {
    let mut params = QueryParams::new();
    for clause in filters {
        let field = clause.field.trim();
        if field.is_empty() {
            continue;
        }
        let key = match clause.operator.suffix() {
            Some(op) => format!("{field}[{op}]"),
            None => field.to_string(),
        };
        params.insert(key, clause.value.clone());
    }
    params
}

/// Check that every required filter name is present and non-blank.
///
/// Reports *all* missing names in one error so callers get complete
/// diagnostics in a single round trip.
pub fn validate(entity: &str, params: &QueryParams, required: &[String]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| {
            params
                .get(name)
                .map_or(true, |value| value.trim().is_empty())
        })
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::missing_parameters(entity, missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn required(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_translate_empty() {
        let params = translate(&[]);
        assert!(params.is_empty());
    }

    #[test]
    fn test_translate_equality() {
        let params = translate(&[
            FilterClause::equals("status", "active"),
            FilterClause::equals("category", "books"),
        ]);

        assert_eq!(params.get("status"), Some("active"));
        assert_eq!(params.get("category"), Some("books"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_translate_drops_blank_field_names() {
        let params = translate(&[
            FilterClause::equals("", "ignored"),
            FilterClause::equals("   ", "also ignored"),
            FilterClause::equals("kept", "yes"),
        ]);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("kept"), Some("yes"));
    }

    #[test]
    fn test_translate_duplicates_last_write_wins() {
        let params = translate(&[
            FilterClause::equals("status", "active"),
            FilterClause::equals("Status", "archived"),
        ]);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("status"), Some("archived"));
    }

    #[test]
    fn test_translate_range_operators() {
        let params = translate(&[
            FilterClause::new("created", "2024-01-01", FilterOperator::GreaterOrEqual),
            FilterClause::new("created", "2024-12-31", FilterOperator::LessThan),
        ]);

        assert_eq!(params.get("created[gte]"), Some("2024-01-01"));
        assert_eq!(params.get("created[lt]"), Some("2024-12-31"));
    }

    #[test]
    fn test_validate_passes_when_all_present() {
        let params = translate(&[
            FilterClause::equals("store_id", "s1"),
            FilterClause::equals("since", "2024-01-01"),
        ]);

        assert!(validate("orders", &params, &required(&["store_id", "since"])).is_ok());
    }

    #[test]
    fn test_validate_enumerates_every_missing_name() {
        let params = translate(&[FilterClause::equals("since", "2024-01-01")]);

        let err = validate(
            "orders",
            &params,
            &required(&["store_id", "since", "region"]),
        )
        .unwrap_err();

        match err {
            Error::MissingRequiredParameter { entity, missing } => {
                assert_eq!(entity, "orders");
                assert_eq!(missing, vec!["store_id".to_string(), "region".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_blank_values() {
        let params = translate(&[FilterClause::equals("store_id", "   ")]);

        let err = validate("orders", &params, &required(&["store_id"])).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredParameter { missing, .. } if missing == vec!["store_id".to_string()]
        ));
    }

    #[test]
    fn test_validate_no_requirements() {
        assert!(validate("products", &QueryParams::new(), &[]).is_ok());
    }
}
