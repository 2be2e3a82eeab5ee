//! Error types for the entity-adapter core
//!
//! This module defines the error taxonomy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! A non-success HTTP status is deliberately *not* represented here: the
//! adapter maps transport failures to an empty page (see [`crate::adapter`]),
//! so only pre-flight and payload errors surface as `Err` values.

use thiserror::Error;

/// The main error type for the entity-adapter core
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Catalog / Validation Errors
    // ============================================================================
    #[error("Unknown entity: {entity}")]
    UnknownEntity { entity: String },

    #[error("Entity '{entity}' already registered")]
    DuplicateEntity { entity: String },

    #[error("Entity '{entity}' is missing required parameters: {}", missing.join(", "))]
    MissingRequiredParameter {
        entity: String,
        missing: Vec<String>,
    },

    #[error("Cannot resolve endpoint '{template}': no value for placeholder '{placeholder}'")]
    EndpointResolution {
        template: String,
        placeholder: String,
    },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Failed to parse response payload: {message}")]
    PayloadParse { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request cancelled")]
    Cancelled,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an unknown-entity error
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        Self::UnknownEntity {
            entity: entity.into(),
        }
    }

    /// Create a duplicate-entity error
    pub fn duplicate_entity(entity: impl Into<String>) -> Self {
        Self::DuplicateEntity {
            entity: entity.into(),
        }
    }

    /// Create a missing-parameter error enumerating every missing name
    pub fn missing_parameters(entity: impl Into<String>, missing: Vec<String>) -> Self {
        Self::MissingRequiredParameter {
            entity: entity.into(),
            missing,
        }
    }

    /// Create an endpoint resolution error
    pub fn endpoint_resolution(
        template: impl Into<String>,
        placeholder: impl Into<String>,
    ) -> Self {
        Self::EndpointResolution {
            template: template.into(),
            placeholder: placeholder.into(),
        }
    }

    /// Create a payload parse error
    pub fn payload_parse(message: impl Into<String>) -> Self {
        Self::PayloadParse {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for the entity-adapter core
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
