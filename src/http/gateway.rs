//! HTTP gateway: the single capability the core consumes from its environment
//!
//! The adapter only ever needs `GET url + query params -> (status, headers,
//! body bytes)`. The gateway owns transport policy (timeout, default
//! headers, TLS); the core owns nothing transport-related. Retries and rate
//! limiting are explicitly not provided: a failed call is reported once.
//!
//! Cancellation is cooperative: an in-flight request races against the
//! caller's [`CancellationToken`] and loses as [`Error::Cancelled`].

use crate::error::{Error, Result};
use crate::types::QueryParams;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

/// Raw response handed back to the adapter.
///
/// Non-success statuses are returned, not raised; the adapter decides what a
/// 404 means.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The one external capability the adapter consumes
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// Issue a GET request with the given query parameters.
    ///
    /// Returns `Ok` for any completed exchange regardless of status;
    /// `Err` only for connection-level failures or cancellation.
    async fn get(
        &self,
        url: &str,
        query: &QueryParams,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse>;
}

/// Configuration for the reqwest-backed gateway
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL joined with relative request paths
    pub base_url: Option<String>,
    /// Request timeout (transport policy, not core policy)
    pub timeout: Duration,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("entity-adapter/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GatewayConfig {
    /// Create a new config builder
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }
}

/// Builder for gateway config
#[derive(Default)]
pub struct GatewayConfigBuilder {
    config: GatewayConfig,
}

impl GatewayConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> GatewayConfig {
        self.config
    }
}

/// Production gateway built on reqwest
pub struct ReqwestGateway {
    client: Client,
    config: GatewayConfig,
}

impl ReqwestGateway {
    /// Create a gateway with default configuration
    pub fn new() -> Self {
        Self::with_config(GatewayConfig::default())
    }

    /// Create a gateway with custom configuration
    pub fn with_config(config: GatewayConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Build and validate the full URL for a request path.
    ///
    /// An unparseable result (bad base URL, or a relative path with no base)
    /// is an [`Error::InvalidUrl`] before anything touches the network.
    fn build_url(&self, path: &str) -> Result<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path)?;
            return Ok(path.to_string());
        }

        let full = match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        };
        Url::parse(&full)?;
        Ok(full)
    }
}

impl Default for ReqwestGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReqwestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestGateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn get(
        &self,
        url: &str,
        query: &QueryParams,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse> {
        let full_url = self.build_url(url)?;

        let mut req = self.client.get(&full_url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !query.is_empty() {
            req = req.query(query.as_pairs());
        }

        let exchange = async {
            let response = req.send().await?;
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            debug!(%full_url, status, "GET completed");
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        };

        tokio::select! {
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = exchange => result,
        }
    }
}
