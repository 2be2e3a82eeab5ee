//! HTTP transport seam
//!
//! The [`HttpGateway`] trait is the only capability the adapter consumes
//! from its environment; [`ReqwestGateway`] is the production
//! implementation.

mod gateway;

pub use gateway::{GatewayConfig, GatewayConfigBuilder, HttpGateway, HttpResponse, ReqwestGateway};
