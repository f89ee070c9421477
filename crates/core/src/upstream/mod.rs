//! Upstream vehicle data sources.
//!
//! The aggregator only sees the [`VehicleDataSource`] trait. Two backends
//! implement it: a simulator with fixed artificial latency and an HTTP client
//! for a remote vehicle data service.

mod http;
mod simulated;

pub use http::{HttpUpstream, HttpUpstreamConfig};
pub use simulated::{SimulatedConfig, SimulatedUpstream};

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

use crate::vehicle::{BasicData, PictureView};

/// Lazily produced picture views, in upstream order. Consumed once.
pub type PictureStream = BoxStream<'static, Result<PictureView, UpstreamError>>;

/// Errors returned by upstream data sources.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Upstream returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Source cannot serve the request right now.
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    /// Client not configured (missing URL, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// The set of upstream lookups a vehicle resolve is built from.
#[async_trait]
pub trait VehicleDataSource: Send + Sync {
    /// Model name and engine type. Every resolve starts here.
    async fn basic_data(&self, vin: &str) -> Result<BasicData, UpstreamError>;

    /// Electric range in kilometers.
    async fn electric_range(&self, vin: &str) -> Result<u32, UpstreamError>;

    /// Fuel range in kilometers.
    async fn fuel_range(&self, vin: &str) -> Result<u32, UpstreamError>;

    /// Labelled pictures of the vehicle. May be empty.
    async fn pictures(&self, vin: &str) -> Result<PictureStream, UpstreamError>;

    /// Generic silhouette image URL for a model.
    async fn silhouette(&self, model: &str) -> Result<String, UpstreamError>;

    /// Backend name for logs and config output.
    fn name(&self) -> &'static str;
}
