//! Mock vehicle data source for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::sync::RwLock;

use crate::upstream::{PictureStream, UpstreamError, VehicleDataSource};
use crate::vehicle::{BasicData, EngineType, PictureView};

/// Upstream operations, used for failure injection and call recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    BasicData,
    ElectricRange,
    FuelRange,
    Pictures,
    Silhouette,
}

/// A recorded upstream call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub operation: Operation,
    /// VIN, or model name for silhouette lookups.
    pub key: String,
}

/// Mock implementation of the VehicleDataSource trait.
///
/// Provides controllable behavior for testing:
/// - Configurable basic data, ranges, pictures and silhouette
/// - Per-operation failure injection (persistent until cleared)
/// - Fixed artificial latency on every call
/// - Call recording for assertions
///
/// # Example
///
/// ```rust,ignore
/// use vehicles_core::testing::{MockVehicleSource, Operation};
///
/// let source = MockVehicleSource::new();
/// source.fail(Operation::FuelRange).await;
///
/// // Use in VehicleAggregator...
/// assert_eq!(source.call_count(Operation::FuelRange).await, 1);
/// ```
#[derive(Debug)]
pub struct MockVehicleSource {
    basic_data: Arc<RwLock<BasicData>>,
    electric_range: Arc<RwLock<u32>>,
    fuel_range: Arc<RwLock<u32>>,
    pictures: Arc<RwLock<Vec<PictureView>>>,
    /// Yield an error after this many picture items.
    picture_stream_error_after: Arc<RwLock<Option<usize>>>,
    /// Overrides the generated silhouette URL.
    silhouette: Arc<RwLock<Option<String>>>,
    /// Injected failures, replayed on every call until cleared.
    failing: Arc<RwLock<HashMap<Operation, UpstreamError>>>,
    latency: Arc<RwLock<Duration>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl Default for MockVehicleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVehicleSource {
    /// Create a mock answering like the simulator: an electric car with a front view.
    pub fn new() -> Self {
        Self {
            basic_data: Arc::new(RwLock::new(super::fixtures::basic_data(
                "SomeElectricCar",
                EngineType::BatteryElectric,
            ))),
            electric_range: Arc::new(RwLock::new(512)),
            fuel_range: Arc::new(RwLock::new(512)),
            pictures: Arc::new(RwLock::new(super::fixtures::picture_set("VIN"))),
            picture_stream_error_after: Arc::new(RwLock::new(None)),
            silhouette: Arc::new(RwLock::new(None)),
            failing: Arc::new(RwLock::new(HashMap::new())),
            latency: Arc::new(RwLock::new(Duration::ZERO)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    // =========================================================================
    // Response Configuration
    // =========================================================================

    /// Set the basic data returned for every VIN.
    pub async fn set_basic_data(&self, basic: BasicData) {
        *self.basic_data.write().await = basic;
    }

    /// Set the electric range.
    pub async fn set_electric_range(&self, km: u32) {
        *self.electric_range.write().await = km;
    }

    /// Set the fuel range.
    pub async fn set_fuel_range(&self, km: u32) {
        *self.fuel_range.write().await = km;
    }

    /// Set the picture set, in stream order.
    pub async fn set_pictures(&self, pictures: Vec<PictureView>) {
        *self.pictures.write().await = pictures;
    }

    /// Make the picture stream fail after `count` items.
    pub async fn set_picture_stream_error_after(&self, count: usize) {
        *self.picture_stream_error_after.write().await = Some(count);
    }

    /// Set the silhouette URL returned for any model.
    pub async fn set_silhouette(&self, url: impl Into<String>) {
        *self.silhouette.write().await = Some(url.into());
    }

    /// Set the latency applied to every call.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = latency;
    }

    // =========================================================================
    // Failure Injection
    // =========================================================================

    /// Make every call of `operation` fail until cleared.
    pub async fn fail(&self, operation: Operation) {
        let error = UpstreamError::Unavailable(format!("injected {:?} failure", operation));
        self.fail_with(operation, error).await;
    }

    /// Make every call of `operation` fail with `error` until cleared.
    pub async fn fail_with(&self, operation: Operation, error: UpstreamError) {
        self.failing.write().await.insert(operation, error);
    }

    /// Clear all injected failures.
    pub async fn clear_failures(&self) {
        self.failing.write().await.clear();
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls, in arrival order.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Number of calls made to `operation`.
    pub async fn call_count(&self, operation: Operation) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    /// Record the call, wait out the latency, then apply failure injection.
    async fn enter(&self, operation: Operation, key: &str) -> Result<(), UpstreamError> {
        self.calls.write().await.push(RecordedCall {
            operation,
            key: key.to_string(),
        });

        let latency = *self.latency.read().await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if let Some(error) = self.failing.read().await.get(&operation) {
            return Err(replay(error));
        }
        Ok(())
    }
}

/// Rebuild an injected error so it can be returned more than once.
fn replay(error: &UpstreamError) -> UpstreamError {
    match error {
        UpstreamError::NotFound(what) => UpstreamError::NotFound(what.clone()),
        UpstreamError::ApiError { status, message } => UpstreamError::ApiError {
            status: *status,
            message: message.clone(),
        },
        UpstreamError::ParseError(msg) => UpstreamError::ParseError(msg.clone()),
        UpstreamError::Unavailable(msg) => UpstreamError::Unavailable(msg.clone()),
        UpstreamError::NotConfigured(msg) => UpstreamError::NotConfigured(msg.clone()),
        // reqwest errors cannot be cloned
        UpstreamError::Http(e) => UpstreamError::Unavailable(e.to_string()),
    }
}

#[async_trait]
impl VehicleDataSource for MockVehicleSource {
    async fn basic_data(&self, vin: &str) -> Result<BasicData, UpstreamError> {
        self.enter(Operation::BasicData, vin).await?;
        Ok(self.basic_data.read().await.clone())
    }

    async fn electric_range(&self, vin: &str) -> Result<u32, UpstreamError> {
        self.enter(Operation::ElectricRange, vin).await?;
        Ok(*self.electric_range.read().await)
    }

    async fn fuel_range(&self, vin: &str) -> Result<u32, UpstreamError> {
        self.enter(Operation::FuelRange, vin).await?;
        Ok(*self.fuel_range.read().await)
    }

    async fn pictures(&self, vin: &str) -> Result<PictureStream, UpstreamError> {
        self.enter(Operation::Pictures, vin).await?;

        let pictures = self.pictures.read().await.clone();
        let items: Vec<Result<PictureView, UpstreamError>> =
            match *self.picture_stream_error_after.read().await {
                Some(count) => pictures
                    .into_iter()
                    .take(count)
                    .map(Ok)
                    .chain(std::iter::once(Err(UpstreamError::ParseError(
                        "injected picture stream failure".to_string(),
                    ))))
                    .collect(),
                None => pictures.into_iter().map(Ok).collect(),
            };

        Ok(stream::iter(items).boxed())
    }

    async fn silhouette(&self, model: &str) -> Result<String, UpstreamError> {
        self.enter(Operation::Silhouette, model).await?;
        Ok(self
            .silhouette
            .read()
            .await
            .clone()
            .unwrap_or_else(|| format!("https://mock.local/{}/silhouette.png", model)))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
