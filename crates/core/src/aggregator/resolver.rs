//! Vehicle aggregator implementation.
//!
//! Basic data is fetched first. Picture and range lookups then run as two
//! spawned tasks; each task's outcome is matched on its own so a failure or
//! panic in one never reaches the other.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use futures::StreamExt;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::metrics::{
    record_upstream_call, BRANCH_DEFAULTS, RESOLVE_DURATION, SILHOUETTE_FALLBACKS,
};
use crate::upstream::{UpstreamError, VehicleDataSource};
use crate::vehicle::{BasicData, EngineType, RangeInfo, VehicleRecord};

use super::types::{AggregatorError, Branch};

/// Picture label preferred for the record's picture.
pub const FRONT_VIEW: &str = "front";

/// Composes a [`VehicleRecord`] from the upstream lookups.
pub struct VehicleAggregator {
    source: Arc<dyn VehicleDataSource>,
}

impl VehicleAggregator {
    /// Create a new aggregator over the given data source.
    pub fn new(source: Arc<dyn VehicleDataSource>) -> Self {
        Self { source }
    }

    /// Name of the backing data source.
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Resolve the full record for one vehicle.
    ///
    /// Fails only when basic data cannot be fetched. A failed picture branch
    /// yields an empty picture URL and a failed range branch yields
    /// `RangeInfo::default()`.
    pub async fn resolve(&self, vin: &str) -> Result<VehicleRecord, AggregatorError> {
        let started = Instant::now();

        let basic = self.source.basic_data(vin).await;
        record_upstream_call("basic_data", &basic);
        let BasicData { model, engine } = match basic {
            Ok(basic) => basic,
            Err(source) => {
                RESOLVE_DURATION
                    .with_label_values(&["prerequisite_failed"])
                    .observe(started.elapsed().as_secs_f64());
                return Err(AggregatorError::Prerequisite {
                    vin: vin.to_string(),
                    source,
                });
            }
        };

        debug!("Basic data for {}: model={}, engine={:?}", vin, model, engine);

        let picture_task = BranchTask::spawn(resolve_picture(
            Arc::clone(&self.source),
            vin.to_string(),
            model.clone(),
        ));
        let range_task = BranchTask::spawn(resolve_range(
            Arc::clone(&self.source),
            vin.to_string(),
            engine,
        ));

        let (picture, range) = tokio::join!(picture_task, range_task);
        let picture = settle(Branch::Picture, vin, picture);
        let range = settle(Branch::Range, vin, range);

        let elapsed = started.elapsed();
        RESOLVE_DURATION
            .with_label_values(&["success"])
            .observe(elapsed.as_secs_f64());
        info!("Resolved vehicle {} in {:?}", vin, elapsed);

        Ok(VehicleRecord {
            vin: vin.to_string(),
            model,
            engine,
            picture,
            range,
        })
    }
}

/// Front view URL, or the model silhouette when no front view exists.
async fn resolve_picture(
    source: Arc<dyn VehicleDataSource>,
    vin: String,
    model: String,
) -> Result<String, UpstreamError> {
    let pictures = source.pictures(&vin).await;
    record_upstream_call("pictures", &pictures);
    let mut pictures = pictures?;

    while let Some(view) = pictures.next().await {
        let view = view?;
        if view.view == FRONT_VIEW {
            return Ok(view.url);
        }
    }

    info!("No front view for {}, falling back to {} silhouette", vin, model);
    SILHOUETTE_FALLBACKS.inc();

    let silhouette = source.silhouette(&model).await;
    record_upstream_call("silhouette", &silhouette);
    silhouette
}

/// Range lookups required by the engine type.
///
/// Hybrid legs run concurrently and both are awaited; an error in either
/// discards both values.
async fn resolve_range(
    source: Arc<dyn VehicleDataSource>,
    vin: String,
    engine: EngineType,
) -> Result<RangeInfo, UpstreamError> {
    match engine {
        EngineType::BatteryElectric => {
            let electric = source.electric_range(&vin).await;
            record_upstream_call("electric_range", &electric);
            Ok(RangeInfo::electric_only(electric?))
        }
        EngineType::CombustionOrOtherNonElectric => {
            let fuel = source.fuel_range(&vin).await;
            record_upstream_call("fuel_range", &fuel);
            Ok(RangeInfo::fuel_only(fuel?))
        }
        EngineType::PlugInHybrid => {
            let (electric, fuel) =
                tokio::join!(source.electric_range(&vin), source.fuel_range(&vin));
            record_upstream_call("electric_range", &electric);
            record_upstream_call("fuel_range", &fuel);
            Ok(RangeInfo::hybrid(electric?, fuel?))
        }
    }
}

/// Turn a finished branch into its value, substituting the default on failure.
fn settle<T: Default>(
    branch: Branch,
    vin: &str,
    outcome: Result<Result<T, UpstreamError>, JoinError>,
) -> T {
    match outcome {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => {
            warn!("{} lookup failed for {}, using default: {}", branch, vin, e);
            BRANCH_DEFAULTS.with_label_values(&[branch.as_str()]).inc();
            T::default()
        }
        Err(e) => {
            warn!("{} task for {} did not complete, using default: {}", branch, vin, e);
            BRANCH_DEFAULTS.with_label_values(&[branch.as_str()]).inc();
            T::default()
        }
    }
}

/// A spawned branch that is aborted if the resolve is dropped before it finishes.
struct BranchTask<T>(JoinHandle<T>);

impl<T: Send + 'static> BranchTask<T> {
    fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self(tokio::spawn(future))
    }
}

impl<T> Future for BranchTask<T> {
    type Output = Result<T, JoinError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().0).poll(cx)
    }
}

impl<T> Drop for BranchTask<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}
