//! In-process simulator of the remote vehicle services.
//!
//! Every call sleeps for a fixed latency before answering with canned data.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PictureStream, UpstreamError, VehicleDataSource};
use crate::vehicle::{BasicData, EngineType, PictureView};

const SIMULATED_MODEL: &str = "SomeElectricCar";
const SIMULATED_RANGE_KM: u32 = 512;
static SIMULATED_VIEWS: [&str; 4] = ["top", "front", "left", "right"];

/// Simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedConfig {
    /// Artificial latency of every call (milliseconds).
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Base URL for generated picture links.
    #[serde(default = "default_picture_base_url")]
    pub picture_base_url: String,
}

fn default_latency_ms() -> u64 {
    1000
}

fn default_picture_base_url() -> String {
    "https://example.com/pictures".to_string()
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            picture_base_url: default_picture_base_url(),
        }
    }
}

/// Simulated upstream with fixed latency.
#[derive(Debug, Clone)]
pub struct SimulatedUpstream {
    latency: Duration,
    picture_base_url: String,
}

impl SimulatedUpstream {
    pub fn new(config: SimulatedConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            picture_base_url: config.picture_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for SimulatedUpstream {
    fn default() -> Self {
        Self::new(SimulatedConfig::default())
    }
}

#[async_trait]
impl VehicleDataSource for SimulatedUpstream {
    async fn basic_data(&self, vin: &str) -> Result<BasicData, UpstreamError> {
        debug!("Simulated basic data: vin={}", vin);
        self.delay().await;
        Ok(BasicData {
            model: SIMULATED_MODEL.to_string(),
            engine: EngineType::BatteryElectric,
        })
    }

    async fn electric_range(&self, vin: &str) -> Result<u32, UpstreamError> {
        debug!("Simulated electric range: vin={}", vin);
        self.delay().await;
        Ok(SIMULATED_RANGE_KM)
    }

    async fn fuel_range(&self, vin: &str) -> Result<u32, UpstreamError> {
        debug!("Simulated fuel range: vin={}", vin);
        self.delay().await;
        Ok(SIMULATED_RANGE_KM)
    }

    async fn pictures(&self, vin: &str) -> Result<PictureStream, UpstreamError> {
        debug!("Simulated pictures: vin={}", vin);
        self.delay().await;

        let base = format!("{}/{}", self.picture_base_url, vin);
        let views = SIMULATED_VIEWS
            .iter()
            .map(move |view| Ok(PictureView::new(*view, format!("{}/{}.png", base, view))));

        Ok(stream::iter(views).boxed())
    }

    async fn silhouette(&self, model: &str) -> Result<String, UpstreamError> {
        debug!("Simulated silhouette: model={}", model);
        self.delay().await;
        Ok(format!("{}/{}/silhouette.png", self.picture_base_url, model))
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
