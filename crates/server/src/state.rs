use std::sync::Arc;
use vehicles_core::{Config, SanitizedConfig, VehicleAggregator, VehicleDataSource};

/// Shared application state
pub struct AppState {
    config: Config,
    aggregator: VehicleAggregator,
}

impl AppState {
    pub fn new(config: Config, source: Arc<dyn VehicleDataSource>) -> Self {
        Self {
            config,
            aggregator: VehicleAggregator::new(source),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn aggregator(&self) -> &VehicleAggregator {
        &self.aggregator
    }
}
