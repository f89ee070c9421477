pub mod aggregator;
pub mod config;
pub mod metrics;
pub mod testing;
pub mod upstream;
pub mod vehicle;

pub use aggregator::{AggregatorError, Branch, VehicleAggregator, FRONT_VIEW};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig, UpstreamBackend, UpstreamConfig,
};
pub use upstream::{
    HttpUpstream, HttpUpstreamConfig, PictureStream, SimulatedConfig, SimulatedUpstream,
    UpstreamError, VehicleDataSource,
};
pub use vehicle::{BasicData, EngineType, PictureView, RangeInfo, VehicleRecord};
