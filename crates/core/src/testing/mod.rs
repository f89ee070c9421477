//! Testing utilities and mock implementations.
//!
//! This module provides a mock of the upstream data source trait, allowing
//! aggregation and HTTP tests without any remote service.
//!
//! # Example
//!
//! ```rust,ignore
//! use vehicles_core::testing::{fixtures, MockVehicleSource, Operation};
//!
//! let source = MockVehicleSource::new();
//!
//! // Configure mock responses
//! source.set_basic_data(fixtures::basic_data("Ioniq", EngineType::PlugInHybrid)).await;
//! source.fail(Operation::FuelRange).await;
//!
//! // Use in VehicleAggregator...
//! ```

mod mock_vehicle_source;

pub use mock_vehicle_source::{MockVehicleSource, Operation, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::vehicle::{BasicData, EngineType, PictureView};

    /// Views returned by the default picture set, in order.
    pub const DEFAULT_VIEWS: [&str; 4] = ["top", "front", "left", "right"];

    /// Create basic data for a model.
    pub fn basic_data(model: &str, engine: EngineType) -> BasicData {
        BasicData {
            model: model.to_string(),
            engine,
        }
    }

    /// Create a picture view with a predictable URL.
    pub fn picture(view: &str, vin: &str) -> PictureView {
        PictureView::new(view, picture_url(view, vin))
    }

    /// URL used by [`picture`] for a view.
    pub fn picture_url(view: &str, vin: &str) -> String {
        format!("https://example.com/pictures/{}/{}.png", vin, view)
    }

    /// Create the default four-view picture set.
    pub fn picture_set(vin: &str) -> Vec<PictureView> {
        DEFAULT_VIEWS.iter().map(|view| picture(view, vin)).collect()
    }

    /// Create a picture set without a front view.
    pub fn picture_set_without_front(vin: &str) -> Vec<PictureView> {
        DEFAULT_VIEWS
            .iter()
            .filter(|view| **view != "front")
            .map(|view| picture(view, vin))
            .collect()
    }
}
