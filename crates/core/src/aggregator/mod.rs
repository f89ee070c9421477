//! Vehicle aggregation.
//!
//! A resolve runs in three steps:
//! - **Basic data**: awaited first, failure fails the request
//! - **Branches**: picture and range lookups run as separate tasks
//! - **Merge**: a failed branch contributes its default instead of an error

mod resolver;
mod types;

pub use resolver::{VehicleAggregator, FRONT_VIEW};
pub use types::{AggregatorError, Branch};
