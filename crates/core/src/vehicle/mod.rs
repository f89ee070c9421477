//! Vehicle data model returned by the aggregation endpoint.

mod types;

pub use types::*;
