//! Types for the vehicle aggregator.

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors surfaced by a resolve.
///
/// Only the basic data lookup can fail a request. Branch failures are
/// replaced by defaults and never show up here.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// Basic data lookup failed, nothing else was attempted.
    #[error("basic data lookup failed for {vin}: {source}")]
    Prerequisite {
        vin: String,
        #[source]
        source: UpstreamError,
    },
}

impl AggregatorError {
    /// Whether the upstream reported the vehicle as unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Prerequisite {
                source: UpstreamError::NotFound(_),
                ..
            }
        )
    }
}

/// The independently supervised parts of a resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Picture,
    Range,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Picture => "picture",
            Self::Range => "range",
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
