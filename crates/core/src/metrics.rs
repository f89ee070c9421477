//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Vehicle resolves (duration, outcome)
//! - Branch defaults (picture and range lookups that fell back)
//! - Upstream calls by operation

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Resolve Metrics
// =============================================================================

/// Resolve duration in seconds.
pub static RESOLVE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "vehicles_resolve_duration_seconds",
            "Duration of a full vehicle resolve",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 10.0]),
        &["result"], // "success", "prerequisite_failed"
    )
    .unwrap()
});

/// Branches that yielded their default value.
pub static BRANCH_DEFAULTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "vehicles_branch_defaults_total",
            "Resolve branches that failed and were replaced by their default",
        ),
        &["branch"], // "picture", "range"
    )
    .unwrap()
});

/// Silhouette lookups because no front view was available.
pub static SILHOUETTE_FALLBACKS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "vehicles_silhouette_fallbacks_total",
        "Picture lookups that fell back to the model silhouette",
    )
    .unwrap()
});

// =============================================================================
// Upstream Metrics
// =============================================================================

/// Upstream calls by operation and result.
pub static UPSTREAM_CALLS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("vehicles_upstream_calls_total", "Total upstream calls"),
        &["operation", "result"], // result: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper Functions
// =============================================================================

/// Record the outcome of one upstream call.
pub fn record_upstream_call<T, E>(operation: &str, result: &Result<T, E>) {
    let outcome = if result.is_ok() { "success" } else { "error" };
    UPSTREAM_CALLS.with_label_values(&[operation, outcome]).inc();
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(RESOLVE_DURATION.clone()),
        Box::new(BRANCH_DEFAULTS.clone()),
        Box::new(SILHOUETTE_FALLBACKS.clone()),
        Box::new(UPSTREAM_CALLS.clone()),
    ]
}
