//! Common test utilities for in-process API testing with mocks.
//!
//! This module provides a test fixture that builds the router with a
//! `MockVehicleSource` injected, so HTTP behavior can be tested without any
//! upstream service.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vehicles_core::{testing::MockVehicleSource, Config, VehicleDataSource};

/// Re-export fixtures for test convenience
#[allow(unused_imports)]
pub use vehicles_core::testing::{fixtures, Operation};

/// Test fixture for API testing with a mock data source.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_vehicle_lookup() {
///     let fixture = TestFixture::new();
///
///     let response = fixture.get("/api/v1/vehicles/VIN1").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock data source - configure upstream responses
    pub source: Arc<MockVehicleSource>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with default config and mock.
    pub fn new() -> Self {
        let source = Arc::new(MockVehicleSource::new());

        let state = Arc::new(vehicles_server::state::AppState::new(
            Config::default(),
            Arc::clone(&source) as Arc<dyn VehicleDataSource>,
        ));
        let router = vehicles_server::api::create_router(state);

        Self { router, source }
    }

    /// Issue a GET request and parse the JSON body (Null if not JSON).
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Issue a GET request and return the raw body text.
    #[allow(dead_code)]
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).to_string())
    }
}
