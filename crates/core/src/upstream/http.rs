//! HTTP client for a remote vehicle data service.
//!
//! Endpoints (all GET, JSON bodies):
//! - `/vehicles/{vin}` -> `{"model": "...", "engine": "BEV"}`
//! - `/vehicles/{vin}/range/electric` and `/range/fuel` -> `{"range": 512}`
//! - `/vehicles/{vin}/pictures` -> `[{"view": "front", "url": "..."}]`
//! - `/models/{model}/silhouette` -> `{"url": "..."}`

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{PictureStream, UpstreamError, VehicleDataSource};
use crate::vehicle::{BasicData, PictureView};

/// HTTP upstream configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpUpstreamConfig {
    /// Service base URL (e.g., "http://vehicle-data:9000")
    pub url: String,
    /// Optional API key, sent as `X-Api-Key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Remote vehicle data service client.
pub struct HttpUpstream {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpUpstream {
    /// Create a new client.
    pub fn new(config: HttpUpstreamConfig) -> Result<Self, UpstreamError> {
        if config.url.trim().is_empty() {
            return Err(UpstreamError::NotConfigured(
                "upstream url is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.filter(|k| !k.is_empty()),
        })
    }

    fn vehicle_url(&self, vin: &str, suffix: &str) -> String {
        format!(
            "{}/vehicles/{}{}",
            self.base_url,
            urlencoding::encode(vin),
            suffix
        )
    }

    fn silhouette_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}/silhouette",
            self.base_url,
            urlencoding::encode(model)
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, UpstreamError> {
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request.send().await?;

        let status = response.status();
        if status == 404 {
            return Err(UpstreamError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json().await.map_err(|e| {
            UpstreamError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl VehicleDataSource for HttpUpstream {
    async fn basic_data(&self, vin: &str) -> Result<BasicData, UpstreamError> {
        debug!("Upstream basic data: vin={}", vin);
        let url = self.vehicle_url(vin, "");
        self.get_json(&url, &format!("vehicle {}", vin)).await
    }

    async fn electric_range(&self, vin: &str) -> Result<u32, UpstreamError> {
        debug!("Upstream electric range: vin={}", vin);
        let url = self.vehicle_url(vin, "/range/electric");
        let body: RangeResponse = self
            .get_json(&url, &format!("electric range of {}", vin))
            .await?;
        Ok(body.range)
    }

    async fn fuel_range(&self, vin: &str) -> Result<u32, UpstreamError> {
        debug!("Upstream fuel range: vin={}", vin);
        let url = self.vehicle_url(vin, "/range/fuel");
        let body: RangeResponse = self
            .get_json(&url, &format!("fuel range of {}", vin))
            .await?;
        Ok(body.range)
    }

    async fn pictures(&self, vin: &str) -> Result<PictureStream, UpstreamError> {
        debug!("Upstream pictures: vin={}", vin);
        let url = self.vehicle_url(vin, "/pictures");
        let views: Vec<PictureView> = self
            .get_json(&url, &format!("pictures of {}", vin))
            .await?;
        Ok(stream::iter(views.into_iter().map(Ok)).boxed())
    }

    async fn silhouette(&self, model: &str) -> Result<String, UpstreamError> {
        debug!("Upstream silhouette: model={}", model);
        let url = self.silhouette_url(model);
        let body: SilhouetteResponse = self
            .get_json(&url, &format!("silhouette of {}", model))
            .await?;
        Ok(body.url)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

// ============================================================================
// Response bodies (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RangeResponse {
    range: u32,
}

#[derive(Debug, Deserialize)]
struct SilhouetteResponse {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;
    use tokio_test::{assert_err, assert_ok};

    fn config(url: &str) -> HttpUpstreamConfig {
        HttpUpstreamConfig {
            url: url.to_string(),
            api_key: None,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = HttpUpstream::new(config("  "));
        assert!(matches!(result, Err(UpstreamError::NotConfigured(_))));
    }

    #[test]
    fn test_urls_are_encoded() {
        let upstream = HttpUpstream::new(config("http://vehicle-data:9000/")).unwrap();
        assert_eq!(
            upstream.vehicle_url("WVW ZZZ/1", "/range/fuel"),
            "http://vehicle-data:9000/vehicles/WVW%20ZZZ%2F1/range/fuel"
        );
        assert_eq!(
            upstream.silhouette_url("Model S"),
            "http://vehicle-data:9000/models/Model%20S/silhouette"
        );
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let mut cfg = config("http://localhost:9000");
        cfg.api_key = Some(String::new());
        let upstream = HttpUpstream::new(cfg).unwrap();
        assert!(upstream.api_key.is_none());
    }

    #[test]
    fn test_config_default_timeout() {
        let cfg: HttpUpstreamConfig = toml::from_str(r#"url = "http://localhost:9000""#).unwrap();
        assert_eq!(cfg.timeout_secs, 30);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_basic_data_body() {
        let basic: BasicData =
            serde_json::from_str(r#"{"model": "Ioniq", "engine": "PHEV"}"#).unwrap();
        assert_eq!(basic.model, "Ioniq");
        assert_eq!(basic.engine, crate::vehicle::EngineType::PlugInHybrid);
    }

    // ------------------------------------------------------------------------
    // Local stub service
    // ------------------------------------------------------------------------

    async fn stub_vehicle(Path(vin): Path<String>) -> Response {
        match vin.as_str() {
            "MISSING" => StatusCode::NOT_FOUND.into_response(),
            "BROKEN" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
            "BUSY" => (StatusCode::SERVICE_UNAVAILABLE, "try later").into_response(),
            "GARBLED" => (StatusCode::OK, "<html>not json</html>").into_response(),
            _ => Json(json!({"model": "Ioniq", "engine": "PHEV"})).into_response(),
        }
    }

    async fn stub_fuel_range(headers: HeaderMap) -> Response {
        match headers.get("X-Api-Key").and_then(|v| v.to_str().ok()) {
            Some("secret") => Json(json!({"range": 640})).into_response(),
            _ => (StatusCode::UNAUTHORIZED, "missing key").into_response(),
        }
    }

    async fn stub_pictures() -> Json<serde_json::Value> {
        Json(json!([
            {"view": "front", "url": "https://cdn.example/front.png"},
            {"view": "left", "url": "https://cdn.example/left.png"}
        ]))
    }

    async fn stub_silhouette(Path(model): Path<String>) -> Json<serde_json::Value> {
        Json(json!({"url": format!("https://cdn.example/{}.svg", model)}))
    }

    async fn spawn_stub() -> String {
        let router = Router::new()
            .route("/vehicles/{vin}", get(stub_vehicle))
            .route("/vehicles/{vin}/range/fuel", get(stub_fuel_range))
            .route("/vehicles/{vin}/pictures", get(stub_pictures))
            .route("/models/{model}/silhouette", get(stub_silhouette));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_stub_basic_data_success() {
        let upstream = HttpUpstream::new(config(&spawn_stub().await)).unwrap();
        let basic = assert_ok!(upstream.basic_data("VIN1").await);
        assert_eq!(basic.model, "Ioniq");
        assert_eq!(basic.engine, crate::vehicle::EngineType::PlugInHybrid);
    }

    #[tokio::test]
    async fn test_stub_404_is_not_found() {
        let upstream = HttpUpstream::new(config(&spawn_stub().await)).unwrap();
        let err = assert_err!(upstream.basic_data("MISSING").await);
        assert!(matches!(err, UpstreamError::NotFound(what) if what == "vehicle MISSING"));
    }

    #[tokio::test]
    async fn test_stub_other_status_is_api_error() {
        let upstream = HttpUpstream::new(config(&spawn_stub().await)).unwrap();

        let err = assert_err!(upstream.basic_data("BROKEN").await);
        assert!(
            matches!(err, UpstreamError::ApiError { status: 500, ref message } if message == "boom")
        );

        let err = assert_err!(upstream.basic_data("BUSY").await);
        assert!(matches!(err, UpstreamError::ApiError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_stub_bad_body_is_parse_error() {
        let upstream = HttpUpstream::new(config(&spawn_stub().await)).unwrap();
        let err = assert_err!(upstream.basic_data("GARBLED").await);
        assert!(matches!(err, UpstreamError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_stub_api_key_header_sent() {
        let url = spawn_stub().await;

        let without_key = HttpUpstream::new(config(&url)).unwrap();
        let err = assert_err!(without_key.fuel_range("VIN1").await);
        assert!(matches!(err, UpstreamError::ApiError { status: 401, .. }));

        let mut cfg = config(&url);
        cfg.api_key = Some("secret".to_string());
        let with_key = HttpUpstream::new(cfg).unwrap();
        assert_eq!(assert_ok!(with_key.fuel_range("VIN1").await), 640);
    }

    #[tokio::test]
    async fn test_stub_pictures_and_silhouette() {
        let upstream = HttpUpstream::new(config(&spawn_stub().await)).unwrap();

        let stream = assert_ok!(upstream.pictures("VIN1").await);
        let views: Vec<PictureView> = stream.map(|v| v.unwrap()).collect().await;
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].view, "front");

        let silhouette = assert_ok!(upstream.silhouette("Ioniq").await);
        assert_eq!(silhouette, "https://cdn.example/Ioniq.svg");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() {
        // Port 9 (discard) on localhost is almost never listening
        let upstream = HttpUpstream::new(config("http://127.0.0.1:9")).unwrap();
        let result = upstream.basic_data("VIN1").await;
        assert!(matches!(result, Err(UpstreamError::Http(_))));
    }
}
