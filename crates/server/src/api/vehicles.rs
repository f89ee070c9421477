//! Vehicle lookup handler.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::error;
use vehicles_core::VehicleRecord;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// GET /api/v1/vehicles/{vin}
///
/// Resolve the composed record for a vehicle. Picture and range failures
/// show up as empty fields; only a failed basic data lookup is an error.
pub async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(vin): Path<String>,
) -> Result<Json<VehicleRecord>, ApiError> {
    if vin.trim().is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "vehicle identifier cannot be empty",
        ));
    }

    match state.aggregator().resolve(&vin).await {
        Ok(record) => Ok(Json(record)),
        Err(e) if e.is_not_found() => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Vehicle not found: {}", vin),
        )),
        Err(e) => {
            error!("Failed to resolve vehicle {}: {}", vin, e);
            Err(api_error(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
