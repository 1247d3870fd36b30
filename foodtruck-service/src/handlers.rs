//! HTTP request handlers for the food truck service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use foodtruck::{DomainError, ErrorCode, Vendor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::AppState;

/// Query parameters for the trucks endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrucksQuery {
    /// Radius of search in meters (approximate). Omit, or pass 0, to widen
    /// the search until at least five trucks are found.
    /// A value that is not an integer is treated as omitted.
    #[param(value_type = Option<i64>)]
    pub radius: Option<String>,
}

impl TrucksQuery {
    /// The requested radius, or `0` when absent or not an integer.
    ///
    /// Surrounding whitespace makes the value invalid.
    pub fn radius(&self) -> i64 {
        self.radius
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or(0)
    }
}

/// Error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Service status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Name of this API.
    pub name: String,
    /// Service version.
    pub version: String,
    /// Whether the service is healthy.
    pub healthy: bool,
}

/// Map a domain error category to an HTTP status.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Duplicate => StatusCode::CONFLICT,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Other => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Find trucks near a location.
///
/// # Path Parameters
///
/// - `lat`: Latitude to search around
/// - `long`: Longitude to search around
///
/// # Query Parameters
///
/// - `radius`: Optional radius in meters. Without it, the search radius starts
///   at 400m and doubles until at least five trucks are found.
///
/// # Returns
///
/// - `200 OK` with a JSON array of trucks (`[]` when none)
/// - `400 Bad Request` if `lat`/`long` are not numbers or `radius` is negative
/// - `500 Internal Server Error` if the database query fails
#[utoipa::path(
    get,
    path = "/trucks/{lat}/{long}",
    tag = "trucks",
    params(
        ("lat" = f64, Path, description = "Latitude to search around"),
        ("long" = f64, Path, description = "Longitude to search around"),
        TrucksQuery
    ),
    responses(
        (status = 200, description = "Trucks near the location", body = Vec<Vendor>),
        (status = 400, description = "Input validation error", body = ErrorResponse),
        (status = 500, description = "Other error", body = ErrorResponse)
    )
)]
pub async fn find_trucks_near(
    State(state): State<Arc<AppState>>,
    Path((lat, long)): Path<(String, String)>,
    Query(query): Query<TrucksQuery>,
) -> Response {
    let lat = match parse_coordinate("lat", &lat) {
        Ok(v) => v,
        Err(response) => return response,
    };
    let long = match parse_coordinate("long", &long) {
        Ok(v) => v,
        Err(response) => return response,
    };
    let radius = query.radius();

    tracing::debug!(lat, long, radius, "Trucks query");

    match state.search.find_near(lat, long, radius).await {
        Ok(trucks) => (StatusCode::OK, Json(trucks)).into_response(),
        Err(e) => error_response(lat, long, e),
    }
}

/// Parse a path coordinate, producing a `400` response on failure.
fn parse_coordinate(name: &str, raw: &str) -> Result<f64, Response> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(bad_request(format!("{name} must be a finite number"))),
        Err(e) => Err(bad_request(format!("invalid {name} {raw:?}: {e}"))),
    }
}

fn bad_request(message: String) -> Response {
    tracing::warn!(error = %message, "Rejected trucks query");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

/// Create an error response for a failed search.
fn error_response(lat: f64, long: f64, e: DomainError) -> Response {
    let status = status_for(e.code);

    tracing::warn!(lat, long, code = %e.code, error = %e, "Trucks query failed");

    (status, Json(ErrorResponse { error: e.message })).into_response()
}

/// Health check endpoint.
///
/// Returns service status and version.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Service status endpoint.
///
/// Returns the API name, version and health flag.
#[utoipa::path(
    get,
    path = "/status",
    tag = "system",
    responses((status = 200, description = "Service status", body = StatusResponse))
)]
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        name: state.name.clone(),
        version: state.version.clone(),
        healthy: true,
    })
}
