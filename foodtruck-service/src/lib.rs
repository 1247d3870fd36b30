//! Food Truck Service Library
//!
//! HTTP handlers, routing and OpenAPI document for the food truck service.
//! This library is used by both the foodtruck-service binary and integration
//! tests.

pub mod config;
pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use foodtruck::{SearchService, Vendor};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Name reported by the status endpoint.
pub const API_NAME: &str = "Food Truck API";

/// Application state shared across handlers.
pub struct AppState {
    /// Vendor search, built once at startup.
    pub search: SearchService,
    /// Name of this API.
    pub name: String,
    /// Service version.
    pub version: String,
}

impl AppState {
    /// Create state around a search service, with the default name and the
    /// crate version.
    pub fn new(search: SearchService) -> Self {
        Self {
            search,
            name: API_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// OpenAPI documentation for the food truck service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Food Truck API",
        description = "Find mobile food vendors near a location.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        handlers::find_trucks_near,
        handlers::health_check,
        handlers::get_status,
    ),
    components(
        schemas(
            Vendor,
            handlers::ErrorResponse,
            handlers::HealthResponse,
            handlers::StatusResponse,
        )
    ),
    tags(
        (name = "trucks", description = "Food truck search endpoints"),
        (name = "system", description = "System and health endpoints")
    )
)]
pub struct ApiDoc;

/// Build the application router.
///
/// Routes:
///
/// - `GET /trucks/:lat/:long?radius=N` - Find trucks near a location
/// - `GET /health` - Health check
/// - `GET /status` - Service name, version and health
/// - `GET /swagger` - OpenAPI documentation (Swagger UI)
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/trucks/:lat/:long", get(handlers::find_trucks_near))
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::get_status))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// Re-export commonly used types for convenience
pub use config::ServiceConfig;
pub use handlers::{ErrorResponse, HealthResponse, StatusResponse, TrucksQuery};
