//! Food Truck Service - HTTP microservice for finding food trucks.
//!
//! A REST API for searching the Mobile Food Facility Permit dataset by location.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATABASE_PATH` | SQLite database file (opened read-only) | `./data/food-trucks.db` |
//! | `DATABASE_MAX_CONNECTIONS` | Pooled database connections | 5 |
//! | `PORT` | HTTP server port | 8080 |
//! | `TRUCKS_REQUEST_TIMEOUT_SECS` | Per-request timeout | 5 |
//! | `TRUCKS_START_RADIUS` | Initial expanding search radius (m) | 400 |
//! | `TRUCKS_MIN_RESULTS` | Trucks an expanding search tries to find | 5 |
//! | `TRUCKS_MAX_ITERATIONS` | Query cap per expanding search | 10 |
//! | `TRUCKS_DEDUPLICATE` | Drop repeat trucks in expanding searches | false |
//! | `RUST_LOG` | Log level (e.g., "info", "debug") | "info" |
//!
//! ## Endpoints
//!
//! - `GET /trucks/{lat}/{long}?radius=N` - Find trucks near a location
//! - `GET /health` - Health check
//! - `GET /status` - Service status
//! - `GET /swagger` - OpenAPI documentation (Swagger UI)

use std::net::SocketAddr;
use std::sync::Arc;

use foodtruck::{SearchConfig, SearchService, SqliteDatabase};
use foodtruck_service::{app, AppState, ServiceConfig};
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "foodtruck_service=info,foodtruck=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env();
    let search_config = SearchConfig::from_env();

    tracing::info!(
        database = %config.database_path.display(),
        max_connections = config.max_connections,
        "Using database"
    );

    let db = SqliteDatabase::open(&config.database_path, config.max_connections).await?;
    let search = SearchService::builder(Arc::new(db))
        .config(search_config)
        .build()?;

    tracing::info!(
        start_radius = search.config().start_radius,
        min_results = search.config().min_results,
        max_iterations = search.config().max_iterations,
        max_radius = search.config().max_radius(),
        deduplicate = search.config().deduplicate,
        port = config.port,
        "Starting food truck service"
    );

    let state = Arc::new(AppState::new(search));

    let router = app(state).layer(TimeoutLayer::new(config.request_timeout));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
