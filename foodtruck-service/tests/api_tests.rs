//! Integration tests for the HTTP API.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use foodtruck::{
    BoundingBox, Database, DatabaseError, SearchService, SqliteDatabase, VendorRow,
};
use foodtruck_service::{app, AppState};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;

/// Permit and applicant tables with a handful of trucks in San Francisco and
/// London, plus rows that must never be returned.
const FIXTURE: &str = "
    CREATE TABLE Applicant (id INTEGER PRIMARY KEY, value TEXT);
    CREATE TABLE Mobile_Food_Facility_Permit (
        locationId INTEGER PRIMARY KEY,
        Applicant INTEGER,
        Latitude REAL,
        Longitude REAL,
        Address TEXT,
        FoodItems TEXT
    );
    INSERT INTO Applicant (id, value) VALUES
        (1, 'Chicken Shack'),
        (2, 'Snacks on Wheels'),
        (3, 'Taco Loco'),
        (4, 'Coffee Cart'),
        (5, 'Halal Guys'),
        (6, NULL),
        (7, 'Burgers of Bromley'),
        (8, 'Ghost Kitchen');
    INSERT INTO Mobile_Food_Facility_Permit VALUES
        (1001, 1, 37.7760, -122.4200, '1 Mission St', 'Fried Chicken: Fries'),
        (1002, 2, 37.7745, -122.4190, '2 Mission St', 'Chips: Candy: Soda'),
        (1003, 3, 37.7800, -122.4230, '3 Mission St', 'Tacos: Burritos'),
        (1004, 4, 37.7700, -122.4205, NULL, 'Coffee'),
        (1005, 5, 37.7758, -122.4100, '5 Mission St', 'Gyros'),
        (1006, 6, 37.7755, -122.4210, NULL, NULL),
        (2001, 7, 51.4035, 0.0565, '1 High St', 'Burgers: Shakes'),
        (2002, 8, 0, 1.23, 'Null Island', 'Nothing');
";

/// A data source that always fails, as a broken database would.
struct BrokenDatabase;

#[async_trait]
impl Database for BrokenDatabase {
    async fn query_vendors(&self, _bounds: &BoundingBox) -> foodtruck::Result<Vec<VendorRow>> {
        Err(DatabaseError::Backend(
            "no such table: Mobile_Food_Facility_Permit".to_string(),
        ))
    }
}

fn server_for(db: Arc<dyn Database>) -> TestServer {
    let state = Arc::new(AppState::new(SearchService::new(db)));
    TestServer::new(app(state)).unwrap()
}

/// Create a test server backed by an in-memory SQLite fixture.
async fn create_test_server() -> TestServer {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::raw_sql(FIXTURE).execute(&pool).await.unwrap();

    server_for(Arc::new(SqliteDatabase::from_pool(pool)))
}

fn names(json: &Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_get_trucks_san_fran() {
    let server = create_test_server().await;

    let response = server.get("/trucks/37.7758/-122.4205").await;

    response.assert_status_ok();
    assert!(response.text().contains("Snacks"));

    let json: Value = response.json();
    assert!(json.as_array().unwrap().len() >= 5);
}

#[tokio::test]
async fn test_get_trucks_london() {
    let server = create_test_server().await;

    let response = server.get("/trucks/51.403278/0.056169").await;

    response.assert_status_ok();
    assert!(response.text().contains("Burgers"));
}

#[tokio::test]
async fn test_get_trucks_radius() {
    let server = create_test_server().await;

    let response = server.get("/trucks/37.7758/-122.4205?radius=400").await;

    response.assert_status_ok();
    let json: Value = response.json();
    let names = names(&json);
    assert!(names.contains(&"Chicken Shack".to_string()));
    assert!(!names.contains(&"Taco Loco".to_string()));
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_trucks_radius_empty() {
    let server = create_test_server().await;

    let response = server.get("/trucks/0.00/1.23?radius=1000").await;

    response.assert_status_ok();
    assert_eq!(response.text().trim(), "[]");
}

#[tokio::test]
async fn test_get_trucks_bad_params() {
    let server = create_test_server().await;

    let response = server.get("/trucks/0.00/foo").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("long"));

    let response = server.get("/trucks/north/1.23").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_trucks_negative_radius() {
    let server = create_test_server().await;

    let response = server.get("/trucks/37.7758/-122.4205?radius=-50").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "radius must be greater than 0");
}

#[tokio::test]
async fn test_get_trucks_unparseable_radius_expands() {
    let server = create_test_server().await;

    let response = server.get("/trucks/37.7758/-122.4205?radius=wide").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert!(json.as_array().unwrap().len() >= 5);
}

#[tokio::test]
async fn test_get_trucks_padded_radius_expands() {
    let server = create_test_server().await;

    // A fixed 500m search would find only four trucks here
    let response = server.get("/trucks/37.7758/-122.4205?radius=%20500").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert!(json.as_array().unwrap().len() >= 5);
}

#[tokio::test]
async fn test_get_trucks_null_fields_are_empty_strings() {
    let server = create_test_server().await;

    let response = server.get("/trucks/37.7758/-122.4205?radius=400").await;

    response.assert_status_ok();
    assert!(!response.text().contains("null"));

    let json: Value = response.json();
    let unnamed = json
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["id"] == "1006")
        .unwrap();
    assert_eq!(unnamed["name"], "");
    assert_eq!(unnamed["description"], "");
    assert_eq!(unnamed["address"], "");
    assert_eq!(unnamed["lat"], 37.7755);
    assert_eq!(unnamed["long"], -122.4210);
}

#[tokio::test]
async fn test_get_trucks_database_failure() {
    let server = server_for(Arc::new(BrokenDatabase));

    let response = server.get("/trucks/37.7758/-122.4205").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], "Failed to fetch trucks");
    assert!(!response.text().contains("no such table"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].as_str().is_some());
}

#[tokio::test]
async fn test_status_endpoint() {
    let server = create_test_server().await;

    let response = server.get("/status").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["name"], "Food Truck API");
    assert_eq!(json["healthy"], true);
}

#[tokio::test]
async fn test_openapi_document() {
    let server = create_test_server().await;

    let response = server.get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert!(json["paths"]["/trucks/{lat}/{long}"].is_object());
    assert!(json["components"]["schemas"]["Vendor"].is_object());
}
