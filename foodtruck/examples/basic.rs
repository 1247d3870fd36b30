//! Basic example demonstrating foodtruck library usage.
//!
//! Run with: cargo run --example basic -- /path/to/food-trucks.db

use std::env;
use std::sync::Arc;

use foodtruck::{DomainError, SearchService, SqliteDatabase};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Get database path from command line
    let db_path = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example basic -- /path/to/food-trucks.db");
        std::process::exit(1);
    });

    let db = SqliteDatabase::open(&db_path, 1).await?;
    let service = SearchService::new(Arc::new(db));

    let locations = [
        ("Mission & 10th, San Francisco", 37.7758, -122.4205, 0),
        ("Ferry Building, 500m", 37.7955, -122.3937, 500),
        ("Gulf of Guinea", 0.0, 1.23, 1000),
    ];

    for (name, lat, lon, radius) in locations {
        println!("{} (radius {}):", name, radius);
        match service.find_near(lat, lon, radius).await {
            Ok(vendors) if vendors.is_empty() => println!("  no trucks found"),
            Ok(vendors) => {
                for vendor in vendors {
                    println!(
                        "  {} - {}",
                        vendor.name.as_deref().unwrap_or("?"),
                        vendor.address.as_deref().unwrap_or("")
                    );
                }
            }
            Err(DomainError { code, message }) => println!("  error ({}): {}", code, message),
        }
    }

    Ok(())
}
