//! # foodtruck - Food Truck Location Search
//!
//! Finds mobile food vendors near a point, over the San Francisco Mobile Food
//! Facility Permit dataset stored in SQLite.
//!
//! ## Features
//!
//! - **Bounding-box search**: a radius in meters becomes a lat/long rectangle
//!   using fixed per-meter scale factors (see [`bounds`])
//! - **Expanding search**: with no radius, the search doubles its radius from
//!   400m until at least five vendors are found, with a hard iteration cap
//! - **Parameterized SQL**: coordinates are always bound, never formatted into
//!   the query text
//! - **Null-aware model**: absent columns stay `None` in [`Vendor`] and only
//!   become `""` when serialized
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use foodtruck::{SearchService, SqliteDatabase};
//!
//! let db = SqliteDatabase::open("./data/food-trucks.db", 5).await?;
//! let service = SearchService::new(Arc::new(db));
//!
//! // Expanding search around Mission & 10th
//! let vendors = service.find_near(37.7758, -122.4205, 0).await?;
//!
//! // Everything within ~1km
//! let vendors = service.find_near(37.7758, -122.4205, 1000).await?;
//! ```
//!
//! ## Accuracy
//!
//! The bounding box uses 0.000009°/m of latitude and 0.000014°/m of longitude,
//! which is only reasonable near the mid-latitudes. Results are a rectangle,
//! not a circle, and are not sorted by distance.

pub mod bounds;
pub mod database;
pub mod error;
pub mod search;
pub mod vendor;

#[cfg(feature = "geojson")]
pub mod geojson;

// Re-export main types at crate root for convenience
pub use bounds::{compute_bounds, BoundingBox};
pub use database::{Database, MemoryDatabase, SqliteDatabase};
pub use error::{ConfigError, DatabaseError, DomainError, ErrorCode, Result};
pub use search::{SearchConfig, SearchService, SearchServiceBuilder};
pub use vendor::{Vendor, VendorRow};
