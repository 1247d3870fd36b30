//! Radius-to-bounding-box approximation.
//!
//! A search radius in meters is turned into a latitude/longitude rectangle
//! using two fixed scale factors. The factors are only accurate around the
//! mid-latitudes (they were tuned for San Francisco); this is a cheap proxy for
//! a circular search, not real geodesy.
//!
//! # Example
//!
//! ```
//! use foodtruck::bounds::compute_bounds;
//!
//! let bounds = compute_bounds(37.7758, -122.4205, 1000);
//! assert!((bounds.max_lat - 37.7848).abs() < 1e-9);
//! assert!((bounds.min_lon - (-122.4345)).abs() < 1e-9);
//! ```

/// Degrees of latitude spanned by one meter.
pub const DEGREES_LAT_PER_METER: f64 = 0.000009;

/// Degrees of longitude spanned by one meter (mid-latitude approximation).
pub const DEGREES_LON_PER_METER: f64 = 0.000014;

/// A geographic bounding box.
///
/// Coordinates are in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum latitude (southern boundary).
    pub min_lat: f64,
    /// Maximum latitude (northern boundary).
    pub max_lat: f64,
    /// Minimum longitude (western boundary).
    pub min_lon: f64,
    /// Maximum longitude (eastern boundary).
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    ///
    /// # Arguments
    ///
    /// * `min_lat` - Southern boundary latitude
    /// * `max_lat` - Northern boundary latitude
    /// * `min_lon` - Western boundary longitude
    /// * `max_lon` - Eastern boundary longitude
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Check whether a point lies strictly inside this box.
    ///
    /// Edges are exclusive, the same as the SQL predicate used against the
    /// permit table.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat > self.min_lat && lat < self.max_lat && lon > self.min_lon && lon < self.max_lon
    }
}

/// Compute the bounding box around a center point for a radius in meters.
///
/// The radius sign is not checked; callers validate it. A radius of zero
/// yields a degenerate box that contains nothing.
pub fn compute_bounds(lat: f64, lon: f64, radius_meters: i64) -> BoundingBox {
    let radius = radius_meters as f64;
    let lat_delta = DEGREES_LAT_PER_METER * radius;
    let lon_delta = DEGREES_LON_PER_METER * radius;

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}
