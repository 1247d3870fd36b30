//! Vendor search with fixed and expanding radius modes.
//!
//! This module provides [`SearchService`], which turns a center point and an
//! optional radius into one or more bounding-box queries against a
//! [`Database`].
//!
//! # Modes
//!
//! - **Fixed radius** (`radius > 0`): a single query over the box for that
//!   radius.
//! - **Expanding** (`radius == 0`): start at [`SearchConfig::start_radius`]
//!   and double the radius after each query until at least
//!   [`SearchConfig::min_results`] vendors have been collected, or
//!   [`SearchConfig::max_iterations`] queries have run.
//!
//! Each expanding step queries the whole larger box, so vendors found by an
//! earlier step are returned again. Results are not deduplicated unless
//! [`SearchConfig::deduplicate`] is set.
//!
//! ```ignore
//! use std::sync::Arc;
//! use foodtruck::{SearchService, SqliteDatabase};
//!
//! let db = SqliteDatabase::open("./data/food-trucks.db", 5).await?;
//! let service = SearchService::builder(Arc::new(db))
//!     .max_iterations(8)
//!     .build()?;
//!
//! let vendors = service.find_near(37.7758, -122.4205, 0).await?;
//! ```

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use crate::bounds::compute_bounds;
use crate::database::Database;
use crate::error::{ConfigError, DomainError};
use crate::vendor::Vendor;

/// Initial radius in meters for expanding searches.
pub const DEFAULT_START_RADIUS: i64 = 400;

/// Number of vendors an expanding search tries to collect.
pub const DEFAULT_MIN_RESULTS: usize = 5;

/// Maximum number of queries one expanding search may issue.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Message returned to clients when the data source fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch trucks";

/// Message returned to clients for a negative radius.
pub const NEGATIVE_RADIUS_MESSAGE: &str = "radius must be greater than 0";

/// Tuning for expanding searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// First radius tried, in meters.
    pub start_radius: i64,
    /// Stop expanding once this many vendors have been collected.
    pub min_results: usize,
    /// Upper bound on queries per expanding search.
    pub max_iterations: u32,
    /// Drop vendors already collected by an earlier step (matched by id).
    pub deduplicate: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_radius: DEFAULT_START_RADIUS,
            min_results: DEFAULT_MIN_RESULTS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            deduplicate: false,
        }
    }
}

impl SearchConfig {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `TRUCKS_START_RADIUS` | Initial expanding radius in meters | 400 |
    /// | `TRUCKS_MIN_RESULTS` | Vendors to collect before stopping | 5 |
    /// | `TRUCKS_MAX_ITERATIONS` | Query cap per expanding search | 10 |
    /// | `TRUCKS_DEDUPLICATE` | `true`/`1` to drop repeat vendors | false |
    ///
    /// Unset or unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let deduplicate = std::env::var("TRUCKS_DEDUPLICATE")
            .map(|v| v.eq_ignore_ascii_case("true") || v.trim() == "1")
            .unwrap_or(defaults.deduplicate);

        Self {
            start_radius: env_or("TRUCKS_START_RADIUS", defaults.start_radius),
            min_results: env_or("TRUCKS_MIN_RESULTS", defaults.min_results),
            max_iterations: env_or("TRUCKS_MAX_ITERATIONS", defaults.max_iterations),
            deduplicate,
        }
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] if the start radius, minimum result count
    /// or iteration cap is below one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_radius < 1 {
            return Err(ConfigError::Zero {
                name: "start_radius",
            });
        }
        if self.min_results < 1 {
            return Err(ConfigError::Zero {
                name: "min_results",
            });
        }
        if self.max_iterations < 1 {
            return Err(ConfigError::Zero {
                name: "max_iterations",
            });
        }
        Ok(())
    }

    /// The largest radius an expanding search can reach.
    pub fn max_radius(&self) -> i64 {
        (1..self.max_iterations).fold(self.start_radius, |r, _| r.saturating_mul(2))
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or invalid.
fn env_or<T: FromStr>(var: &'static str, default: T) -> T {
    match std::env::var(var) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var, value = %value, "Ignoring invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Finds vendors near a point.
///
/// Holds no per-request state; a single instance is shared by all requests.
pub struct SearchService {
    db: Arc<dyn Database>,
    config: SearchConfig,
}

impl SearchService {
    /// Create a service with the default [`SearchConfig`].
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self {
            db,
            config: SearchConfig::default(),
        }
    }

    /// Create a builder for more configuration options.
    pub fn builder(db: Arc<dyn Database>) -> SearchServiceBuilder {
        SearchServiceBuilder::new(db)
    }

    /// The active configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find vendors near the given coordinates.
    ///
    /// # Arguments
    ///
    /// * `lat` - Latitude in decimal degrees
    /// * `lon` - Longitude in decimal degrees
    /// * `radius` - Search radius in meters; `0` selects an expanding search
    ///
    /// # Errors
    ///
    /// - [`ErrorCode::Validation`](crate::ErrorCode::Validation) if `radius`
    ///   is negative. No query is issued.
    /// - [`ErrorCode::Other`](crate::ErrorCode::Other) if the data source
    ///   fails. The cause is logged, not returned.
    pub async fn find_near(
        &self,
        lat: f64,
        lon: f64,
        radius: i64,
    ) -> Result<Vec<Vendor>, DomainError> {
        tracing::debug!(lat, lon, radius, "Finding trucks near");

        if radius < 0 {
            return Err(DomainError::validation(NEGATIVE_RADIUS_MESSAGE));
        }

        let vendors = if radius > 0 {
            self.query(lat, lon, radius).await?
        } else {
            self.expanding_search(lat, lon).await?
        };

        tracing::info!(lat, lon, radius, found = vendors.len(), "Found trucks");
        Ok(vendors)
    }

    /// Query growing boxes until enough vendors are collected or the
    /// iteration cap is hit.
    async fn expanding_search(&self, lat: f64, lon: f64) -> Result<Vec<Vendor>, DomainError> {
        let mut vendors = Vec::new();
        let mut seen = HashSet::new();
        let mut radius = self.config.start_radius;

        for iteration in 1..=self.config.max_iterations {
            let found = self.query(lat, lon, radius).await?;
            tracing::debug!(iteration, radius, found = found.len(), "Expanding search step");

            if self.config.deduplicate {
                vendors.extend(found.into_iter().filter(|v| match &v.id {
                    Some(id) => seen.insert(id.clone()),
                    None => true,
                }));
            } else {
                vendors.extend(found);
            }

            if vendors.len() >= self.config.min_results {
                return Ok(vendors);
            }
            radius = radius.saturating_mul(2);
        }

        tracing::info!(
            lat,
            lon,
            iterations = self.config.max_iterations,
            found = vendors.len(),
            "Expanding search hit iteration cap"
        );
        Ok(vendors)
    }

    /// Run one bounding-box query and map the rows.
    async fn query(&self, lat: f64, lon: f64, radius: i64) -> Result<Vec<Vendor>, DomainError> {
        let bounds = compute_bounds(lat, lon, radius);
        tracing::debug!(
            radius,
            min_lat = bounds.min_lat,
            max_lat = bounds.max_lat,
            min_lon = bounds.min_lon,
            max_lon = bounds.max_lon,
            "Querying vendors"
        );

        let rows = self.db.query_vendors(&bounds).await.map_err(|e| {
            tracing::error!(error = %e, lat, lon, radius, "Vendor query failed");
            DomainError::other(FETCH_FAILED_MESSAGE)
        })?;

        Ok(rows.into_iter().map(Vendor::from).collect())
    }
}

/// Builder for creating [`SearchService`] with custom configuration.
///
/// # Example
///
/// ```ignore
/// use foodtruck::{SearchConfig, SearchService};
///
/// let service = SearchService::builder(db)
///     .config(SearchConfig::from_env())
///     .deduplicate(true)
///     .build()?;
/// ```
pub struct SearchServiceBuilder {
    db: Arc<dyn Database>,
    config: SearchConfig,
}

impl SearchServiceBuilder {
    /// Create a new builder with default settings.
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self {
            db,
            config: SearchConfig::default(),
        }
    }

    /// Replace all settings at once.
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial expanding radius in meters.
    ///
    /// Default is 400.
    pub fn start_radius(mut self, meters: i64) -> Self {
        self.config.start_radius = meters;
        self
    }

    /// Set how many vendors an expanding search tries to collect.
    ///
    /// Default is 5.
    pub fn min_results(mut self, count: usize) -> Self {
        self.config.min_results = count;
        self
    }

    /// Set the maximum number of queries per expanding search.
    ///
    /// Default is 10.
    pub fn max_iterations(mut self, iterations: u32) -> Self {
        self.config.max_iterations = iterations;
        self
    }

    /// Drop repeat vendors (by id) across expanding steps.
    ///
    /// Default is false.
    pub fn deduplicate(mut self, enabled: bool) -> Self {
        self.config.deduplicate = enabled;
        self
    }

    /// Build the [`SearchService`].
    ///
    /// # Errors
    ///
    /// Returns an error if any setting fails [`SearchConfig::validate`].
    pub fn build(self) -> Result<SearchService, ConfigError> {
        self.config.validate()?;
        Ok(SearchService {
            db: self.db,
            config: self.config,
        })
    }
}
