//! Data sources for vendor rows.
//!
//! [`Database`] is the only capability the search core needs: given a bounding
//! box, return the matching raw rows. [`SqliteDatabase`] reads the permit
//! database; [`MemoryDatabase`] applies the same filter to rows held in memory.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::bounds::BoundingBox;
use crate::error::{DatabaseError, Result};
use crate::vendor::VendorRow;

/// Default number of pooled SQLite connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Select vendors strictly inside a bounding box.
///
/// The select list order is fixed (`id, name, lat, long, address,
/// description`) and must match [`VendorRow`]'s `FromRow` impl. Rows with a
/// latitude of exactly zero have no recorded location and are skipped.
const FIND_IN_BOUNDS_SQL: &str = "
    SELECT
        CAST(locationId AS TEXT),
        CAST(value AS TEXT),
        CAST(Latitude AS REAL),
        CAST(Longitude AS REAL),
        CAST(Address AS TEXT),
        CAST(FoodItems AS TEXT)
    FROM Mobile_Food_Facility_Permit
    INNER JOIN Applicant ON Applicant.id = Mobile_Food_Facility_Permit.Applicant
    WHERE Latitude != 0
        AND Latitude > ? AND Latitude < ?
        AND Longitude > ? AND Longitude < ?
";

/// A read-only source of vendor rows.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait Database: Send + Sync {
    /// Return every row whose location lies strictly inside `bounds`,
    /// excluding rows with a latitude of exactly zero.
    async fn query_vendors(&self, bounds: &BoundingBox) -> Result<Vec<VendorRow>>;
}

/// The permit database, backed by a pool of read-only SQLite connections.
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open an existing SQLite database file.
    ///
    /// The file is opened read-only and is never created; a missing path is
    /// an error rather than an empty database.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Connect`] if the file does not exist or is not
    /// a readable SQLite database.
    pub async fn open<P: AsRef<Path>>(path: P, max_connections: u32) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|source| DatabaseError::Connect {
                path: path.display().to_string(),
                source,
            })?;

        tracing::debug!(path = %path.display(), max_connections, "Opened database");

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn query_vendors(&self, bounds: &BoundingBox) -> Result<Vec<VendorRow>> {
        let rows = sqlx::query_as::<_, VendorRow>(FIND_IN_BOUNDS_SQL)
            .bind(bounds.min_lat)
            .bind(bounds.max_lat)
            .bind(bounds.min_lon)
            .bind(bounds.max_lon)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

/// Vendor rows held in memory, filtered with the same rules as the SQL query.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    rows: Vec<VendorRow>,
}

impl MemoryDatabase {
    /// Create a data source over the given rows.
    pub fn new(rows: Vec<VendorRow>) -> Self {
        Self { rows }
    }

    /// Number of rows held, including ones no query can match.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are held.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    async fn query_vendors(&self, bounds: &BoundingBox) -> Result<Vec<VendorRow>> {
        let rows = self
            .rows
            .iter()
            .filter(|row| match (row.lat, row.long) {
                (Some(lat), Some(lon)) => lat != 0.0 && bounds.contains(lat, lon),
                _ => false,
            })
            .cloned()
            .collect();

        Ok(rows)
    }
}
