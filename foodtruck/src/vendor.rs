//! Vendor records: the raw database row and the domain type served to clients.

use serde::{Serialize, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A raw row from the permit table.
///
/// Every column is nullable. Columns are read by position, in this order:
/// `id, name, lat, long, address, description`. The SQL select list in
/// [`SqliteDatabase`](crate::SqliteDatabase) must match it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub address: Option<String>,
    pub description: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for VendorRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get(0)?,
            name: row.try_get(1)?,
            lat: row.try_get(2)?,
            long: row.try_get(3)?,
            address: row.try_get(4)?,
            description: row.try_get(5)?,
        })
    }
}

/// A food vendor location returned by a search.
///
/// String fields keep their absence as `None` so the model stays null-aware;
/// they serialize as `""` so clients never see `null` or a missing key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Vendor {
    /// Permit location identifier.
    #[serde(serialize_with = "empty_if_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub id: Option<String>,
    /// Applicant (business) name.
    #[serde(serialize_with = "empty_if_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub name: Option<String>,
    /// Food items on offer.
    #[serde(serialize_with = "empty_if_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub description: Option<String>,
    /// Latitude in decimal degrees, `0.0` when unknown.
    pub lat: f64,
    /// Longitude in decimal degrees, `0.0` when unknown.
    pub long: f64,
    /// Street address.
    #[serde(serialize_with = "empty_if_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub address: Option<String>,
}

impl From<VendorRow> for Vendor {
    fn from(row: VendorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            lat: row.lat.unwrap_or_default(),
            long: row.long.unwrap_or_default(),
            address: row.address,
        }
    }
}

fn empty_if_none<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}
