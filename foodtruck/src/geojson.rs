//! GeoJSON export of search results.
//!
//! Enable the `geojson` feature to use this module.
//!
//! # Example
//!
//! ```ignore
//! use foodtruck::geojson::vendors_to_feature_collection;
//!
//! let vendors = service.find_near(37.7758, -122.4205, 0).await?;
//! let collection = vendors_to_feature_collection(&vendors);
//! println!("{}", serde_json::to_string(&collection)?);
//! ```

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::vendor::Vendor;

/// Convert one vendor into a GeoJSON `Point` feature.
///
/// Coordinates are written in GeoJSON order, `[long, lat]`. The vendor id
/// becomes the feature id when present; `name`, `description` and `address`
/// are copied into the properties, as empty strings when absent.
pub fn vendor_to_feature(vendor: &Vendor) -> Feature {
    let mut properties = JsonObject::new();
    for (key, value) in [
        ("id", &vendor.id),
        ("name", &vendor.name),
        ("description", &vendor.description),
        ("address", &vendor.address),
    ] {
        properties.insert(
            key.to_string(),
            JsonValue::String(value.clone().unwrap_or_default()),
        );
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![vendor.long, vendor.lat]))),
        id: vendor.id.clone().map(Id::String),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Convert a list of vendors into a `FeatureCollection`, preserving order.
pub fn vendors_to_feature_collection(vendors: &[Vendor]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: vendors.iter().map(vendor_to_feature).collect(),
        foreign_members: None,
    }
}
