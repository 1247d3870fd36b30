use anyhow::{anyhow, Result};
use foodtruck::geojson::vendors_to_feature_collection;
use std::path::Path;

use crate::{Format, SearchArgs};

pub async fn run(
    database: &Path,
    args: &SearchArgs,
    lat: f64,
    long: f64,
    radius: i64,
    format: Format,
) -> Result<()> {
    let service = super::build_service(database, args).await?;

    let vendors = service
        .find_near(lat, long, radius)
        .await
        .map_err(|e| anyhow!("{} ({})", e, e.code))?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&vendors)?),
        Format::Geojson => {
            let collection = vendors_to_feature_collection(&vendors);
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
        Format::Text if vendors.is_empty() => println!("No trucks found"),
        Format::Text => {
            for vendor in &vendors {
                println!(
                    "{:<40} {:>10.6} {:>11.6}  {}",
                    vendor.name.as_deref().unwrap_or(""),
                    vendor.lat,
                    vendor.long,
                    vendor.address.as_deref().unwrap_or("")
                );
            }
            println!("{} truck(s)", vendors.len());
        }
    }

    Ok(())
}
