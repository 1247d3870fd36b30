use anyhow::{bail, Result};
use foodtruck::compute_bounds;
use serde::Serialize;

#[derive(Serialize)]
struct BoundsResponse {
    lat: f64,
    long: f64,
    radius: i64,
    min_lat: f64,
    max_lat: f64,
    min_long: f64,
    max_long: f64,
}

pub fn run(lat: f64, long: f64, radius: i64, json: bool) -> Result<()> {
    if radius < 0 {
        bail!("radius must be greater than 0");
    }

    let bounds = compute_bounds(lat, long, radius);

    if json {
        let response = BoundsResponse {
            lat,
            long,
            radius,
            min_lat: bounds.min_lat,
            max_lat: bounds.max_lat,
            min_long: bounds.min_lon,
            max_long: bounds.max_lon,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("Latitude:  {:.6} .. {:.6}", bounds.min_lat, bounds.max_lat);
        println!("Longitude: {:.6} .. {:.6}", bounds.min_lon, bounds.max_lon);
    }

    Ok(())
}
