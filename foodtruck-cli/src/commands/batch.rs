use anyhow::{anyhow, Context, Result};
use foodtruck::SearchService;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::SearchArgs;

pub async fn run(
    database: &Path,
    args: &SearchArgs,
    input: PathBuf,
    output: Option<PathBuf>,
    lat_col: String,
    long_col: String,
    radius: i64,
) -> Result<()> {
    let service = super::build_service(database, args).await?;

    let output_path = output.unwrap_or_else(|| default_output_path(&input));
    let rows = process_csv(&service, &input, &output_path, &lat_col, &long_col, radius).await?;

    println!("{} searches written to: {}", rows, output_path.display());
    Ok(())
}

/// `points.csv` becomes `points_trucks.csv` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    input.with_file_name(format!("{}_trucks.csv", stem))
}

/// Search around every row of `input`, writing the row plus `vendor_count`
/// and `names` columns to `output`. Returns the number of rows processed.
async fn process_csv(
    service: &SearchService,
    input: &Path,
    output: &Path,
    lat_col: &str,
    long_col: &str,
    radius: i64,
) -> Result<u64> {
    let file = File::open(input).context("Failed to open input file")?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    // Find column indices
    let headers = reader.headers()?.clone();
    let lat_idx = headers
        .iter()
        .position(|h| h == lat_col)
        .with_context(|| format!("Column '{}' not found in CSV", lat_col))?;
    let long_idx = headers
        .iter()
        .position(|h| h == long_col)
        .with_context(|| format!("Column '{}' not found in CSV", long_col))?;

    // Collect records for progress bar
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;
    let total = records.len() as u64;

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let output_file = File::create(output).context("Failed to create output file")?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(output_file));

    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.push("vendor_count");
    new_headers.push("names");
    writer.write_record(&new_headers)?;

    for (line, record) in records.iter().enumerate() {
        let lat: f64 = record
            .get(lat_idx)
            .context("Missing latitude")?
            .trim()
            .parse()
            .with_context(|| format!("Invalid latitude on row {}", line + 1))?;
        let long: f64 = record
            .get(long_idx)
            .context("Missing longitude")?
            .trim()
            .parse()
            .with_context(|| format!("Invalid longitude on row {}", line + 1))?;

        let vendors = service
            .find_near(lat, long, radius)
            .await
            .map_err(|e| anyhow!("Search failed on row {}: {}", line + 1, e))?;

        let count = vendors.len().to_string();
        let names = vendors
            .iter()
            .filter_map(|v| v.name.as_deref())
            .collect::<Vec<_>>()
            .join("; ");

        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.push(&count);
        new_record.push(&names);
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodtruck::{MemoryDatabase, VendorRow};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn service() -> SearchService {
        SearchService::new(Arc::new(MemoryDatabase::new(vec![VendorRow {
            id: Some("1".to_string()),
            name: Some("Snacks on Wheels".to_string()),
            lat: Some(37.7760),
            long: Some(-122.4200),
            ..Default::default()
        }])))
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("/data/points.csv"));
        assert_eq!(path, PathBuf::from("/data/points_trucks.csv"));
    }

    #[tokio::test]
    async fn test_process_csv() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("points.csv");
        let output = temp_dir.path().join("out.csv");
        std::fs::write(&input, "label,lat,long\nmission,37.7758,-122.4205\nocean,0.0,1.23\n")
            .unwrap();

        let rows = process_csv(&service(), &input, &output, "lat", "long", 400)
            .await
            .unwrap();
        assert_eq!(rows, 2);

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(lines[0], "label,lat,long,vendor_count,names");
        assert_eq!(lines[1], "mission,37.7758,-122.4205,1,Snacks on Wheels");
        assert_eq!(lines[2], "ocean,0.0,1.23,0,");
    }

    #[tokio::test]
    async fn test_process_csv_missing_column() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("points.csv");
        std::fs::write(&input, "latitude,longitude\n1,2\n").unwrap();

        let result = process_csv(
            &service(),
            &input,
            &temp_dir.path().join("out.csv"),
            "lat",
            "long",
            0,
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_process_csv_negative_radius() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("points.csv");
        std::fs::write(&input, "lat,long\n37.7758,-122.4205\n").unwrap();

        let result = process_csv(
            &service(),
            &input,
            &temp_dir.path().join("out.csv"),
            "lat",
            "long",
            -1,
        )
        .await;
        let err = result.unwrap_err().to_string();
        assert!(err.contains("radius must be greater than 0"));
    }
}
