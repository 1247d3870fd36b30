use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

/// Food truck search CLI tool
#[derive(Parser)]
#[command(name = "trucks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQLite database of food truck permits
    #[arg(
        short,
        long,
        env = "DATABASE_PATH",
        default_value = "./data/food-trucks.db",
        global = true
    )]
    database: PathBuf,

    #[command(flatten)]
    search: SearchArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Expanding search tuning shared by all search commands.
#[derive(clap::Args, Debug, Clone)]
pub struct SearchArgs {
    /// Initial radius for expanding searches, in meters
    #[arg(long, env = "TRUCKS_START_RADIUS", default_value = "400", global = true)]
    pub start_radius: i64,

    /// Stop expanding once this many trucks are found
    #[arg(long, env = "TRUCKS_MIN_RESULTS", default_value = "5", global = true)]
    pub min_results: usize,

    /// Maximum queries per expanding search
    #[arg(long, env = "TRUCKS_MAX_ITERATIONS", default_value = "10", global = true)]
    pub max_iterations: u32,

    /// Drop trucks already found by a smaller radius
    #[arg(long, global = true)]
    pub dedupe: bool,
}

/// Output format for search results.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per truck
    Text,
    /// JSON array, as returned by the HTTP API
    Json,
    /// GeoJSON FeatureCollection
    Geojson,
}

#[derive(Subcommand)]
enum Commands {
    /// Find trucks near a single coordinate
    Near {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        long: f64,

        /// Radius in meters (0 widens the search until enough trucks are found)
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        radius: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Show the bounding box searched for a coordinate and radius
    Bounds {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        long: f64,

        /// Radius in meters
        #[arg(short, long)]
        radius: i64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Run a search for every coordinate in a CSV file
    Batch {
        /// Input CSV file
        input: PathBuf,

        /// Output file (defaults to <input>_trucks.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column name for latitude
        #[arg(long, default_value = "lat")]
        lat_col: String,

        /// Column name for longitude
        #[arg(long, default_value = "long")]
        long_col: String,

        /// Radius in meters (0 widens the search until enough trucks are found)
        #[arg(short, long, default_value = "0")]
        radius: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Near {
            lat,
            long,
            radius,
            format,
        } => commands::near::run(&cli.database, &cli.search, lat, long, radius, format).await,
        Commands::Bounds {
            lat,
            long,
            radius,
            json,
        } => commands::bounds::run(lat, long, radius, json),
        Commands::Batch {
            input,
            output,
            lat_col,
            long_col,
            radius,
        } => {
            commands::batch::run(
                &cli.database,
                &cli.search,
                input,
                output,
                lat_col,
                long_col,
                radius,
            )
            .await
        }
    }
}
