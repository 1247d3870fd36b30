pub mod batch;
pub mod bounds;
pub mod near;

use anyhow::{Context, Result};
use foodtruck::{SearchConfig, SearchService, SqliteDatabase};
use std::path::Path;
use std::sync::Arc;

use crate::SearchArgs;

impl SearchArgs {
    fn config(&self) -> SearchConfig {
        SearchConfig {
            start_radius: self.start_radius,
            min_results: self.min_results,
            max_iterations: self.max_iterations,
            deduplicate: self.dedupe,
        }
    }
}

/// Open the database and build a search service from the CLI settings.
async fn build_service(database: &Path, args: &SearchArgs) -> Result<SearchService> {
    let db = SqliteDatabase::open(database, 1)
        .await
        .with_context(|| format!("Failed to open database: {}", database.display()))?;

    SearchService::builder(Arc::new(db))
        .config(args.config())
        .build()
        .context("Invalid search settings")
}
