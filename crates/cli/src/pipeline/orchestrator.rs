//! Pipeline orchestrator - fetch, decode, dispatch.
//!
//! Generic over the object source and warehouse so the commands run against
//! GCS/BigQuery and the tests against in-memory collaborators.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{ObjectLocator, ObjectSource, Warehouse};
use tracing::{info, instrument};

use super::LoadSummary;

/// Fetch a document and load it into the warehouse
#[instrument(name = "pipeline_run_load", skip(source, warehouse), fields(locator = %locator))]
pub async fn run_load<S, W>(source: &S, warehouse: &W, locator: &ObjectLocator) -> Result<LoadSummary>
where
    S: ObjectSource,
    W: Warehouse + Sync,
{
    let start_time = Instant::now();

    let document = ingestion::fetch_document(source, locator)
        .await
        .with_context(|| format!("Failed to read {locator}"))?;

    let stats = dispatcher::load(warehouse, &document)
        .await
        .with_context(|| format!("Failed to load {locator}"))?;

    info!(rows = stats.total_rows(), "Load finished");
    Ok(LoadSummary::new(locator.clone(), stats, start_time.elapsed()))
}

/// Fetch a document and export it to `<dir>/<destination>.json`
#[instrument(name = "pipeline_run_export", skip(source, dir), fields(locator = %locator, dir = %dir.display()))]
pub async fn run_export<S: ObjectSource>(
    source: &S,
    locator: &ObjectLocator,
    dir: &Path,
) -> Result<LoadSummary> {
    let start_time = Instant::now();

    let document = ingestion::fetch_document(source, locator)
        .await
        .with_context(|| format!("Failed to read {locator}"))?;

    let stats = dispatcher::export(&document, dir)
        .await
        .with_context(|| format!("Failed to export {locator}"))?;

    info!(rows = stats.total_rows(), "Export finished");
    Ok(LoadSummary::new(locator.clone(), stats, start_time.elapsed()))
}
