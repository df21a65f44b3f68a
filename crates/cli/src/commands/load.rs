//! `load` command implementation.

use anyhow::{Context, Result};
use contracts::ObjectLocator;
use tracing::info;
use warehouse::BigQueryClient;

use super::settings;
use crate::cli::LoadArgs;
use crate::pipeline::{run_export, run_load as load_document};

/// Execute the `load` command
pub async fn run_load(args: &LoadArgs) -> Result<()> {
    let locator: ObjectLocator = args
        .gcs_path
        .parse()
        .with_context(|| format!("Invalid --gcs-path '{}'", args.gcs_path))?;

    let mut config = settings::base_config(&args.source)?;
    settings::apply_warehouse(
        &mut config,
        args.google_project_id.as_deref(),
        args.bigquery_dataset.as_deref(),
    );
    settings::apply_export(&mut config, args.export.as_deref());
    settings::validate(&config)?;

    let source = settings::object_source(&config, &args.source)?;

    let summary = match &config.export {
        Some(export) => {
            info!(locator = %locator, dir = %export.dir.display(), "Exporting metrics document");
            run_export(&source, &locator, &export.dir).await?
        }
        None => {
            info!(
                locator = %locator,
                project = %config.warehouse.project_id,
                dataset = %config.warehouse.dataset_id,
                "Loading metrics document"
            );
            let token = settings::access_token(&args.source, &config.warehouse.access_token_env);
            let warehouse = BigQueryClient::new(&config.warehouse, token)
                .context("Failed to create BigQuery client")?;
            load_document(&source, &warehouse, &locator).await?
        }
    };

    info!(
        rows = summary.stats.total_rows(),
        categories = summary.stats.written().len(),
        duration_secs = summary.duration.as_secs_f64(),
        "Load completed successfully"
    );
    summary.print_summary();
    Ok(())
}
