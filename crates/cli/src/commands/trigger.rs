//! `trigger` command implementation.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use contracts::{LoaderConfig, ObjectLocator, StorageEvent};
use tracing::info;
use warehouse::BigQueryClient;

use super::settings;
use crate::cli::{TriggerArgs, DEFAULT_DATASET_ID, DEFAULT_PROJECT_ID};
use crate::pipeline::run_load;

/// Execute the `trigger` command
///
/// Errors are returned so the caller exits non-zero and the event host can
/// redeliver.
pub async fn run_trigger(args: &TriggerArgs) -> Result<()> {
    let (locator, config) = prepare(args)?;

    let source = settings::object_source(&config, &args.source)?;
    let token = settings::access_token(&args.source, &config.warehouse.access_token_env);
    let warehouse = BigQueryClient::new(&config.warehouse, token)
        .context("Failed to create BigQuery client")?;

    let summary = run_load(&source, &warehouse, &locator).await?;
    info!(
        locator = %summary.locator,
        rows = summary.stats.total_rows(),
        "Event processed"
    );
    Ok(())
}

/// Read and admit the event, then resolve the warehouse configuration.
///
/// A rejected event fails before any configuration is read.
fn prepare(args: &TriggerArgs) -> Result<(ObjectLocator, LoaderConfig)> {
    let event = read_event(&args.event)?;
    info!(bucket = %event.bucket, name = %event.name, "Storage event received");
    let locator = ingestion::admit_event(&event).context("Event rejected")?;

    let mut config = settings::base_config(&args.source)?;
    if config.warehouse.project_id.is_empty() {
        config.warehouse.project_id = DEFAULT_PROJECT_ID.to_string();
    }
    if config.warehouse.dataset_id.is_empty() {
        config.warehouse.dataset_id = DEFAULT_DATASET_ID.to_string();
    }
    settings::apply_warehouse(
        &mut config,
        args.google_project_id.as_deref(),
        args.bigquery_dataset.as_deref(),
    );
    // The trigger path always loads the warehouse
    config.export = None;
    settings::validate(&config)?;

    Ok((locator, config))
}

/// Read a storage event from a file, or stdin for `-`
fn read_event(path: &Path) -> Result<StorageEvent> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event from {}", path.display()))?
    };
    parse_event(&content)
}

fn parse_event(content: &str) -> Result<StorageEvent> {
    serde_json::from_str(content).context("Failed to parse storage event")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SourceArgs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_finalize_event() {
        let event = parse_event(
            r#"{
                "kind": "storage#object",
                "bucket": "origin-ci-test",
                "name": "logs/e2e/7/artifacts/ci-operator-metrics.json",
                "contentType": "application/json"
            }"#,
        )
        .unwrap();
        assert_eq!(event.bucket, "origin-ci-test");
        assert!(event.name.ends_with("ci-operator-metrics.json"));
    }

    #[test]
    fn test_parse_event_requires_name() {
        assert!(parse_event(r#"{"bucket": "b"}"#).is_err());
    }

    fn trigger_args(event: &Path, config: Option<&Path>) -> TriggerArgs {
        TriggerArgs {
            event: event.to_path_buf(),
            google_project_id: None,
            bigquery_dataset: None,
            source: SourceArgs {
                config: config.map(Path::to_path_buf),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_rejected_event_fails_before_config() {
        let dir = tempdir().unwrap();
        let event = dir.path().join("event.json");
        std::fs::write(&event, r#"{"bucket": "b", "name": "logs/1/build-log.txt"}"#).unwrap();
        let missing = dir.path().join("missing.toml");

        let err = prepare(&trigger_args(&event, Some(&missing))).unwrap_err();

        let chain = format!("{err:#}");
        assert!(chain.contains("unexpected file"));
        assert!(!chain.contains("Configuration file not found"));
    }

    #[test]
    fn test_admitted_event_uses_default_warehouse() {
        let dir = tempdir().unwrap();
        let event = dir.path().join("event.json");
        std::fs::write(
            &event,
            r#"{"bucket": "origin-ci-test", "name": "logs/1/ci-operator-metrics.json"}"#,
        )
        .unwrap();

        let mut args = trigger_args(&event, None);
        args.bigquery_dataset = Some("scratch".into());
        let (locator, config) = prepare(&args).unwrap();

        assert_eq!(
            locator,
            ObjectLocator::new("origin-ci-test", "logs/1/ci-operator-metrics.json")
        );
        assert_eq!(config.warehouse.project_id, DEFAULT_PROJECT_ID);
        assert_eq!(config.warehouse.dataset_id, "scratch");
        assert!(config.export.is_none());
    }

    #[test]
    fn test_read_event_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, r#"{"bucket": "b", "name": "o"}"#).unwrap();
        let event = read_event(&path).unwrap();
        assert_eq!(event.name, "o");
    }
}
