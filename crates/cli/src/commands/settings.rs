//! Configuration resolution shared by the commands.
//!
//! Precedence: CLI flags and env vars, then the config file, then defaults.

use anyhow::{Context, Result};
use contracts::{ExportConfig, LoaderConfig};
use ingestion::ConfiguredSource;
use tracing::{debug, info};

use crate::cli::SourceArgs;

/// Load the config file if one was given, otherwise start from defaults
pub fn base_config(args: &SourceArgs) -> Result<LoaderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!(config = %path.display(), "Loading configuration");
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => {
            debug!("No configuration file, using defaults");
            LoaderConfig::default()
        }
    };

    if let Some(root) = &args.source_root {
        config.storage.local_root = Some(root.clone());
    }
    Ok(config)
}

/// Apply warehouse overrides; `None` keeps the file value
pub fn apply_warehouse(
    config: &mut LoaderConfig,
    project_id: Option<&str>,
    dataset_id: Option<&str>,
) {
    if let Some(project_id) = project_id {
        config.warehouse.project_id = project_id.to_string();
    }
    if let Some(dataset_id) = dataset_id {
        config.warehouse.dataset_id = dataset_id.to_string();
    }
}

/// Select the file-export sink
pub fn apply_export(config: &mut LoaderConfig, dir: Option<&std::path::Path>) {
    if let Some(dir) = dir {
        config.export = Some(ExportConfig {
            dir: dir.to_path_buf(),
        });
    }
}

/// Validate the final configuration
pub fn validate(config: &LoaderConfig) -> Result<()> {
    config_loader::ConfigLoader::validate(config).context("Invalid configuration")
}

/// Access token from the flag, else from the configured env var
pub fn access_token(args: &SourceArgs, env_var: &str) -> Option<String> {
    args.access_token
        .clone()
        .or_else(|| std::env::var(env_var).ok())
        .filter(|token| !token.is_empty())
}

/// Object source described by the configuration
pub fn object_source(config: &LoaderConfig, args: &SourceArgs) -> Result<ConfiguredSource> {
    let token = access_token(args, &config.storage.access_token_env);
    ConfiguredSource::from_config(&config.storage, token).context("Failed to create object source")
}
