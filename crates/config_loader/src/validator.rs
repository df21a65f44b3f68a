//! Configuration validation
//!
//! Rules:
//! - project_id / dataset_id present unless exporting to files
//! - export dir non-empty
//! - endpoints are http(s) URLs
//! - timeouts > 0

use contracts::{ContractError, LoaderConfig};

/// Validate a LoaderConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &LoaderConfig) -> Result<(), ContractError> {
    validate_destination(config)?;
    validate_endpoints(config)?;
    validate_timeouts(config)?;
    Ok(())
}

/// Warehouse identifiers are only needed when the warehouse sink is selected
fn validate_destination(config: &LoaderConfig) -> Result<(), ContractError> {
    if let Some(export) = &config.export {
        if export.dir.as_os_str().is_empty() {
            return Err(ContractError::config_validation(
                "export.dir",
                "export directory cannot be empty",
            ));
        }
        return Ok(());
    }

    if config.warehouse.project_id.trim().is_empty() {
        return Err(ContractError::config_validation(
            "warehouse.project_id",
            "project id is required",
        ));
    }
    if config.warehouse.dataset_id.trim().is_empty() {
        return Err(ContractError::config_validation(
            "warehouse.dataset_id",
            "dataset id is required",
        ));
    }
    Ok(())
}

fn validate_endpoints(config: &LoaderConfig) -> Result<(), ContractError> {
    let endpoints = [
        ("warehouse.endpoint", &config.warehouse.endpoint),
        ("storage.endpoint", &config.storage.endpoint),
    ];
    for (field, endpoint) in endpoints {
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ContractError::config_validation(
                field,
                format!("endpoint must be an http(s) URL, got '{endpoint}'"),
            ));
        }
    }
    Ok(())
}

fn validate_timeouts(config: &LoaderConfig) -> Result<(), ContractError> {
    if config.warehouse.timeout_secs == 0 {
        return Err(ContractError::config_validation(
            "warehouse.timeout_secs",
            "timeout_secs must be > 0",
        ));
    }
    if config.storage.timeout_secs == 0 {
        return Err(ContractError::config_validation(
            "storage.timeout_secs",
            "timeout_secs must be > 0",
        ));
    }
    Ok(())
}
