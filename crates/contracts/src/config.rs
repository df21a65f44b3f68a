//! LoaderConfig - Config Loader output
//!
//! Describes where documents are read from and where categories are written.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete loader configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Warehouse destination
    #[serde(default)]
    pub warehouse: WarehouseConfig,

    /// Object storage source
    #[serde(default)]
    pub storage: StorageConfig,

    /// File export; when set, replaces the warehouse sink
    #[serde(default)]
    pub export: Option<ExportConfig>,
}

/// Warehouse (BigQuery) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseConfig {
    /// Project ID
    #[serde(default)]
    pub project_id: String,

    /// Dataset ID (destination group)
    #[serde(default)]
    pub dataset_id: String,

    /// REST endpoint base
    #[serde(default = "default_warehouse_endpoint")]
    pub endpoint: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the OAuth access token
    #[serde(default = "default_token_env")]
    pub access_token_env: String,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset_id: String::new(),
            endpoint: default_warehouse_endpoint(),
            timeout_secs: default_timeout_secs(),
            access_token_env: default_token_env(),
        }
    }
}

/// Object storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// REST endpoint base
    #[serde(default = "default_storage_endpoint")]
    pub endpoint: String,

    /// Read `{local_root}/{bucket}/{object}` instead of calling the endpoint
    #[serde(default)]
    pub local_root: Option<PathBuf>,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the OAuth access token
    #[serde(default = "default_token_env")]
    pub access_token_env: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_storage_endpoint(),
            local_root: None,
            timeout_secs: default_timeout_secs(),
            access_token_env: default_token_env(),
        }
    }
}

/// File export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target directory, created if missing
    pub dir: PathBuf,
}

fn default_warehouse_endpoint() -> String {
    "https://bigquery.googleapis.com/bigquery/v2".to_string()
}

fn default_storage_endpoint() -> String {
    "https://storage.googleapis.com/storage/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_token_env() -> String {
    "GOOGLE_OAUTH_ACCESS_TOKEN".to_string()
}
