//! Source selection from configuration

use bytes::Bytes;
use contracts::{ContractError, ObjectLocator, ObjectSource, StorageConfig};
use tracing::info;

use crate::{FsObjectSource, GcsObjectSource};

/// Object source chosen by `StorageConfig`
///
/// A configured `local_root` selects the filesystem mirror, otherwise GCS.
pub enum ConfiguredSource {
    Gcs(GcsObjectSource),
    Fs(FsObjectSource),
}

impl ConfiguredSource {
    /// Build the source described by the configuration
    pub fn from_config(
        config: &StorageConfig,
        access_token: Option<String>,
    ) -> Result<Self, ContractError> {
        match &config.local_root {
            Some(root) => {
                info!(root = %root.display(), "Reading objects from local mirror");
                Ok(Self::Fs(FsObjectSource::new(root)))
            }
            None => {
                info!(endpoint = %config.endpoint, "Reading objects from GCS");
                Ok(Self::Gcs(GcsObjectSource::new(config, access_token)?))
            }
        }
    }
}

impl ObjectSource for ConfiguredSource {
    fn name(&self) -> &str {
        match self {
            Self::Gcs(source) => source.name(),
            Self::Fs(source) => source.name(),
        }
    }

    async fn fetch(&self, locator: &ObjectLocator) -> Result<Bytes, ContractError> {
        match self {
            Self::Gcs(source) => source.fetch(locator).await,
            Self::Fs(source) => source.fetch(locator).await,
        }
    }
}
