//! Dispatcher error types

use std::path::PathBuf;

use contracts::{Category, ContractError};
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Destination could not be prepared
    #[error("failed to prepare destination for {category}: {source}")]
    Destination {
        category: Category,
        #[source]
        source: ContractError,
    },

    /// Rows could not be written
    #[error("failed to write {category}: {source}")]
    Write {
        category: Category,
        #[source]
        source: ContractError,
    },

    /// Records could not be converted to rows
    #[error("failed to serialize {category}: {source}")]
    Serialize {
        category: Category,
        #[source]
        source: serde_json::Error,
    },

    /// Export directory could not be created
    #[error("failed to create export directory '{}': {source}", path.display())]
    ExportDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DispatcherError {
    /// Category the failure belongs to, if any
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Destination { category, .. }
            | Self::Write { category, .. }
            | Self::Serialize { category, .. } => Some(*category),
            Self::ExportDirectory { .. } => None,
        }
    }
}
