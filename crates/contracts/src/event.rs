//! StorageEvent - object notification delivered to the trigger path

use serde::{Deserialize, Serialize};

use crate::{is_metrics_file, ContractError, ObjectLocator, METRICS_FILE_NAME};

/// Object-finalized notification
///
/// Only `bucket` and `name` are read; other notification fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEvent {
    pub bucket: String,
    pub name: String,
}

impl StorageEvent {
    /// Apply the admission rule.
    ///
    /// # Errors
    /// Returns `ContractError::UnexpectedFile` if the object is not a metrics file
    pub fn admit(&self) -> Result<ObjectLocator, ContractError> {
        if !is_metrics_file(&self.name) {
            return Err(ContractError::UnexpectedFile {
                name: self.name.clone(),
                expected: METRICS_FILE_NAME,
            });
        }
        Ok(ObjectLocator::new(&self.bucket, &self.name))
    }
}
