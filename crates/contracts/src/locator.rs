//! ObjectLocator - bucket/object address of an input document

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ContractError;

const GCS_SCHEME: &str = "gs://";

/// Address of a single object in a storage bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocator {
    pub bucket: String,
    pub object: String,
}

impl ObjectLocator {
    pub fn new(bucket: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            object: object.into(),
        }
    }

    /// Final path segment of the object name
    pub fn file_name(&self) -> &str {
        self.object.rsplit('/').next().unwrap_or(&self.object)
    }
}

impl FromStr for ObjectLocator {
    type Err = ContractError;

    /// Parse `gs://bucket/path/to/object`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix(GCS_SCHEME).ok_or_else(|| {
            let scheme = s.split_once("://").map_or("", |(scheme, _)| scheme);
            ContractError::invalid_locator(s, format!("path must use gs:// scheme, got {scheme}://"))
        })?;

        let (bucket, object) = rest.split_once('/').unwrap_or((rest, ""));
        if bucket.is_empty() {
            return Err(ContractError::invalid_locator(s, "bucket name is required"));
        }
        let object = object.trim_start_matches('/');
        if object.is_empty() {
            return Err(ContractError::invalid_locator(s, "object path is required"));
        }

        Ok(Self::new(bucket, object))
    }
}

impl fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{GCS_SCHEME}{}/{}", self.bucket, self.object)
    }
}
