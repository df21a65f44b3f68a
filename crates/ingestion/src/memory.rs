//! MemoryObjectSource - in-memory objects for tests and replays

use std::collections::HashMap;

use bytes::Bytes;
use contracts::{ContractError, ObjectLocator, ObjectSource};

/// Object source serving preloaded bytes
#[derive(Debug, Default, Clone)]
pub struct MemoryObjectSource {
    objects: HashMap<ObjectLocator, Bytes>,
}

impl MemoryObjectSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object (builder style)
    pub fn with_object(mut self, locator: ObjectLocator, data: impl Into<Bytes>) -> Self {
        self.insert(locator, data);
        self
    }

    /// Add or replace an object
    pub fn insert(&mut self, locator: ObjectLocator, data: impl Into<Bytes>) {
        self.objects.insert(locator, data.into());
    }
}

impl ObjectSource for MemoryObjectSource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, locator: &ObjectLocator) -> Result<Bytes, ContractError> {
        self.objects.get(locator).cloned().ok_or_else(|| {
            ContractError::object_read(&locator.bucket, &locator.object, "object not found")
        })
    }
}
