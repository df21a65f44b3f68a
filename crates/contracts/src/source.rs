//! ObjectSource trait - input acquisition interface

use bytes::Bytes;

use crate::{ContractError, ObjectLocator};

/// Byte-stream supplier for a bucket/object locator
#[trait_variant::make(ObjectSource: Send)]
pub trait LocalObjectSource {
    /// Source name (used for logging)
    fn name(&self) -> &str;

    /// Fetch the full object body
    ///
    /// # Errors
    /// Returns `ContractError::ObjectRead` when the object cannot be read
    async fn fetch(&self, locator: &ObjectLocator) -> Result<Bytes, ContractError>;
}
