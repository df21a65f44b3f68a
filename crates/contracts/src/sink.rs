//! CategorySink trait - Dispatcher output interface
//!
//! Defines the abstract interface for sink strategies.

use serde_json::Value;

use crate::{ContractError, TableSchema};

/// Per-category output trait
///
/// The dispatcher drives every sink strategy through this trait, one
/// category at a time, in dispatch order.
#[trait_variant::make(CategorySink: Send)]
pub trait LocalCategorySink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Make sure the destination exists before writing.
    ///
    /// An already-existing destination is success.
    ///
    /// # Errors
    /// Returns creation error (should include the destination name)
    async fn ensure_destination(
        &mut self,
        destination: &str,
        schema: &TableSchema,
    ) -> Result<(), ContractError>;

    /// Write every row of one category to its destination
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, destination: &str, rows: &[Value]) -> Result<(), ContractError>;
}
