//! Warehouse trait - black-box table capability

use serde_json::Value;

use crate::{ContractError, TableSchema};

/// Warehouse client
///
/// Abstracts table creation and row insertion for the real REST client and
/// mock testing.
#[trait_variant::make(Warehouse: Send)]
pub trait LocalWarehouse {
    /// Create a table in the configured dataset
    ///
    /// # Errors
    /// Returns `ContractError::TableAlreadyExists` when the table exists,
    /// any other variant for real failures
    async fn create_table(&self, table: &str, schema: &TableSchema) -> Result<(), ContractError>;

    /// Append rows to a table
    async fn insert_rows(&self, table: &str, rows: &[Value]) -> Result<(), ContractError>;
}
