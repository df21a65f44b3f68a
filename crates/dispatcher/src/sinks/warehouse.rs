//! WarehouseSink - one table per category

use contracts::{CategorySink, ContractError, TableSchema, Warehouse};
use serde_json::Value;
use tracing::{debug, error, instrument};

/// Sink that creates a table per category and appends rows to it
pub struct WarehouseSink<'a, W> {
    name: String,
    warehouse: &'a W,
}

impl<'a, W> WarehouseSink<'a, W> {
    pub fn new(warehouse: &'a W) -> Self {
        Self {
            name: "warehouse".to_string(),
            warehouse,
        }
    }
}

impl<W: Warehouse + Sync> CategorySink for WarehouseSink<'_, W> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "warehouse_sink_ensure", skip(self, schema), fields(sink = %self.name))]
    async fn ensure_destination(
        &mut self,
        destination: &str,
        schema: &TableSchema,
    ) -> Result<(), ContractError> {
        match self.warehouse.create_table(destination, schema).await {
            Ok(()) => {
                debug!("Table created");
                Ok(())
            }
            Err(e) if e.is_already_exists() => {
                debug!("Table already exists");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Table creation failed");
                Err(e)
            }
        }
    }

    #[instrument(
        name = "warehouse_sink_write",
        skip(self, rows),
        fields(sink = %self.name, rows = rows.len())
    )]
    async fn write(&mut self, destination: &str, rows: &[Value]) -> Result<(), ContractError> {
        self.warehouse.insert_rows(destination, rows).await
    }
}
