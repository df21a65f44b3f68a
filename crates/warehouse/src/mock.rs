//! Mock warehouse
//!
//! In-memory tables for unit tests, with injectable failure scenarios and
//! call recording.

use std::collections::HashMap;
use std::sync::Mutex;

use contracts::{ContractError, TableSchema, Warehouse};
use serde_json::Value;
use tracing::instrument;

/// Mock warehouse configuration
#[derive(Debug, Default, Clone)]
pub struct MockConfig {
    /// Tables that exist before the run (creation returns a conflict)
    pub existing_tables: Vec<String>,
    /// Tables whose creation fails
    pub fail_create: Vec<String>,
    /// Tables whose inserts fail
    pub fail_insert: Vec<String>,
}

/// Recorded warehouse call
#[derive(Debug, Clone, PartialEq)]
pub enum WarehouseCall {
    CreateTable { table: String, schema: TableSchema },
    InsertRows { table: String, rows: usize },
}

/// Mock warehouse client
pub struct MockWarehouse {
    config: MockConfig,
    /// Every call in issue order
    calls: Mutex<Vec<WarehouseCall>>,
    /// table -> inserted rows
    tables: Mutex<HashMap<String, Vec<Value>>>,
}

impl MockWarehouse {
    /// Create a mock with no tables and no failures
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create a mock from configuration
    pub fn with_config(config: MockConfig) -> Self {
        let tables = config
            .existing_tables
            .iter()
            .map(|t| (t.clone(), Vec::new()))
            .collect();
        Self {
            config,
            calls: Mutex::new(Vec::new()),
            tables: Mutex::new(tables),
        }
    }

    /// All recorded calls
    pub fn calls(&self) -> Vec<WarehouseCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Tables passed to `create_table`, in order
    pub fn create_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WarehouseCall::CreateTable { table, .. } => Some(table),
                WarehouseCall::InsertRows { .. } => None,
            })
            .collect()
    }

    /// Tables passed to `insert_rows`, in order
    pub fn insert_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                WarehouseCall::InsertRows { table, .. } => Some(table),
                WarehouseCall::CreateTable { .. } => None,
            })
            .collect()
    }

    /// Rows stored in a table
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether a table exists
    pub fn table_exists(&self, table: &str) -> bool {
        self.tables.lock().unwrap().contains_key(table)
    }

    fn record(&self, call: WarehouseCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockWarehouse {
    fn default() -> Self {
        Self::new()
    }
}

impl Warehouse for MockWarehouse {
    #[instrument(name = "mock_warehouse_create_table", skip(self, schema))]
    async fn create_table(&self, table: &str, schema: &TableSchema) -> Result<(), ContractError> {
        self.record(WarehouseCall::CreateTable {
            table: table.to_string(),
            schema: schema.clone(),
        });

        if self.config.fail_create.iter().any(|t| t == table) {
            return Err(ContractError::table_create(table, "mock failure"));
        }

        let mut tables = self.tables.lock().unwrap();
        if tables.contains_key(table) {
            return Err(ContractError::TableAlreadyExists {
                table: table.to_string(),
            });
        }
        tables.insert(table.to_string(), Vec::new());
        Ok(())
    }

    #[instrument(name = "mock_warehouse_insert_rows", skip(self, rows), fields(rows = rows.len()))]
    async fn insert_rows(&self, table: &str, rows: &[Value]) -> Result<(), ContractError> {
        self.record(WarehouseCall::InsertRows {
            table: table.to_string(),
            rows: rows.len(),
        });

        if self.config.fail_insert.iter().any(|t| t == table) {
            return Err(ContractError::row_insert(table, "mock failure"));
        }

        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .get_mut(table)
            .ok_or_else(|| ContractError::row_insert(table, "table not found"))?;
        stored.extend_from_slice(rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_insert() {
        let warehouse = MockWarehouse::new();
        warehouse
            .create_table("pods", &TableSchema::default())
            .await
            .unwrap();
        warehouse
            .insert_rows("pods", &[json!({"pod": "a"})])
            .await
            .unwrap();

        assert_eq!(warehouse.rows("pods"), vec![json!({"pod": "a"})]);
        assert_eq!(warehouse.create_calls(), vec!["pods"]);
        assert_eq!(warehouse.insert_calls(), vec!["pods"]);
    }

    #[tokio::test]
    async fn test_existing_table_conflicts() {
        let warehouse = MockWarehouse::with_config(MockConfig {
            existing_tables: vec!["nodes".into()],
            ..Default::default()
        });
        let err = warehouse
            .create_table("nodes", &TableSchema::default())
            .await
            .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let warehouse = MockWarehouse::with_config(MockConfig {
            fail_create: vec!["images".into()],
            fail_insert: vec!["leases".into()],
            ..Default::default()
        });

        let err = warehouse
            .create_table("images", &TableSchema::default())
            .await
            .unwrap_err();
        assert!(!err.is_already_exists());

        warehouse
            .create_table("leases", &TableSchema::default())
            .await
            .unwrap();
        assert!(warehouse.insert_rows("leases", &[json!({})]).await.is_err());
        assert!(warehouse.rows("leases").is_empty());
    }

    #[tokio::test]
    async fn test_insert_into_missing_table() {
        let warehouse = MockWarehouse::new();
        assert!(warehouse.insert_rows("events", &[json!({})]).await.is_err());
    }
}
