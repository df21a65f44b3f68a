//! # Warehouse
//!
//! Warehouse clients implementing `contracts::Warehouse`.
//!
//! - `BigQueryClient`: BigQuery REST (`tables.insert`, `tabledata.insertAll`)
//! - `MockWarehouse`: in-memory tables with injectable failures, for tests

mod bigquery;
mod mock;

pub use bigquery::BigQueryClient;
pub use contracts::Warehouse;
pub use mock::{MockConfig, MockWarehouse, WarehouseCall};
