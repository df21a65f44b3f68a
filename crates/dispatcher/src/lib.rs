//! # Dispatcher
//!
//! Category fan-out.
//!
//! Responsibilities:
//! - Walk the seven categories of a `MetricsDocument` in dispatch order
//! - Skip empty categories before any destination work
//! - Prepare the destination, then write every row of the category
//! - Stop at the first failure, naming the category

pub mod batch;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod sinks;

pub use batch::CategoryBatch;
pub use contracts::{CategorySink, MetricsDocument};
pub use dispatcher::{export, load, Dispatcher};
pub use error::DispatcherError;
pub use metrics::DispatchStats;
pub use sinks::{FileExportSink, WarehouseSink};
