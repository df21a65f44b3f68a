//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the loader.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Data Model
//! - `MetricsDocument` is decoded once per invocation and read-only afterwards
//! - Lease and image categories use flattened union records
//! - The remaining five categories are opaque pass-through payloads

mod category;
mod config;
mod document;
mod error;
mod event;
mod locator;
mod records;
mod schema;
mod sink;
mod source;
mod warehouse;

pub use category::Category;
pub use config::*;
pub use document::{is_metrics_file, MetricsDocument, METRICS_FILE_NAME};
pub use error::*;
pub use event::StorageEvent;
pub use locator::ObjectLocator;
pub use records::*;
pub use schema::*;
pub use sink::*;
pub use source::*;
pub use warehouse::*;
