//! # Ingestion
//!
//! Input acquisition for the loader.
//!
//! Responsibilities:
//! - Fetch the raw metrics object for a bucket/object locator
//! - Decode it into a `MetricsDocument`
//! - Apply the admission rule to trigger events
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::{fetch_document, GcsObjectSource};
//!
//! let source = GcsObjectSource::new(&config.storage, token)?;
//! let locator = "gs://bucket/logs/1/ci-operator-metrics.json".parse()?;
//! let document = fetch_document(&source, &locator).await?;
//! ```
//!
//! ## Testing
//!
//! ```ignore
//! use ingestion::MemoryObjectSource;
//!
//! let source = MemoryObjectSource::new().with_object(locator, bytes);
//! ```

mod config;
mod fs;
mod gcs;
mod memory;
mod pipeline;

// Re-exports
pub use config::ConfiguredSource;
pub use contracts::{MetricsDocument, ObjectLocator, ObjectSource, StorageEvent};
pub use fs::FsObjectSource;
pub use gcs::GcsObjectSource;
pub use memory::MemoryObjectSource;
pub use pipeline::{admit_event, fetch_document, read_document_file};
