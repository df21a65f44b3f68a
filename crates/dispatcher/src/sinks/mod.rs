//! Sink implementations
//!
//! Contains WarehouseSink and FileExportSink.

mod file;
mod warehouse;

pub use self::file::FileExportSink;
pub use self::warehouse::WarehouseSink;
