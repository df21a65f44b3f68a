//! Layered error definitions
//!
//! Categorized by source: config / input / warehouse / export

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Input Errors =====
    /// Object locator could not be parsed
    #[error("invalid object locator '{locator}': {message}")]
    InvalidLocator { locator: String, message: String },

    /// Object name failed the admission rule
    #[error("unexpected file received: {name} (expected {expected})")]
    UnexpectedFile { name: String, expected: &'static str },

    /// Object could not be read from storage
    #[error("failed to read object gs://{bucket}/{object}: {message}")]
    ObjectRead {
        bucket: String,
        object: String,
        message: String,
    },

    /// Input bytes are not a valid metrics document
    #[error("failed to decode metrics document: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    // ===== Warehouse Errors =====
    /// Destination table already exists (conflict class)
    #[error("table '{table}' already exists")]
    TableAlreadyExists { table: String },

    /// Destination table creation failed
    #[error("failed to create table '{table}': {message}")]
    TableCreate { table: String, message: String },

    /// Row insertion failed
    #[error("failed to insert rows into '{table}': {message}")]
    RowInsert { table: String, message: String },

    // ===== Export Errors =====
    /// Export file write failed
    #[error("failed to write export file '{path}': {message}")]
    ExportWrite { path: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid locator error
    pub fn invalid_locator(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidLocator {
            locator: locator.into(),
            message: message.into(),
        }
    }

    /// Create object read error
    pub fn object_read(
        bucket: impl Into<String>,
        object: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ObjectRead {
            bucket: bucket.into(),
            object: object.into(),
            message: message.into(),
        }
    }

    /// Create table creation error
    pub fn table_create(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TableCreate {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create row insertion error
    pub fn row_insert(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RowInsert {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create export write error
    pub fn export_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExportWrite {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error reports an already-existing destination
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::TableAlreadyExists { .. })
    }
}
