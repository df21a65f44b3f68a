//! Fetch + decode

use std::path::Path;

use contracts::{ContractError, MetricsDocument, ObjectLocator, ObjectSource, StorageEvent};
use tracing::{debug, info, instrument, warn};

/// Fetch one object and decode it into a MetricsDocument.
///
/// No retries: read and decode failures are returned as-is.
#[instrument(
    name = "ingestion_fetch_document",
    skip(source, locator),
    fields(source = source.name(), locator = %locator)
)]
pub async fn fetch_document<S: ObjectSource>(
    source: &S,
    locator: &ObjectLocator,
) -> Result<MetricsDocument, ContractError> {
    let bytes = source.fetch(locator).await?;
    debug!(bytes = bytes.len(), "Object fetched");

    let document = MetricsDocument::from_slice(&bytes)?;
    info!(records = document.total_records(), "Metrics document decoded");
    Ok(document)
}

/// Read and decode a metrics document from a local file
#[instrument(name = "ingestion_read_document_file", fields(path = %path.display()))]
pub async fn read_document_file(path: &Path) -> Result<MetricsDocument, ContractError> {
    let file = std::fs::File::open(path)?;
    MetricsDocument::from_reader(std::io::BufReader::new(file))
}

/// Admission gate for trigger-based invocation.
///
/// Rejects the event before any fetch when the object is not a metrics file.
pub fn admit_event(event: &StorageEvent) -> Result<ObjectLocator, ContractError> {
    event.admit().inspect_err(|_| {
        warn!(bucket = %event.bucket, name = %event.name, "Received non-metrics file");
    })
}
