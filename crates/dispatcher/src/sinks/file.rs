//! FileExportSink - one newline-delimited JSON file per category

use contracts::{CategorySink, ContractError, TableSchema};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, instrument};

/// Sink that writes `<dir>/<destination>.json`, one row per line
pub struct FileExportSink {
    name: String,
    dir: PathBuf,
}

impl FileExportSink {
    /// Create a new FileExportSink
    pub fn new(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        // Create export directory if it doesn't exist
        fs::create_dir_all(&dir)?;

        Ok(Self {
            name: "file".to_string(),
            dir,
        })
    }

    /// Path a destination is exported to
    pub fn path_for(&self, destination: &str) -> PathBuf {
        self.dir.join(format!("{destination}.json"))
    }

    fn write_rows(path: &Path, rows: &[Value]) -> std::io::Result<()> {
        // Existing files are truncated
        let mut writer = BufWriter::new(File::create(path)?);
        for row in rows {
            serde_json::to_writer(&mut writer, row)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

impl CategorySink for FileExportSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ensure_destination(
        &mut self,
        destination: &str,
        _schema: &TableSchema,
    ) -> Result<(), ContractError> {
        debug!(sink = %self.name, destination, "Export file needs no preparation");
        Ok(())
    }

    #[instrument(
        name = "file_export_sink_write",
        skip(self, rows),
        fields(sink = %self.name, rows = rows.len())
    )]
    async fn write(&mut self, destination: &str, rows: &[Value]) -> Result<(), ContractError> {
        let path = self.path_for(destination);
        Self::write_rows(&path, rows).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to write export file");
            ContractError::export_write(path.display().to_string(), e.to_string())
        })?;
        debug!(path = %path.display(), "Export file written");
        Ok(())
    }
}
