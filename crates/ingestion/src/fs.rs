//! FsObjectSource - reads objects from a local bucket mirror

use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use contracts::{ContractError, ObjectLocator, ObjectSource};
use tracing::{debug, instrument};

/// Object source reading `{root}/{bucket}/{object}`
pub struct FsObjectSource {
    name: String,
    root: PathBuf,
}

impl FsObjectSource {
    /// Create a new FsObjectSource
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            name: "fs".to_string(),
            root: root.into(),
        }
    }

    /// Resolve a locator to a path below the root
    fn object_path(&self, locator: &ObjectLocator) -> Result<PathBuf, ContractError> {
        let relative = Path::new(&locator.bucket).join(&locator.object);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(ContractError::object_read(
                &locator.bucket,
                &locator.object,
                "locator escapes the mirror root",
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectSource for FsObjectSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "fs_source_fetch",
        skip(self, locator),
        fields(bucket = %locator.bucket, object = %locator.object)
    )]
    async fn fetch(&self, locator: &ObjectLocator) -> Result<Bytes, ContractError> {
        let path = self.object_path(locator)?;
        let data = tokio::fs::read(&path).await.map_err(|e| {
            ContractError::object_read(
                &locator.bucket,
                &locator.object,
                format!("{}: {e}", path.display()),
            )
        })?;
        debug!(path = %path.display(), bytes = data.len(), "Object read");
        Ok(Bytes::from(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fs_source_fetch() {
        let dir = tempdir().unwrap();
        let object_dir = dir.path().join("bucket/logs/1");
        fs::create_dir_all(&object_dir).unwrap();
        fs::write(object_dir.join("ci-operator-metrics.json"), b"{}").unwrap();

        let source = FsObjectSource::new(dir.path());
        let locator = ObjectLocator::new("bucket", "logs/1/ci-operator-metrics.json");
        let bytes = source.fetch(&locator).await.unwrap();
        assert_eq!(&bytes[..], b"{}");
    }

    #[tokio::test]
    async fn test_fs_source_missing_object() {
        let dir = tempdir().unwrap();
        let source = FsObjectSource::new(dir.path());
        let err = source
            .fetch(&ObjectLocator::new("bucket", "missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ContractError::ObjectRead { .. }));
    }

    #[tokio::test]
    async fn test_fs_source_rejects_parent_components() {
        let dir = tempdir().unwrap();
        let source = FsObjectSource::new(dir.path());
        let result = source
            .fetch(&ObjectLocator::new("bucket", "../../etc/passwd"))
            .await;
        assert!(result.is_err());
    }
}
