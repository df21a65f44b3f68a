//! Dispatcher - ordered per-category fan-out to one sink

use std::path::Path;

use contracts::{Category, CategorySink, MetricsDocument, Warehouse};
use observability::{record_category_skipped, record_dispatch_failure, record_records_written};
use tracing::{debug, error, info, instrument};

use crate::batch::CategoryBatch;
use crate::error::DispatcherError;
use crate::metrics::DispatchStats;
use crate::sinks::{FileExportSink, WarehouseSink};

/// Drives one sink through every category of a document
pub struct Dispatcher<S> {
    sink: S,
}

impl<S: CategorySink> Dispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Dispatch every category in `Category::DISPATCH_ORDER`.
    ///
    /// Empty categories are skipped without touching the sink. The first
    /// failure stops the run; categories already written stay written.
    ///
    /// # Errors
    /// Returns the failing category's `DispatcherError`
    #[instrument(
        name = "dispatcher_dispatch",
        skip(self, document),
        fields(sink = %self.sink.name(), records = document.total_records())
    )]
    pub async fn dispatch(
        &mut self,
        document: &MetricsDocument,
    ) -> Result<DispatchStats, DispatcherError> {
        let mut stats = DispatchStats::new();

        for category in Category::DISPATCH_ORDER {
            match self.dispatch_category(document, category).await {
                Ok(Some(rows)) => stats.record_written(category, rows),
                Ok(None) => stats.record_skipped(category),
                Err(e) => {
                    record_dispatch_failure(self.sink.name(), category);
                    error!(category = %category, error = %e, "Dispatch stopped");
                    return Err(e);
                }
            }
        }

        info!(
            categories = stats.written().len(),
            rows = stats.total_rows(),
            "Dispatch complete"
        );
        Ok(stats)
    }

    /// Returns `None` when the category was skipped
    async fn dispatch_category(
        &mut self,
        document: &MetricsDocument,
        category: Category,
    ) -> Result<Option<usize>, DispatcherError> {
        if document.len(category) == 0 {
            debug!(category = %category, "Category empty, skipping");
            record_category_skipped(self.sink.name(), category);
            return Ok(None);
        }

        let batch = CategoryBatch::extract(document, category)
            .map_err(|source| DispatcherError::Serialize { category, source })?;
        let destination = batch.destination();

        self.sink
            .ensure_destination(destination, &batch.schema)
            .await
            .map_err(|source| DispatcherError::Destination { category, source })?;

        self.sink
            .write(destination, &batch.rows)
            .await
            .map_err(|source| DispatcherError::Write { category, source })?;

        record_records_written(self.sink.name(), category, batch.len());
        info!(
            category = %category,
            destination,
            rows = batch.len(),
            "Category written"
        );
        Ok(Some(batch.len()))
    }
}

/// Load every non-empty category into the warehouse
#[instrument(name = "dispatcher_load", skip(warehouse, document))]
pub async fn load<W: Warehouse + Sync>(
    warehouse: &W,
    document: &MetricsDocument,
) -> Result<DispatchStats, DispatcherError> {
    Dispatcher::new(WarehouseSink::new(warehouse))
        .dispatch(document)
        .await
}

/// Export every non-empty category to `<dir>/<destination>.json`
#[instrument(name = "dispatcher_export", skip(document, dir), fields(dir = %dir.as_ref().display()))]
pub async fn export(
    document: &MetricsDocument,
    dir: impl AsRef<Path>,
) -> Result<DispatchStats, DispatcherError> {
    let dir = dir.as_ref();
    let sink = FileExportSink::new(dir).map_err(|source| DispatcherError::ExportDirectory {
        path: dir.to_path_buf(),
        source,
    })?;
    Dispatcher::new(sink).dispatch(document).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{LeaseEventUnion, NodeEvent, PodLifecycleEvent, TableSchema};
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::tempdir;
    use warehouse::{MockConfig, MockWarehouse, WarehouseCall};

    fn node(name: &str) -> NodeEvent {
        serde_json::from_value(json!({"node_name": name, "cpu": 8})).unwrap()
    }

    fn pod(name: &str) -> PodLifecycleEvent {
        serde_json::from_value(json!({"pod": name, "phase": "Succeeded"})).unwrap()
    }

    fn lease(name: &str) -> LeaseEventUnion {
        LeaseEventUnion {
            lease_name: Some(name.into()),
            released: Some(true),
            ..Default::default()
        }
    }

    /// Records every sink call
    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl CategorySink for RecordingSink {
        fn name(&self) -> &str {
            "recording"
        }

        async fn ensure_destination(
            &mut self,
            destination: &str,
            _schema: &TableSchema,
        ) -> Result<(), contracts::ContractError> {
            self.calls.push(format!("ensure:{destination}"));
            Ok(())
        }

        async fn write(
            &mut self,
            destination: &str,
            rows: &[Value],
        ) -> Result<(), contracts::ContractError> {
            self.calls.push(format!("write:{destination}:{}", rows.len()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_empty_document_makes_no_calls() {
        let mock = MockWarehouse::new();
        let stats = load(&mock, &MetricsDocument::default()).await.unwrap();

        assert!(mock.calls().is_empty());
        assert_eq!(stats.total_rows(), 0);
        assert_eq!(stats.skipped().len(), 7);
    }

    #[tokio::test]
    async fn test_categories_follow_dispatch_order() {
        let document = MetricsDocument {
            events: vec![serde_json::from_value(json!({"reason": "Pulled"})).unwrap()],
            pods: vec![pod("p1")],
            nodes: vec![node("n1")],
            leases: vec![lease("l1")],
            ..Default::default()
        };

        let mut dispatcher = Dispatcher::new(RecordingSink::default());
        dispatcher.dispatch(&document).await.unwrap();

        assert_eq!(
            dispatcher.into_sink().calls,
            vec![
                "ensure:nodes",
                "write:nodes:1",
                "ensure:leases",
                "write:leases:1",
                "ensure:pods",
                "write:pods:1",
                "ensure:events",
                "write:events:1",
            ]
        );
    }

    #[tokio::test]
    async fn test_nodes_and_events_only() {
        let document = MetricsDocument {
            nodes: vec![node("n1"), node("n2")],
            events: vec![serde_json::from_value(json!({"reason": "Scheduled"})).unwrap()],
            ..Default::default()
        };
        let mock = MockWarehouse::new();

        let stats = load(&mock, &document).await.unwrap();

        assert_eq!(mock.create_calls(), vec!["nodes", "events"]);
        assert_eq!(mock.insert_calls(), vec!["nodes", "events"]);
        assert_eq!(mock.rows("nodes").len(), 2);
        assert_eq!(stats.rows(Category::Nodes), Some(2));
        assert_eq!(stats.rows(Category::Events), Some(1));
        assert_eq!(stats.rows(Category::Images), None);
    }

    #[tokio::test]
    async fn test_existing_table_still_receives_rows() {
        let document = MetricsDocument {
            pods: vec![pod("p1")],
            ..Default::default()
        };
        let mock = MockWarehouse::with_config(MockConfig {
            existing_tables: vec!["pods".into()],
            ..Default::default()
        });

        load(&mock, &document).await.unwrap();

        assert_eq!(mock.insert_calls(), vec!["pods"]);
        assert_eq!(mock.rows("pods"), vec![json!({"pod": "p1", "phase": "Succeeded"})]);
    }

    #[tokio::test]
    async fn test_insert_failure_stops_later_categories() {
        let document = MetricsDocument {
            leases: vec![lease("l1")],
            openshift_builds: vec![serde_json::from_value(json!({"build": "b1"})).unwrap()],
            ..Default::default()
        };
        let mock = MockWarehouse::with_config(MockConfig {
            fail_insert: vec!["leases".into()],
            ..Default::default()
        });

        let err = load(&mock, &document).await.unwrap_err();

        assert!(matches!(err, DispatcherError::Write { .. }));
        assert_eq!(err.category(), Some(Category::Leases));
        assert!(err.to_string().contains("leases"));
        assert!(!mock.table_exists("openshift_builds"));
        let touched_builds = mock.calls().iter().any(|call| match call {
            WarehouseCall::CreateTable { table, .. } | WarehouseCall::InsertRows { table, .. } => {
                table == "openshift_builds"
            }
        });
        assert!(!touched_builds);
    }

    #[tokio::test]
    async fn test_create_failure_skips_insert() {
        let document = MetricsDocument {
            nodes: vec![node("n1")],
            ..Default::default()
        };
        let mock = MockWarehouse::with_config(MockConfig {
            fail_create: vec!["nodes".into()],
            ..Default::default()
        });

        let err = load(&mock, &document).await.unwrap_err();

        assert!(matches!(err, DispatcherError::Destination { .. }));
        assert!(mock.insert_calls().is_empty());
    }

    #[tokio::test]
    async fn test_export_round_trip() {
        let dir = tempdir().unwrap();
        let document = MetricsDocument {
            pods: vec![pod("p1"), pod("p2")],
            ..Default::default()
        };

        let stats = export(&document, dir.path()).await.unwrap();
        assert_eq!(stats.rows(Category::Pods), Some(2));

        let content = fs::read_to_string(dir.path().join("pods.json")).unwrap();
        let decoded: Vec<PodLifecycleEvent> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(decoded, document.pods);

        // Only non-empty categories produce files
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_document_exports_nothing() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("run").join("42");

        let stats = export(&MetricsDocument::default(), &nested).await.unwrap();

        assert!(nested.is_dir());
        assert_eq!(fs::read_dir(&nested).unwrap().count(), 0);
        assert_eq!(stats.total_rows(), 0);
        assert_eq!(stats.skipped().len(), 7);
    }

    #[tokio::test]
    async fn test_export_write_failure_stops_later_categories() {
        let dir = tempdir().unwrap();
        // A directory where the builds file should go makes the write fail
        fs::create_dir(dir.path().join("openshift_builds.json")).unwrap();
        let document = MetricsDocument {
            nodes: vec![node("n1")],
            openshift_builds: vec![serde_json::from_value(json!({"build": "b1"})).unwrap()],
            pods: vec![pod("p1")],
            ..Default::default()
        };

        let err = export(&document, dir.path()).await.unwrap_err();

        assert!(matches!(err, DispatcherError::Write { .. }));
        assert_eq!(err.category(), Some(Category::Builds));
        assert!(dir.path().join("nodes.json").is_file());
        assert!(!dir.path().join("pods.json").exists());
    }

    #[tokio::test]
    async fn test_export_directory_failure() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = export(&MetricsDocument::default(), blocker.join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatcherError::ExportDirectory { .. }));
    }
}
