//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Contract snapshots (destinations, schema wire shape)
//! - Config -> source -> dispatcher runs against a local mirror
//! - Warehouse and export sinks over the same document

#[cfg(test)]
mod contract_tests {
    use contracts::{Category, LeaseEventUnion, TableShape};
    use serde_json::json;

    #[test]
    fn test_destination_table() {
        let destinations: Vec<_> = Category::DISPATCH_ORDER
            .iter()
            .map(|c| c.destination())
            .collect();
        assert_eq!(
            destinations,
            vec![
                "images",
                "nodes",
                "test_platform_insights",
                "leases",
                "openshift_builds",
                "pods",
                "events",
            ]
        );
    }

    #[test]
    fn test_lease_schema_snapshot() {
        let schema = LeaseEventUnion::table_schema(&[]);
        let wire = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            wire["fields"][0],
            json!({"name": "name", "type": "STRING", "mode": "NULLABLE"})
        );
        assert!(schema
            .fields
            .iter()
            .all(|f| f.mode == contracts::FieldMode::Nullable));
    }

    #[test]
    fn test_admission_rule() {
        assert!(!contracts::is_metrics_file("foo.json"));
        assert!(contracts::is_metrics_file("path/to/ci-operator-metrics.json"));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::path::Path;

    use config_loader::ConfigLoader;
    use contracts::{Category, LeaseEventUnion, MetricsDocument, ObjectLocator, PodLifecycleEvent};
    use ingestion::{fetch_document, ConfiguredSource};
    use serde_json::json;
    use tempfile::tempdir;
    use warehouse::{MockConfig, MockWarehouse};

    const BUCKET: &str = "origin-ci-test";
    const OBJECT: &str = "logs/e2e-aws/1001/artifacts/ci-operator-metrics.json";

    fn sample_document() -> serde_json::Value {
        json!({
            "images": [
                {"namespace": "ci-op-1", "full_name": "ci-op-1/pipeline:src", "duration_seconds": 12.5},
                {"namespace": "ci-op-1", "tag_name": "latest", "source_image": "quay.io/x/y", "retry_count": 0}
            ],
            "nodes": [{"node_name": "worker-a", "cpu_cores": 8}],
            "leases": [
                {"name": "aws-quota-slice", "leases_remaining_at_acquisition": 0, "leases_total": 10},
                {"name": "aws-quota-slice", "released": true, "leases_available_at_release": 10}
            ],
            "openshift_builds": [{"build": "src", "status": "Complete"}],
            "pods": [
                {"pod": "src-build", "phase": "Succeeded"},
                {"pod": "e2e-aws", "phase": "Failed", "exit_code": 1}
            ],
            "events": [],
            "test_platform_insights": null
        })
    }

    /// Write the sample into `<root>/<bucket>/<object>`
    fn mirror(root: &Path) -> ObjectLocator {
        let path = root.join(BUCKET).join(OBJECT);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, sample_document().to_string()).unwrap();
        ObjectLocator::new(BUCKET, OBJECT)
    }

    fn source_for(root: &Path) -> ConfiguredSource {
        let toml = format!(
            "[warehouse]\nproject_id = \"p\"\ndataset_id = \"d\"\n\n[storage]\nlocal_root = {:?}\n",
            root.display().to_string()
        );
        let config = ConfigLoader::load_from_str(&toml, config_loader::ConfigFormat::Toml).unwrap();
        ConfigLoader::validate(&config).unwrap();
        ConfiguredSource::from_config(&config.storage, None).unwrap()
    }

    /// End-to-end: local mirror -> decode -> warehouse dispatch
    #[tokio::test]
    async fn test_e2e_warehouse_load() {
        let root = tempdir().unwrap();
        let locator = mirror(root.path());
        let source = source_for(root.path());

        let document = fetch_document(&source, &locator).await.unwrap();
        let mock = MockWarehouse::new();
        let stats = dispatcher::load(&mock, &document).await.unwrap();

        assert_eq!(
            mock.create_calls(),
            vec!["images", "nodes", "leases", "openshift_builds", "pods"]
        );
        assert_eq!(mock.insert_calls(), mock.create_calls());
        assert_eq!(stats.total_rows(), 8);
        assert_eq!(stats.skipped(), &[Category::Insights, Category::Events]);

        // Acquisition-only lease keeps zero and omits release fields
        let leases = mock.rows("leases");
        assert_eq!(leases[0]["leases_remaining_at_acquisition"], 0);
        assert!(leases[0].get("release_duration_seconds").is_none());
        assert!(leases[0].get("leases_available_at_release").is_none());
    }

    /// Ordered abort keeps earlier categories written
    #[tokio::test]
    async fn test_e2e_partial_failure() {
        let root = tempdir().unwrap();
        let locator = mirror(root.path());
        let document = fetch_document(&source_for(root.path()), &locator)
            .await
            .unwrap();

        let mock = MockWarehouse::with_config(MockConfig {
            existing_tables: vec!["nodes".into()],
            fail_insert: vec!["leases".into()],
            ..Default::default()
        });
        let err = dispatcher::load(&mock, &document).await.unwrap_err();

        assert_eq!(err.category(), Some(Category::Leases));
        assert_eq!(mock.rows("images").len(), 2);
        assert_eq!(mock.rows("nodes").len(), 1);
        assert!(!mock.table_exists("openshift_builds"));
        assert!(!mock.table_exists("pods"));
    }

    /// Export files decode back into equal records, in order
    #[tokio::test]
    async fn test_e2e_export_round_trip() {
        let root = tempdir().unwrap();
        let out = tempdir().unwrap();
        let locator = mirror(root.path());
        let document = fetch_document(&source_for(root.path()), &locator)
            .await
            .unwrap();

        dispatcher::export(&document, out.path()).await.unwrap();

        let pods: Vec<PodLifecycleEvent> = fs::read_to_string(out.path().join("pods.json"))
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(pods, document.pods);

        let leases: Vec<LeaseEventUnion> = fs::read_to_string(out.path().join("leases.json"))
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(leases, document.leases);

        assert!(!out.path().join("events.json").exists());
        assert!(!out.path().join("test_platform_insights.json").exists());
    }

    /// Both sinks see the same document the same way
    #[tokio::test]
    async fn test_sinks_agree() {
        let document: MetricsDocument = serde_json::from_value(sample_document()).unwrap();
        let out = tempdir().unwrap();
        let mock = MockWarehouse::new();

        let loaded = dispatcher::load(&mock, &document).await.unwrap();
        let exported = dispatcher::export(&document, out.path()).await.unwrap();

        assert_eq!(loaded, exported);
        for (category, rows) in loaded.written() {
            let content =
                fs::read_to_string(out.path().join(category.export_file_name())).unwrap();
            assert_eq!(content.lines().count(), *rows);
            assert_eq!(mock.rows(category.destination()).len(), *rows);
        }
    }
}
