//! BigQuery REST client

use std::time::Duration;

use contracts::{ContractError, TableSchema, Warehouse, WarehouseConfig};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

/// Rows per `insertAll` request
const DEFAULT_MAX_ROWS_PER_REQUEST: usize = 500;

/// BigQuery client bound to one project/dataset
pub struct BigQueryClient {
    client: Client,
    endpoint: Url,
    project_id: String,
    dataset_id: String,
    access_token: Option<String>,
    max_rows_per_request: usize,
}

impl BigQueryClient {
    /// Create from warehouse configuration
    pub fn new(config: &WarehouseConfig, access_token: Option<String>) -> Result<Self, ContractError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ContractError::config_validation("warehouse.endpoint", format!("invalid URL: {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContractError::Other(format!("failed to build BigQuery client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            project_id: config.project_id.clone(),
            dataset_id: config.dataset_id.clone(),
            access_token,
            max_rows_per_request: DEFAULT_MAX_ROWS_PER_REQUEST,
        })
    }

    /// Override the `insertAll` batch size
    pub fn with_max_rows_per_request(mut self, rows: usize) -> Self {
        self.max_rows_per_request = rows.max(1);
        self
    }

    /// `{endpoint}/projects/{project}/datasets/{dataset}/tables[/{extra}...]`
    fn tables_url(&self, extra: &[&str]) -> Result<Url, ContractError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ContractError::Other("warehouse endpoint cannot be a base URL".into()))?
            .pop_if_empty()
            .extend([
                "projects",
                self.project_id.as_str(),
                "datasets",
                self.dataset_id.as_str(),
                "tables",
            ])
            .extend(extra);
        Ok(url)
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.client.post(url);
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn insert_chunk(&self, url: &Url, table: &str, rows: &[Value]) -> Result<(), ContractError> {
        let body = InsertAllRequest {
            rows: rows.iter().map(|json| InsertRow { json }).collect(),
        };

        let response = self
            .post(url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| ContractError::row_insert(table, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ContractError::row_insert(table, format!("HTTP {status}: {text}")));
        }

        let parsed: InsertAllResponse = response
            .json()
            .await
            .map_err(|e| ContractError::row_insert(table, format!("invalid response: {e}")))?;

        match parsed.insert_errors.first() {
            None => Ok(()),
            Some(first) => Err(ContractError::row_insert(
                table,
                format!(
                    "{} rows rejected, first at index {}: {}",
                    parsed.insert_errors.len(),
                    first.index,
                    first.describe()
                ),
            )),
        }
    }
}

impl Warehouse for BigQueryClient {
    #[instrument(
        name = "bigquery_create_table",
        skip(self, schema),
        fields(dataset = %self.dataset_id, table = %table, columns = schema.fields.len())
    )]
    async fn create_table(&self, table: &str, schema: &TableSchema) -> Result<(), ContractError> {
        let url = self.tables_url(&[])?;
        let body = TableResource {
            table_reference: TableReference {
                project_id: &self.project_id,
                dataset_id: &self.dataset_id,
                table_id: table,
            },
            schema,
        };

        let response = self
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ContractError::table_create(table, e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                debug!("Table created");
                Ok(())
            }
            StatusCode::CONFLICT => Err(ContractError::TableAlreadyExists {
                table: table.to_string(),
            }),
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(ContractError::table_create(table, format!("HTTP {status}: {text}")))
            }
        }
    }

    #[instrument(
        name = "bigquery_insert_rows",
        skip(self, rows),
        fields(dataset = %self.dataset_id, table = %table, rows = rows.len())
    )]
    async fn insert_rows(&self, table: &str, rows: &[Value]) -> Result<(), ContractError> {
        let url = self.tables_url(&[table, "insertAll"])?;
        for chunk in rows.chunks(self.max_rows_per_request) {
            self.insert_chunk(&url, table, chunk).await?;
            debug!(rows = chunk.len(), "Chunk inserted");
        }
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TableResource<'a> {
    table_reference: TableReference<'a>,
    schema: &'a TableSchema,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TableReference<'a> {
    project_id: &'a str,
    dataset_id: &'a str,
    table_id: &'a str,
}

#[derive(Serialize)]
struct InsertAllRequest<'a> {
    rows: Vec<InsertRow<'a>>,
}

#[derive(Serialize)]
struct InsertRow<'a> {
    json: &'a Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertAllResponse {
    #[serde(default)]
    insert_errors: Vec<RowErrors>,
}

#[derive(Debug, Deserialize)]
struct RowErrors {
    #[serde(default)]
    index: u64,
    #[serde(default)]
    errors: Vec<ErrorProto>,
}

impl RowErrors {
    fn describe(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.reason, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Deserialize)]
struct ErrorProto {
    #[serde(default)]
    reason: String,
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{FieldSchema, FieldType};
    use serde_json::json;

    fn client() -> BigQueryClient {
        let config = WarehouseConfig {
            project_id: "openshift-gce-devel".into(),
            dataset_id: "ci_operator_metrics".into(),
            ..Default::default()
        };
        BigQueryClient::new(&config, None).unwrap()
    }

    #[test]
    fn test_tables_url() {
        let url = client().tables_url(&[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://bigquery.googleapis.com/bigquery/v2/projects/openshift-gce-devel/datasets/ci_operator_metrics/tables"
        );
    }

    #[test]
    fn test_insert_all_url() {
        let url = client().tables_url(&["pods", "insertAll"]).unwrap();
        assert!(url.as_str().ends_with("/tables/pods/insertAll"));
    }

    #[test]
    fn test_table_resource_body() {
        let schema = TableSchema::new(vec![FieldSchema::nullable("pod", FieldType::String)]);
        let body = TableResource {
            table_reference: TableReference {
                project_id: "p",
                dataset_id: "d",
                table_id: "pods",
            },
            schema: &schema,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "tableReference": {"projectId": "p", "datasetId": "d", "tableId": "pods"},
                "schema": {"fields": [{"name": "pod", "type": "STRING", "mode": "NULLABLE"}]}
            })
        );
    }

    #[test]
    fn test_insert_all_body() {
        let rows = vec![json!({"a": 1}), json!({"b": "x"})];
        let body = InsertAllRequest {
            rows: rows.iter().map(|json| InsertRow { json }).collect(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"rows": [{"json": {"a": 1}}, {"json": {"b": "x"}}]})
        );
    }

    #[test]
    fn test_insert_all_response_errors() {
        let parsed: InsertAllResponse = serde_json::from_value(json!({
            "kind": "bigquery#tableDataInsertAllResponse",
            "insertErrors": [
                {"index": 3, "errors": [{"reason": "invalid", "message": "no such field: foo"}]}
            ]
        }))
        .unwrap();
        assert_eq!(parsed.insert_errors.len(), 1);
        assert_eq!(parsed.insert_errors[0].index, 3);
        assert_eq!(parsed.insert_errors[0].describe(), "invalid: no such field: foo");

        let ok: InsertAllResponse = serde_json::from_value(json!({})).unwrap();
        assert!(ok.insert_errors.is_empty());
    }

    #[test]
    fn test_batch_size_floor() {
        let client = client().with_max_rows_per_request(0);
        assert_eq!(client.max_rows_per_request, 1);
    }
}
