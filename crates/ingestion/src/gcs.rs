//! GcsObjectSource - reads objects through the GCS JSON API

use std::time::Duration;

use bytes::Bytes;
use contracts::{ContractError, ObjectLocator, ObjectSource, StorageConfig};
use reqwest::{Client, Url};
use tracing::{debug, instrument};

/// Object source backed by the GCS JSON API
pub struct GcsObjectSource {
    name: String,
    client: Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl GcsObjectSource {
    /// Create from storage configuration
    ///
    /// `access_token` is sent as a bearer token when present.
    pub fn new(config: &StorageConfig, access_token: Option<String>) -> Result<Self, ContractError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ContractError::config_validation("storage.endpoint", format!("invalid URL: {e}"))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ContractError::Other(format!("failed to build GCS client: {e}")))?;

        Ok(Self {
            name: "gcs".to_string(),
            client,
            endpoint,
            access_token,
        })
    }

    /// Media download URL: `{endpoint}/b/{bucket}/o/{object}?alt=media`
    fn object_url(&self, locator: &ObjectLocator) -> Result<Url, ContractError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ContractError::object_read(&locator.bucket, &locator.object, "endpoint cannot be a base URL")
            })?
            .pop_if_empty()
            .extend(["b", locator.bucket.as_str(), "o", locator.object.as_str()]);
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }
}

impl ObjectSource for GcsObjectSource {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "gcs_source_fetch",
        skip(self, locator),
        fields(bucket = %locator.bucket, object = %locator.object)
    )]
    async fn fetch(&self, locator: &ObjectLocator) -> Result<Bytes, ContractError> {
        let url = self.object_url(locator)?;
        let read_error =
            |message: String| ContractError::object_read(&locator.bucket, &locator.object, message);

        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| read_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(read_error(format!("HTTP {status}: {body}")));
        }

        let bytes = response.bytes().await.map_err(|e| read_error(e.to_string()))?;
        debug!(bytes = bytes.len(), "Object downloaded");
        Ok(bytes)
    }
}
