//! MetricsDocument - the decoded CI metrics file

use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;

use crate::{
    BuildEvent, Category, ContractError, Event, ImageEventUnion, InsightsEvent, LeaseEventUnion,
    NodeEvent, PodLifecycleEvent,
};

/// Suffix every admissible metrics object name ends with
pub const METRICS_FILE_NAME: &str = "ci-operator-metrics.json";

/// Admission rule for incoming objects
pub fn is_metrics_file(name: &str) -> bool {
    name.ends_with(METRICS_FILE_NAME)
}

/// Complete metrics document
///
/// Every category may be omitted or `null`; both decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsDocument {
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageEventUnion>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub leases: Vec<LeaseEventUnion>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeEvent>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub openshift_builds: Vec<BuildEvent>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub pods: Vec<PodLifecycleEvent>,

    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub test_platform_insights: Vec<InsightsEvent>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl MetricsDocument {
    /// Decode from raw bytes
    ///
    /// # Errors
    /// Returns `ContractError::Decode` on malformed or mismatched JSON
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ContractError> {
        serde_json::from_slice(bytes).map_err(|source| ContractError::Decode { source })
    }

    /// Decode from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ContractError> {
        serde_json::from_reader(reader).map_err(|source| ContractError::Decode { source })
    }

    /// Number of records in a category
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Images => self.images.len(),
            Category::Nodes => self.nodes.len(),
            Category::Insights => self.test_platform_insights.len(),
            Category::Leases => self.leases.len(),
            Category::Builds => self.openshift_builds.len(),
            Category::Pods => self.pods.len(),
            Category::Events => self.events.len(),
        }
    }

    /// Whether every category is empty
    pub fn is_empty(&self) -> bool {
        Category::DISPATCH_ORDER
            .iter()
            .all(|&category| self.len(category) == 0)
    }

    /// Record counts per category, in dispatch order
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::DISPATCH_ORDER
            .iter()
            .map(|&category| (category, self.len(category)))
            .collect()
    }

    /// Total records across all categories
    pub fn total_records(&self) -> usize {
        self.category_counts().iter().map(|(_, n)| n).sum()
    }
}
