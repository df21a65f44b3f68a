//! Category record shapes
//!
//! Leases and images arrive from two producer-side event kinds each and are
//! flattened into one union record. Unset fields are omitted on output so
//! consumers can tell which kind produced a record. Exclusivity between the
//! two field sets is not enforced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{FieldSchema, FieldType, TableSchema, TableShape};

/// Union of lease acquisition and lease release events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaseEventUnion {
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub lease_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_lease_name: Option<String>,

    /// Acquisition side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_duration_seconds: Option<f64>,

    /// Release side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_duration_seconds: Option<f64>,

    /// Acquisition side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leases_remaining_at_acquisition: Option<i64>,

    /// Release side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leases_available_at_release: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub leases_total: Option<i64>,

    /// Release side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Producer-side event kind a lease record was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseEventKind {
    Acquisition,
    Release,
    /// Both field sets populated
    Ambiguous,
    /// Neither field set populated
    Unknown,
}

impl LeaseEventUnion {
    /// Derive the producer kind from which field set is populated
    pub fn kind(&self) -> LeaseEventKind {
        let acquisition = self.acquisition_duration_seconds.is_some()
            || self.leases_remaining_at_acquisition.is_some();
        let release = self.release_duration_seconds.is_some()
            || self.leases_available_at_release.is_some()
            || self.released.is_some();

        match (acquisition, release) {
            (true, false) => LeaseEventKind::Acquisition,
            (false, true) => LeaseEventKind::Release,
            (true, true) => LeaseEventKind::Ambiguous,
            (false, false) => LeaseEventKind::Unknown,
        }
    }
}

impl TableShape for LeaseEventUnion {
    fn table_schema(_records: &[Self]) -> TableSchema {
        use FieldType::*;
        TableSchema::new(vec![
            FieldSchema::nullable("name", String),
            FieldSchema::nullable("slice", String),
            FieldSchema::nullable("region", String),
            FieldSchema::nullable("raw_lease_name", String),
            FieldSchema::nullable("acquisition_duration_seconds", Float),
            FieldSchema::nullable("release_duration_seconds", Float),
            FieldSchema::nullable("leases_remaining_at_acquisition", Integer),
            FieldSchema::nullable("leases_available_at_release", Integer),
            FieldSchema::nullable("leases_total", Integer),
            FieldSchema::nullable("released", Boolean),
            FieldSchema::nullable("error", String),
            FieldSchema::nullable("timestamp", Timestamp),
        ])
    }
}

/// Union of image stream events and tag import events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageEventUnion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_stream_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_tag_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_image_kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Stream side, open-ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_stream_details: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Producer-side event kind an image record was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEventKind {
    ImageStream,
    TagImport,
    Ambiguous,
    Unknown,
}

impl ImageEventUnion {
    /// Derive the producer kind from which field set is populated
    pub fn kind(&self) -> ImageEventKind {
        let stream = self.full_name.is_some() || self.image_stream_details.is_some();
        let tag = self.tag_name.is_some()
            || self.full_tag_name.is_some()
            || self.source_image.is_some()
            || self.source_image_kind.is_some()
            || self.retry_count.is_some();

        match (stream, tag) {
            (true, false) => ImageEventKind::ImageStream,
            (false, true) => ImageEventKind::TagImport,
            (true, true) => ImageEventKind::Ambiguous,
            (false, false) => ImageEventKind::Unknown,
        }
    }
}

impl TableShape for ImageEventUnion {
    fn table_schema(_records: &[Self]) -> TableSchema {
        use FieldType::*;
        TableSchema::new(vec![
            FieldSchema::nullable("namespace", String),
            FieldSchema::nullable("image_stream_name", String),
            FieldSchema::nullable("full_name", String),
            FieldSchema::nullable("tag_name", String),
            FieldSchema::nullable("full_tag_name", String),
            FieldSchema::nullable("source_image", String),
            FieldSchema::nullable("source_image_kind", String),
            FieldSchema::nullable("start_time", Timestamp),
            FieldSchema::nullable("completion_time", Timestamp),
            FieldSchema::nullable("duration_seconds", Float),
            FieldSchema::nullable("retry_count", Integer),
            FieldSchema::nullable("success", Boolean),
            FieldSchema::nullable("error", String),
            FieldSchema::nullable("image_stream_details", Json),
            FieldSchema::nullable("additional_context", Json),
            FieldSchema::nullable("timestamp", Timestamp),
        ])
    }
}

/// Define an opaque record routed without inspection
macro_rules! pass_through_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Map<String, Value>);

        impl From<Map<String, Value>> for $name {
            fn from(fields: Map<String, Value>) -> Self {
                Self(fields)
            }
        }

        impl TableShape for $name {
            fn table_schema(records: &[Self]) -> TableSchema {
                TableSchema::infer(records.iter().map(|r| &r.0))
            }
        }
    };
}

pass_through_record!(
    /// Generic CI operator event
    Event
);
pass_through_record!(
    /// Cluster node event
    NodeEvent
);
pass_through_record!(
    /// OpenShift build event
    BuildEvent
);
pass_through_record!(
    /// Pod lifecycle metrics event
    PodLifecycleEvent
);
pass_through_record!(
    /// Test platform insights event
    InsightsEvent
);
