//! Destination table schema model
//!
//! Describes the columns a category's destination needs. Union records carry
//! a static description; pass-through records infer one from the batch.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
    /// Open-ended key/value structure
    Json,
}

/// Column mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldMode {
    #[default]
    Nullable,
    Required,
    Repeated,
}

/// Single column description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub mode: FieldMode,
}

impl FieldSchema {
    /// Nullable column
    pub fn nullable(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            mode: FieldMode::Nullable,
        }
    }

    /// Repeated column
    pub fn repeated(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            mode: FieldMode::Repeated,
        }
    }
}

/// Table schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub fields: Vec<FieldSchema>,
}

impl TableSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Look up a column by name
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Infer a schema from a batch of JSON objects.
    ///
    /// Columns appear in first-seen order and are never `REQUIRED`.
    pub fn infer<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Map<String, Value>>,
    {
        let mut order: Vec<(String, Observed)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for row in rows {
            for (key, value) in row {
                let seen = observe(value);
                match index.get(key) {
                    Some(&i) => order[i].1 = merge(order[i].1, seen),
                    None => {
                        index.insert(key.clone(), order.len());
                        order.push((key.clone(), seen));
                    }
                }
            }
        }

        let fields = order
            .into_iter()
            .map(|(name, seen)| match seen {
                Observed::Null => FieldSchema::nullable(name, FieldType::String),
                Observed::Scalar(t) => FieldSchema::nullable(name, t),
                Observed::Repeated(t) => FieldSchema::repeated(name, t),
                Observed::Json => FieldSchema::nullable(name, FieldType::Json),
            })
            .collect();

        Self { fields }
    }
}

/// Record shapes that can describe their destination schema
pub trait TableShape: Serialize + Sized {
    /// Schema for a batch of records of this shape
    fn table_schema(records: &[Self]) -> TableSchema;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Observed {
    Null,
    Scalar(FieldType),
    Repeated(FieldType),
    Json,
}

fn observe(value: &Value) -> Observed {
    match value {
        Value::Null => Observed::Null,
        Value::Bool(_) => Observed::Scalar(FieldType::Boolean),
        Value::Number(n) if n.is_i64() || n.is_u64() => Observed::Scalar(FieldType::Integer),
        Value::Number(_) => Observed::Scalar(FieldType::Float),
        Value::String(s) if DateTime::parse_from_rfc3339(s).is_ok() => {
            Observed::Scalar(FieldType::Timestamp)
        }
        Value::String(_) => Observed::Scalar(FieldType::String),
        Value::Object(_) => Observed::Json,
        Value::Array(items) => observe_array(items),
    }
}

// Repeated columns cannot hold nulls or nested values.
fn observe_array(items: &[Value]) -> Observed {
    let mut element = Observed::Null;
    for item in items {
        match observe(item) {
            Observed::Scalar(t) => element = merge(element, Observed::Scalar(t)),
            _ => return Observed::Json,
        }
    }
    match element {
        Observed::Scalar(t) => Observed::Repeated(t),
        Observed::Null => Observed::Null,
        _ => Observed::Json,
    }
}

fn merge(a: Observed, b: Observed) -> Observed {
    match (a, b) {
        (Observed::Null, other) | (other, Observed::Null) => other,
        (Observed::Scalar(x), Observed::Scalar(y)) => {
            widen(x, y).map_or(Observed::Json, Observed::Scalar)
        }
        (Observed::Repeated(x), Observed::Repeated(y)) => {
            widen(x, y).map_or(Observed::Json, Observed::Repeated)
        }
        _ => Observed::Json,
    }
}

fn widen(a: FieldType, b: FieldType) -> Option<FieldType> {
    match (a, b) {
        _ if a == b => Some(a),
        (FieldType::Integer, FieldType::Float) | (FieldType::Float, FieldType::Integer) => {
            Some(FieldType::Float)
        }
        (FieldType::Timestamp, FieldType::String) | (FieldType::String, FieldType::Timestamp) => {
            Some(FieldType::String)
        }
        _ => None,
    }
}
