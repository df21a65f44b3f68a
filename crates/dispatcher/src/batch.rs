//! CategoryBatch - one category's rows plus the schema they are written with

use contracts::{Category, MetricsDocument, TableSchema, TableShape};
use serde_json::Value;

/// Rows of a single category, ready for a sink
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBatch {
    pub category: Category,
    pub schema: TableSchema,
    pub rows: Vec<Value>,
}

impl CategoryBatch {
    /// Convert one category of the document into rows.
    ///
    /// Unset fields are omitted from every row.
    ///
    /// # Errors
    /// Returns the serializer error for a record that cannot become JSON
    pub fn extract(document: &MetricsDocument, category: Category) -> Result<Self, serde_json::Error> {
        match category {
            Category::Images => Self::from_records(category, &document.images),
            Category::Nodes => Self::from_records(category, &document.nodes),
            Category::Insights => Self::from_records(category, &document.test_platform_insights),
            Category::Leases => Self::from_records(category, &document.leases),
            Category::Builds => Self::from_records(category, &document.openshift_builds),
            Category::Pods => Self::from_records(category, &document.pods),
            Category::Events => Self::from_records(category, &document.events),
        }
    }

    fn from_records<R: TableShape>(category: Category, records: &[R]) -> Result<Self, serde_json::Error> {
        let rows = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            category,
            schema: R::table_schema(records),
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Destination name for this batch
    pub fn destination(&self) -> &'static str {
        self.category.destination()
    }
}
