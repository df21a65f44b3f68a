//! Category - the fixed set of record groupings in a metrics document

use std::fmt;

/// Record category
///
/// Each category maps to exactly one destination (table or export file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Images,
    Nodes,
    Insights,
    Leases,
    Builds,
    Pods,
    Events,
}

impl Category {
    /// Dispatch order shared by every sink strategy
    pub const DISPATCH_ORDER: [Category; 7] = [
        Category::Images,
        Category::Nodes,
        Category::Insights,
        Category::Leases,
        Category::Builds,
        Category::Pods,
        Category::Events,
    ];

    /// Destination name (table name, export file stem).
    ///
    /// Identical to the document key the category is read from.
    pub const fn destination(self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Nodes => "nodes",
            Category::Insights => "test_platform_insights",
            Category::Leases => "leases",
            Category::Builds => "openshift_builds",
            Category::Pods => "pods",
            Category::Events => "events",
        }
    }

    /// Short label used in logs and error messages
    pub const fn label(self) -> &'static str {
        match self {
            Category::Images => "images",
            Category::Nodes => "nodes",
            Category::Insights => "insights",
            Category::Leases => "leases",
            Category::Builds => "builds",
            Category::Pods => "pods",
            Category::Events => "events",
        }
    }

    /// Export file name for this category
    pub fn export_file_name(self) -> String {
        format!("{}.json", self.destination())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
