//! Per-run dispatch statistics

use contracts::Category;

/// Outcome of one successful dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Written categories with their row counts, in dispatch order
    written: Vec<(Category, usize)>,
    /// Categories skipped because they were empty
    skipped: Vec<Category>,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_written(&mut self, category: Category, rows: usize) {
        self.written.push((category, rows));
    }

    pub(crate) fn record_skipped(&mut self, category: Category) {
        self.skipped.push(category);
    }

    /// Written categories and row counts
    pub fn written(&self) -> &[(Category, usize)] {
        &self.written
    }

    /// Skipped categories
    pub fn skipped(&self) -> &[Category] {
        &self.skipped
    }

    /// Rows written for one category, `None` if it was skipped
    pub fn rows(&self, category: Category) -> Option<usize> {
        self.written
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, rows)| *rows)
    }

    /// Total rows written across all categories
    pub fn total_rows(&self) -> usize {
        self.written.iter().map(|(_, rows)| rows).sum()
    }
}
