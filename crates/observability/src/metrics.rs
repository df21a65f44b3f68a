//! Dispatch metrics
//!
//! Counters are emitted through the `metrics` facade; without an installed
//! recorder they are no-ops.

use contracts::Category;
use metrics::counter;

/// Records written for one category by one sink
pub fn record_records_written(sink: &str, category: Category, count: usize) {
    counter!(
        "ci_metrics_records_written_total",
        "sink" => sink.to_string(),
        "category" => category.label()
    )
    .increment(count as u64);
}

/// Category skipped because it was empty
pub fn record_category_skipped(sink: &str, category: Category) {
    counter!(
        "ci_metrics_categories_skipped_total",
        "sink" => sink.to_string(),
        "category" => category.label()
    )
    .increment(1);
}

/// Dispatch aborted at this category
pub fn record_dispatch_failure(sink: &str, category: Category) {
    counter!(
        "ci_metrics_dispatch_failures_total",
        "sink" => sink.to_string(),
        "category" => category.label()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_records_written("warehouse", Category::Pods, 3);
        record_category_skipped("file", Category::Events);
        record_dispatch_failure("warehouse", Category::Leases);
    }
}
