//! Load summary reporting.

use std::time::Duration;

use contracts::{Category, ObjectLocator};
use dispatcher::DispatchStats;

/// Outcome of one load or export run
#[derive(Debug, Clone)]
pub struct LoadSummary {
    /// Document that was loaded
    pub locator: ObjectLocator,

    /// Per-category dispatch results
    pub stats: DispatchStats,

    /// Wall time from fetch to last write
    pub duration: Duration,
}

impl LoadSummary {
    pub fn new(locator: ObjectLocator, stats: DispatchStats, duration: Duration) -> Self {
        Self {
            locator,
            stats,
            duration,
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n📊 {}", self.locator);
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Rows written: {}", self.stats.total_rows());

        let last = Category::DISPATCH_ORDER.len() - 1;
        println!("   └─ Categories");
        for (i, category) in Category::DISPATCH_ORDER.iter().enumerate() {
            let prefix = if i == last { "└─" } else { "├─" };
            match self.stats.rows(*category) {
                Some(rows) => println!(
                    "      {} {:<9} → {} ({} rows)",
                    prefix,
                    category,
                    category.destination(),
                    rows
                ),
                None => println!("      {} {:<9} (empty, skipped)", prefix, category),
            }
        }
        println!();
    }
}
