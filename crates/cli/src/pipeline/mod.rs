//! Pipeline orchestration module.

mod orchestrator;
mod stats;

pub use orchestrator::{run_export, run_load};
pub use stats::LoadSummary;
