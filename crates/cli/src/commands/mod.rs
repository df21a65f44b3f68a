//! Command implementations.

mod info;
mod load;
mod settings;
mod trigger;

pub use info::run_info;
pub use load::run_load;
pub use trigger::run_trigger;
