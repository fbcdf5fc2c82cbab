//! Unified configuration loading for Marga.
//!
//! Loads all configuration from a single YAML file.

mod defaults;
mod edits;
mod error;
mod grid;
mod marga;
mod planner;

// Re-export main types
pub use error::ConfigLoadError;
pub use marga::MargaConfig;

// Re-export section types
pub use edits::EditSection;
pub use grid::GridSection;
pub use planner::PlannerSection;
