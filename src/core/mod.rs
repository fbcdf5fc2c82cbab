//! Core types shared by the planner.
//!
//! - [`GridCoord`]: integer cell indices (the search state)
//! - [`GridBounds`]: grid extent and row-major indexing

mod bounds;
mod point;

pub use bounds::GridBounds;
pub use point::GridCoord;
