//! Day-column layout.
//!
//! This module provides:
//! - The time to row-unit scale used for vertical placement
//! - The greedy overlap layout that assigns each item a width and offset

mod engine;
mod scale;

pub use engine::{ItemGeometry, OverlapLayoutEngine};
pub use scale::{RowScale, DEFAULT_ROW_UNITS_PER_HOUR};
