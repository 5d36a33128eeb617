//! Geometry module - fact-level reasoning over incidence
//!
//! Pure checks and merges. No search state lives here.

pub mod normalize;
pub mod constructions;
pub mod check;

pub use normalize::{equal_pair, equal_triangle, equivalent_parts, parts};
pub use constructions::Combine;
pub use check::Detect;
