//! Domain services
//!
//! Scoring of directory children and thumbnail geometry.

mod child_inspector;
mod geometry;

pub use child_inspector::{ChildInspector, MAX_INTERESTINGNESS};
pub use geometry::{DegenerateImage, OverlayPlacement, scaled_dimensions};
