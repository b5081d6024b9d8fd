//! Placement geometry: rotation extents, clamping, snapping, normalization and safe zones.

pub mod geometry;
pub mod safe_zone;
pub mod snap;
