//! Pure placement math shared by the interactive editor and the print renderer.
//!
//! Every function here is stateless and environment-agnostic: both call sites must agree on the
//! exact same numbers, or what the user sees is not what gets printed.

use crate::foundation::core::{Bounds, Point};
use crate::foundation::math::exact_sin_cos;

/// Upper bound used when clamping a center vertically.
///
/// The reference editor clamps `y` to `bounds.y + bounds.height` (no half-height subtracted),
/// which lets a layer hang below the safe zone. `Legacy` keeps that behaviour for compatibility
/// with stored jobs; `Contained` mirrors the horizontal clamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalClamp {
    #[default]
    Legacy,
    Contained,
}

/// Result of [`clamp_center_to_bounds`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClampOutcome {
    pub x: f64,
    pub y: f64,
    /// The requested center had to move.
    pub clamped: bool,
    /// The layer cannot fit at any position; `(x, y)` is the bounds center.
    pub degenerate: bool,
}

impl ClampOutcome {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Half-width/half-height of the axis-aligned box around a `width x height` rectangle rotated by
/// `angle_degrees` about its center.
pub fn rotated_half_extents(width: f64, height: f64, angle_degrees: f64) -> (f64, f64) {
    let (s, c) = exact_sin_cos(angle_degrees);
    let (s, c) = (s.abs(), c.abs());
    (
        0.5 * (c * width + s * height),
        0.5 * (s * width + c * height),
    )
}

/// Pull a center point so a box with the given half-extents stays inside `bounds`.
///
/// If the box is larger than `bounds` on either axis, the bounds center is returned and the
/// outcome is flagged `degenerate`; a layer is never left partially inside.
pub fn clamp_center_to_bounds(
    center_x: f64,
    center_y: f64,
    half_w: f64,
    half_h: f64,
    bounds: Bounds,
    vertical: VerticalClamp,
) -> ClampOutcome {
    if 2.0 * half_w > bounds.width || 2.0 * half_h > bounds.height {
        let c = bounds.center();
        return ClampOutcome {
            x: c.x,
            y: c.y,
            clamped: true,
            degenerate: true,
        };
    }

    let min_x = bounds.x + half_w;
    let max_x = bounds.right() - half_w;
    let min_y = bounds.y + half_h;
    let max_y = match vertical {
        VerticalClamp::Legacy => bounds.bottom(),
        VerticalClamp::Contained => bounds.bottom() - half_h,
    };

    let x = clamp_nan_to(center_x, min_x, max_x, bounds.center().x);
    let y = clamp_nan_to(center_y, min_y, max_y, bounds.center().y);
    ClampOutcome {
        x,
        y,
        clamped: x != center_x || y != center_y,
        degenerate: false,
    }
}

fn clamp_nan_to(v: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if v.is_nan() {
        return fallback;
    }
    v.max(min).min(max)
}

/// Map a point in `bounds`' pixel space into `[0,1] x [0,1]`.
///
/// Zero-size bounds map every point to `0.5`.
pub fn normalize(x: f64, y: f64, bounds: Bounds) -> (f64, f64) {
    let nx = if bounds.width != 0.0 && bounds.width.is_finite() {
        (x - bounds.x) / bounds.width
    } else {
        0.5
    };
    let ny = if bounds.height != 0.0 && bounds.height.is_finite() {
        (y - bounds.y) / bounds.height
    } else {
        0.5
    };
    (nx, ny)
}

/// Inverse of [`normalize`].
pub fn denormalize(nx: f64, ny: f64, bounds: Bounds) -> (f64, f64) {
    (bounds.x + nx * bounds.width, bounds.y + ny * bounds.height)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
