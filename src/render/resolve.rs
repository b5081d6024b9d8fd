use crate::foundation::core::{Affine, Bounds, Point, PrintCanvas, Size, Vec2};
use crate::foundation::math::exact_sin_cos;
use crate::layout::geometry::{VerticalClamp, clamp_center_to_bounds, denormalize, rotated_half_extents};
use crate::scene::placement::PlacementSpec;

/// A layer placed on a concrete canvas, in output pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLayer {
    pub center_x: f64,
    pub center_y: f64,
    /// Unrotated content width in pixels.
    pub width: f64,
    /// Unrotated content height in pixels.
    pub height: f64,
    pub rotation_degrees: f64,
    pub opacity: f32,
    /// The requested center was pulled inside the canvas.
    pub clamped: bool,
    /// The layer is larger than the canvas and was centered.
    pub degenerate: bool,
}

impl ResolvedLayer {
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Maps content space (`0..width x 0..height`) onto the canvas: rotate about the content
    /// center, then move that center to `(center_x, center_y)`.
    pub fn transform(&self) -> Affine {
        let (s, c) = exact_sin_cos(self.rotation_degrees);
        let rotate = Affine::new([c, s, -s, c, 0.0, 0.0]);
        Affine::translate(Vec2::new(self.center_x, self.center_y))
            * rotate
            * Affine::translate(Vec2::new(-self.width * 0.5, -self.height * 0.5))
    }

    /// Axis-aligned box the rotated content covers.
    pub fn footprint(&self) -> Bounds {
        let (hw, hh) = rotated_half_extents(self.width, self.height, self.rotation_degrees);
        Bounds::around(self.center_x, self.center_y, hw, hh)
    }
}

/// Pixel size an image layer is resampled to on a canvas `canvas_width` wide.
///
/// Width follows the placement; height always follows the source aspect ratio.
pub fn image_target_size(width_fraction: f64, canvas_width: u32, source: (u32, u32)) -> (u32, u32) {
    let (sw, sh) = source;
    let w = (width_fraction * f64::from(canvas_width)).round().max(1.0);
    let aspect = if sw == 0 {
        1.0
    } else {
        f64::from(sh) / f64::from(sw)
    };
    let h = (w * aspect).round().max(1.0);
    (saturating_u32(w), saturating_u32(h))
}

/// Raster size to resample content of `logical` size at, with neither side above `max_side`.
///
/// Oversized content is scaled down uniformly; the draw transform stretches it back to `logical`.
pub fn capped_raster_size(logical: (u32, u32), max_side: u32) -> (u32, u32) {
    let (w, h) = logical;
    let max_side = max_side.max(1);
    if w <= max_side && h <= max_side {
        return (w.max(1), h.max(1));
    }
    let k = f64::from(max_side) / f64::from(w.max(h));
    let side = |v: u32| saturating_u32((f64::from(v) * k).round()).clamp(1, max_side);
    (side(w), side(h))
}

/// Longest straight line on `canvas`; no axis of a visible layer needs more pixels than this.
pub fn canvas_diagonal(canvas: PrintCanvas) -> u32 {
    saturating_u32(f64::from(canvas.width).hypot(f64::from(canvas.height)).ceil())
}

fn saturating_u32(v: f64) -> u32 {
    if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        v as u32
    }
}

/// Place content of `size` on a canvas with `canvas` bounds.
///
/// The normalized center is denormalized against the whole canvas (safe zone and print canvas
/// share the same aspect), then clamped so the rotated content stays on the canvas.
pub fn resolve_layer(
    placement: &PlacementSpec,
    size: Size,
    canvas: Bounds,
    vertical_clamp: VerticalClamp,
) -> ResolvedLayer {
    let (x, y) = denormalize(placement.center_x, placement.center_y, canvas);
    let (hw, hh) = rotated_half_extents(size.width, size.height, placement.rotation_degrees);
    let clamp = clamp_center_to_bounds(x, y, hw, hh, canvas, vertical_clamp);
    ResolvedLayer {
        center_x: clamp.x,
        center_y: clamp.y,
        width: size.width,
        height: size.height,
        rotation_degrees: placement.rotation_degrees,
        opacity: placement.opacity(),
        clamped: clamp.clamped,
        degenerate: clamp.degenerate,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/resolve.rs"]
mod tests;
