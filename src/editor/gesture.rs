use crate::foundation::core::{Bounds, Size};
use crate::foundation::error::{PrintcompError, PrintcompResult};
use crate::layout::geometry::{
    VerticalClamp, clamp_center_to_bounds, denormalize, normalize, rotated_half_extents,
};
use crate::layout::snap::{Guide, snap_to_guides};
use crate::scene::layer::{Layer, TextLayer};
use crate::scene::placement::PlacementSpec;

/// How a layer's on-screen size follows from its placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Footprint {
    /// Height is `width * aspect_ratio`.
    Image { aspect_ratio: f64 },
    /// Text extents per pixel of font size, as measured by [`crate::TextMeasurer`].
    Text {
        em_width: f64,
        em_height: f64,
        base_percent_of_width: f64,
    },
}

impl Footprint {
    /// Pixel size of `layer` drawn inside `bounds`.
    pub fn size_in(&self, bounds: Bounds, layer: &Layer) -> Size {
        match *self {
            Self::Image { aspect_ratio } => {
                let w = layer.placement().width_fraction * bounds.width;
                Size::new(w, w * aspect_ratio)
            }
            Self::Text {
                em_width,
                em_height,
                base_percent_of_width,
            } => {
                let scale = match layer {
                    Layer::Text(t) => t.scale_percent,
                    Layer::Image(_) => TextLayer::DEFAULT_SCALE_PERCENT,
                };
                let px = bounds.width * base_percent_of_width / 100.0 * scale / 100.0;
                Size::new(em_width * px, em_height * px)
            }
        }
    }
}

/// One discrete editor input.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gesture {
    /// Move by a pixel delta in safe-zone space.
    Drag { dx: f64, dy: f64 },
    /// Multiply the size (image width, or text scale).
    Scale { factor: f64 },
    Rotate { delta_degrees: f64 },
    SetOpacity { percent: f64 },
    /// Back to the centered default.
    Reset,
}

/// Interactive limits, shared by the editor and [`crate::CompositorConfig`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    pub snap_px: f64,
    /// Interactive rotation is limited to `[-limit, limit]`.
    pub rotation_limit_degrees: f64,
    pub min_width_fraction: f64,
    pub max_width_fraction: f64,
    pub min_scale_percent: f64,
    pub max_scale_percent: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            snap_px: 8.0,
            rotation_limit_degrees: 45.0,
            min_width_fraction: 0.05,
            max_width_fraction: 1.0,
            min_scale_percent: 10.0,
            max_scale_percent: 400.0,
        }
    }
}

impl EditorSettings {
    pub fn validate(&self) -> PrintcompResult<()> {
        let finite_nonneg = [
            ("snapPx", self.snap_px),
            ("rotationLimitDegrees", self.rotation_limit_degrees),
        ];
        for (name, v) in finite_nonneg {
            if !v.is_finite() || v < 0.0 {
                return Err(PrintcompError::invalid_input(format!(
                    "editor.{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if self.rotation_limit_degrees > 180.0 {
            return Err(PrintcompError::invalid_input(
                "editor.rotationLimitDegrees must be <= 180",
            ));
        }
        if !(self.min_width_fraction > 0.0
            && self.min_width_fraction <= self.max_width_fraction
            && self.max_width_fraction <= 1.0)
        {
            return Err(PrintcompError::invalid_input(
                "editor width fractions must satisfy 0 < min <= max <= 1",
            ));
        }
        if !(self.min_scale_percent > 0.0
            && self.min_scale_percent <= self.max_scale_percent
            && self.max_scale_percent.is_finite())
        {
            return Err(PrintcompError::invalid_input(
                "editor scale percents must satisfy 0 < min <= max",
            ));
        }
        Ok(())
    }
}

/// Everything a gesture needs besides the layer itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureContext {
    /// Safe zone in on-screen pixels.
    pub zone: Bounds,
    pub vertical_clamp: VerticalClamp,
    pub snap_px: f64,
    pub rotation_limit_degrees: f64,
    pub min_width_fraction: f64,
    pub max_width_fraction: f64,
    pub min_scale_percent: f64,
    pub max_scale_percent: f64,
}

impl GestureContext {
    pub fn new(zone: Bounds) -> Self {
        Self::with_settings(zone, &EditorSettings::default(), VerticalClamp::default())
    }

    pub fn with_settings(zone: Bounds, s: &EditorSettings, vertical_clamp: VerticalClamp) -> Self {
        Self {
            zone,
            vertical_clamp,
            snap_px: s.snap_px,
            rotation_limit_degrees: s.rotation_limit_degrees,
            min_width_fraction: s.min_width_fraction,
            max_width_fraction: s.max_width_fraction,
            min_scale_percent: s.min_scale_percent,
            max_scale_percent: s.max_scale_percent,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureOutcome {
    pub layer: Layer,
    /// Guides to highlight; empty when nothing snapped.
    pub guides: Vec<Guide>,
    /// The gesture asked for a position the layer could not take.
    pub clamped: bool,
}

/// Apply one gesture to `layer`.
///
/// denormalize -> apply delta -> rotated extents -> clamp -> snap -> normalize. The input layer is
/// left untouched.
pub fn apply_gesture(
    layer: &Layer,
    footprint: &Footprint,
    gesture: &Gesture,
    ctx: &GestureContext,
) -> PrintcompResult<GestureOutcome> {
    let zone = ctx.zone;
    let mut next = layer.clone();
    let p = *layer.placement();
    let (mut x, mut y) = denormalize(p.center_x, p.center_y, zone);

    match *gesture {
        Gesture::Drag { dx, dy } => {
            finite("dx", dx)?;
            finite("dy", dy)?;
            x += dx;
            y += dy;
        }
        Gesture::Scale { factor } => {
            finite("factor", factor)?;
            if factor <= 0.0 {
                return Err(PrintcompError::invalid_input(format!(
                    "scale factor must be > 0, got {factor}"
                )));
            }
            match &mut next {
                Layer::Image(img) => {
                    img.placement.width_fraction = (img.placement.width_fraction * factor)
                        .clamp(ctx.min_width_fraction, ctx.max_width_fraction);
                }
                Layer::Text(t) => {
                    t.scale_percent = (t.scale_percent * factor)
                        .clamp(ctx.min_scale_percent, ctx.max_scale_percent);
                }
            }
        }
        Gesture::Rotate { delta_degrees } => {
            finite("deltaDegrees", delta_degrees)?;
            let limit = ctx.rotation_limit_degrees;
            let pm = next.placement_mut();
            pm.rotation_degrees = (pm.rotation_degrees + delta_degrees).clamp(-limit, limit);
        }
        Gesture::SetOpacity { percent } => {
            finite("percent", percent)?;
            next.placement_mut().opacity_percent = percent.clamp(0.0, 100.0).round() as u8;
        }
        Gesture::Reset => {
            *next.placement_mut() = PlacementSpec::default();
            if let Layer::Text(t) = &mut next {
                t.scale_percent = TextLayer::DEFAULT_SCALE_PERCENT;
            }
            let c = zone.center();
            (x, y) = (c.x, c.y);
        }
    }

    let size = footprint.size_in(zone, &next);
    let rotation = next.placement().rotation_degrees;
    let (hw, hh) = rotated_half_extents(size.width, size.height, rotation);

    let clamp = clamp_center_to_bounds(x, y, hw, hh, zone, ctx.vertical_clamp);
    let (sx, sy, guides) = if clamp.degenerate {
        (clamp.x, clamp.y, Vec::new())
    } else {
        let snap = snap_to_guides(clamp.x, clamp.y, hw, hh, zone, ctx.snap_px);
        (snap.x, snap.y, snap.guides)
    };

    let (nx, ny) = normalize(sx, sy, zone);
    let pm = next.placement_mut();
    pm.center_x = nx.clamp(0.0, 1.0);
    pm.center_y = ny.clamp(0.0, 1.0);

    Ok(GestureOutcome {
        layer: next,
        guides,
        clamped: clamp.clamped,
    })
}

/// Clamp `layer` into `zone` without snapping. Used when the zone itself changes.
pub fn clamp_layer(
    layer: &Layer,
    footprint: &Footprint,
    zone: Bounds,
    vertical_clamp: VerticalClamp,
) -> (Layer, bool) {
    let mut next = layer.clone();
    let p = *layer.placement();
    let (x, y) = denormalize(p.center_x, p.center_y, zone);
    let size = footprint.size_in(zone, layer);
    let (hw, hh) = rotated_half_extents(size.width, size.height, p.rotation_degrees);
    let clamp = clamp_center_to_bounds(x, y, hw, hh, zone, vertical_clamp);
    if clamp.clamped {
        let (nx, ny) = normalize(clamp.x, clamp.y, zone);
        let pm = next.placement_mut();
        pm.center_x = nx.clamp(0.0, 1.0);
        pm.center_y = ny.clamp(0.0, 1.0);
    }
    (next, clamp.clamped)
}

fn finite(name: &str, v: f64) -> PrintcompResult<()> {
    if !v.is_finite() {
        return Err(PrintcompError::invalid_input(format!(
            "gesture {name} must be finite, got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/editor/gesture.rs"]
mod tests;
