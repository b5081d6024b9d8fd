use crate::foundation::core::{Bounds, Size};
use crate::foundation::error::{PrintcompError, PrintcompResult};

/// Height over width of every safe zone: the 12x16 print area.
pub const SAFE_ZONE_ASPECT: f64 = 4.0 / 3.0;

// Proportions of the editor container used until the mockup has loaded.
const FALLBACK_WIDTH_FRACTION: f64 = 0.36;
const FALLBACK_TOP_FRACTION: f64 = 0.22;

/// Garment side a design is printed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl std::str::FromStr for Side {
    type Err = PrintcompError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            other => Err(PrintcompError::invalid_input(format!(
                "unknown side '{other}' (expected 'front' or 'back')"
            ))),
        }
    }
}

/// Calibration of a safe zone, as fractions of the garment mockup's bounding box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeZonePreset {
    pub left_fraction: f64,
    pub top_fraction: f64,
    pub width_fraction: f64,
}

impl SafeZonePreset {
    pub const fn new(left_fraction: f64, top_fraction: f64, width_fraction: f64) -> Self {
        Self {
            left_fraction,
            top_fraction,
            width_fraction,
        }
    }

    pub fn validate(&self) -> PrintcompResult<()> {
        let fields = [
            ("leftFraction", self.left_fraction),
            ("topFraction", self.top_fraction),
            ("widthFraction", self.width_fraction),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(PrintcompError::invalid_input(format!(
                    "safe zone preset {name} must be finite and >= 0, got {v}"
                )));
            }
        }
        if self.width_fraction <= 0.0 {
            return Err(PrintcompError::invalid_input(
                "safe zone preset widthFraction must be > 0",
            ));
        }
        Ok(())
    }
}

/// Per-side calibration presets.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SafeZonePresets {
    pub front: SafeZonePreset,
    pub back: SafeZonePreset,
}

impl SafeZonePresets {
    pub fn for_side(&self, side: Side) -> SafeZonePreset {
        match side {
            Side::Front => self.front,
            Side::Back => self.back,
        }
    }

    pub fn validate(&self) -> PrintcompResult<()> {
        self.front.validate()?;
        self.back.validate()
    }
}

impl Default for SafeZonePresets {
    fn default() -> Self {
        Self {
            front: SafeZonePreset::new(0.30, 0.22, 0.40),
            back: SafeZonePreset::new(0.30, 0.17, 0.40),
        }
    }
}

/// Derive the on-screen safe zone for a garment laid out at `garment`.
///
/// The zone is locked to 3:4. When the preset would spill past the garment's right or bottom
/// edge, the zone shrinks (keeping its ratio) until it fits on both axes at once.
pub fn derive_safe_zone(garment: Bounds, preset: SafeZonePreset) -> Bounds {
    if garment.is_degenerate() {
        let c = garment.center();
        return Bounds::new(c.x, c.y, 0.0, 0.0);
    }

    let x = (garment.x + preset.left_fraction * garment.width).clamp(garment.x, garment.right());
    let y = (garment.y + preset.top_fraction * garment.height).clamp(garment.y, garment.bottom());
    fit_from_origin(
        x,
        y,
        garment.width * preset.width_fraction.max(0.0),
        garment,
    )
}

/// Safe zone used while the mockup's dimensions are still unknown.
///
/// A fixed proportion of the container, so the layout does not jump when the real mockup lands.
pub fn fallback_safe_zone(container: Bounds) -> Bounds {
    if container.is_degenerate() {
        let c = container.center();
        return Bounds::new(c.x, c.y, 0.0, 0.0);
    }
    let width = container.width * FALLBACK_WIDTH_FRACTION;
    let x = container.x + (container.width - width) * 0.5;
    let y = container.y + container.height * FALLBACK_TOP_FRACTION;
    fit_from_origin(x, y, width, container)
}

/// Where a mockup image of `natural` size lands inside `container` when scaled to fit
/// (letterboxed, centered).
pub fn garment_box_in_container(container: Bounds, natural: Size) -> PrintcompResult<Bounds> {
    if natural.is_empty() {
        return Err(PrintcompError::invalid_input(
            "mockup natural size must be > 0",
        ));
    }
    if container.is_degenerate() {
        return Err(PrintcompError::invalid_input(
            "mockup container must have a non-zero size",
        ));
    }
    let k = (container.width / natural.width).min(container.height / natural.height);
    let w = natural.width * k;
    let h = natural.height * k;
    Ok(Bounds::new(
        container.x + (container.width - w) * 0.5,
        container.y + (container.height - h) * 0.5,
        w,
        h,
    ))
}

fn fit_from_origin(x: f64, y: f64, desired_width: f64, outer: Bounds) -> Bounds {
    let avail_w = (outer.right() - x).max(0.0);
    let avail_h = (outer.bottom() - y).max(0.0);

    // Height-constrained first, then width-constrained; the min satisfies both in one step.
    let width = desired_width
        .min(avail_h / SAFE_ZONE_ASPECT)
        .min(avail_w)
        .max(0.0);
    Bounds::new(x, y, width, width * SAFE_ZONE_ASPECT)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/safe_zone.rs"]
mod tests;
