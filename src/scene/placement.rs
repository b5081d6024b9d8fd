use crate::foundation::error::{PrintcompError, PrintcompResult};

/// Where one layer sits inside the normalized print area.
///
/// Resolution-independent: the numbers only acquire pixel meaning against a concrete canvas or
/// safe zone.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSpec {
    /// Center as a fraction of print-area width, `[0, 1]`.
    pub center_x: f64,
    /// Center as a fraction of print-area height, `[0, 1]`.
    pub center_y: f64,
    /// Width as a fraction of print-area width, `(0, 1]`. Ignored for text layers.
    pub width_fraction: f64,
    /// Rotation about the layer center, `[-180, 180]`.
    pub rotation_degrees: f64,
    /// Opacity, `[0, 100]`.
    pub opacity_percent: u8,
}

impl PlacementSpec {
    /// Width used for a fresh editor session.
    pub const DEFAULT_WIDTH_FRACTION: f64 = 0.4;

    /// Centered, unrotated and fully opaque.
    pub fn centered(width_fraction: f64) -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            width_fraction,
            rotation_degrees: 0.0,
            opacity_percent: 100,
        }
    }

    pub fn opacity(&self) -> f32 {
        f32::from(self.opacity_percent.min(100)) / 100.0
    }

    pub fn validate(&self) -> PrintcompResult<()> {
        unit_range("centerX", self.center_x)?;
        unit_range("centerY", self.center_y)?;
        if !self.width_fraction.is_finite() || self.width_fraction <= 0.0 {
            return Err(PrintcompError::invalid_input(format!(
                "widthFraction must be > 0, got {}",
                self.width_fraction
            )));
        }
        if self.width_fraction > 1.0 {
            return Err(PrintcompError::invalid_input(format!(
                "widthFraction must be <= 1, got {}",
                self.width_fraction
            )));
        }
        if !self.rotation_degrees.is_finite() || self.rotation_degrees.abs() > 180.0 {
            return Err(PrintcompError::invalid_input(format!(
                "rotationDegrees must be in [-180, 180], got {}",
                self.rotation_degrees
            )));
        }
        if self.opacity_percent > 100 {
            return Err(PrintcompError::invalid_input(format!(
                "opacityPercent must be in [0, 100], got {}",
                self.opacity_percent
            )));
        }
        Ok(())
    }
}

impl Default for PlacementSpec {
    fn default() -> Self {
        Self::centered(Self::DEFAULT_WIDTH_FRACTION)
    }
}

fn unit_range(name: &str, v: f64) -> PrintcompResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(PrintcompError::invalid_input(format!(
            "{name} must be in [0, 1], got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/placement.rs"]
mod tests;
