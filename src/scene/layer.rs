use crate::assets::source::SourceRef;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PrintcompError, PrintcompResult};
use crate::scene::placement::PlacementSpec;

/// A raster or vector image placed on the print area.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLayer {
    pub placement: PlacementSpec,
    pub source: SourceRef,
    /// Intrinsic height / width as known to the caller. The decoded source wins at render time.
    pub aspect_ratio: Option<f64>,
}

/// A single line of text placed on the print area.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayer {
    pub placement: PlacementSpec,
    pub text: String,
    pub font_family: String,
    pub fill: Rgba8,
    /// Percentage applied to the configured base font size.
    pub scale_percent: f64,
}

impl TextLayer {
    pub const DEFAULT_SCALE_PERCENT: f64 = 100.0;

    /// Font size in pixels for a canvas `canvas_width` wide.
    pub fn font_px(&self, canvas_width: f64, base_percent_of_width: f64) -> f64 {
        canvas_width * base_percent_of_width / 100.0 * self.scale_percent / 100.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    Image(ImageLayer),
    Text(TextLayer),
}

impl Layer {
    pub fn placement(&self) -> &PlacementSpec {
        match self {
            Self::Image(l) => &l.placement,
            Self::Text(l) => &l.placement,
        }
    }

    pub fn placement_mut(&mut self) -> &mut PlacementSpec {
        match self {
            Self::Image(l) => &mut l.placement,
            Self::Text(l) => &mut l.placement,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Text(_) => "text",
        }
    }

    pub fn validate(&self) -> PrintcompResult<()> {
        match self {
            Self::Image(l) => {
                l.placement.validate()?;
                if let Some(ar) = l.aspect_ratio
                    && (!ar.is_finite() || ar <= 0.0)
                {
                    return Err(PrintcompError::invalid_input(format!(
                        "aspectRatio must be > 0, got {ar}"
                    )));
                }
                Ok(())
            }
            Self::Text(l) => {
                // widthFraction does not size text, only the position/rotation/opacity apply.
                let mut p = l.placement;
                p.width_fraction = 1.0;
                p.validate()?;
                if l.text.trim().is_empty() {
                    return Err(PrintcompError::invalid_input("text layer has empty text"));
                }
                if !l.scale_percent.is_finite() || l.scale_percent <= 0.0 {
                    return Err(PrintcompError::invalid_input(format!(
                        "scalePercent must be > 0, got {}",
                        l.scale_percent
                    )));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layer.rs"]
mod tests;
