//! Compositor configuration: everything the caller supplies and the compositor only reads.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::decode::SourceLimits;
use crate::assets::text::FontBook;
use crate::editor::gesture::EditorSettings;
use crate::foundation::core::PrintCanvas;
use crate::foundation::error::{PrintcompError, PrintcompResult};
use crate::layout::geometry::VerticalClamp;
use crate::layout::safe_zone::SafeZonePresets;
use crate::quality::QualityThresholds;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextSettings {
    /// Font size at 100% scale, as a percentage of canvas width.
    pub base_percent_of_width: f64,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            base_percent_of_width: 8.0,
        }
    }
}

/// Static configuration, usually loaded once per product from JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositorConfig {
    pub canvas: PrintCanvas,
    pub presets: SafeZonePresets,
    pub quality: QualityThresholds,
    pub limits: SourceLimits,
    pub text: TextSettings,
    pub editor: EditorSettings,
    pub vertical_clamp: VerticalClamp,
    /// Font family -> font file, relative to the config file.
    pub fonts: BTreeMap<String, String>,
    /// Family used when a text layer names an unknown one. Defaults to the first font.
    pub default_font: Option<String>,
}

impl CompositorConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> PrintcompResult<Self> {
        let cfg: Self = serde_json::from_reader(r).map_err(|e| {
            PrintcompError::invalid_input(format!("parse compositor config JSON: {e}"))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PrintcompResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PrintcompError::invalid_input(format!(
                "open compositor config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> PrintcompResult<()> {
        self.canvas.validate()?;
        self.presets.validate()?;
        self.quality.validate()?;
        self.editor.validate()?;
        let base = self.text.base_percent_of_width;
        if !base.is_finite() || base <= 0.0 {
            return Err(PrintcompError::invalid_input(format!(
                "text.basePercentOfWidth must be > 0, got {base}"
            )));
        }
        if self.limits.max_dimension == 0 || self.limits.max_pixels == 0 {
            return Err(PrintcompError::invalid_input(
                "limits.maxDimension and limits.maxPixels must be > 0",
            ));
        }
        if let Some(def) = &self.default_font
            && !self.fonts.keys().any(|k| k.eq_ignore_ascii_case(def.trim()))
        {
            return Err(PrintcompError::invalid_input(format!(
                "defaultFont '{def}' is not listed in fonts"
            )));
        }
        Ok(())
    }

    /// Load the configured fonts; relative paths resolve against `root`.
    pub fn load_fonts(&self, root: &Path) -> PrintcompResult<FontBook> {
        let mut book = FontBook::load(&self.fonts, root)?;
        if let Some(def) = &self.default_font {
            book.set_default(def)?;
        }
        Ok(book)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
