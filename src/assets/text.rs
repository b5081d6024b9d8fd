use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PrintcompError, PrintcompResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font bytes by family name, supplied by the caller.
///
/// The compositor never reaches for system fonts: a print file must render identically on every
/// machine, so the exact font bytes travel with the configuration.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    families: BTreeMap<String, Arc<Vec<u8>>>,
    default_family: Option<String>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `family`. The first family registered becomes the default.
    pub fn insert(&mut self, family: impl Into<String>, bytes: Vec<u8>) {
        let family = family.into();
        let key = family_key(&family);
        if self.default_family.is_none() {
            self.default_family = Some(key.clone());
        }
        self.families.insert(key, Arc::new(bytes));
    }

    pub fn with_font(mut self, family: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(family, bytes);
        self
    }

    /// Load every `family -> path` pair; relative paths resolve against `root`.
    pub fn load(fonts: &BTreeMap<String, String>, root: &Path) -> PrintcompResult<Self> {
        let mut book = Self::new();
        for (family, path) in fonts {
            let p = root.join(path);
            let bytes = std::fs::read(&p).map_err(|e| {
                PrintcompError::invalid_input(format!(
                    "failed to read font '{family}' from '{}': {e}",
                    p.display()
                ))
            })?;
            book.insert(family.clone(), bytes);
        }
        Ok(book)
    }

    pub fn set_default(&mut self, family: &str) -> PrintcompResult<()> {
        let key = family_key(family);
        if !self.families.contains_key(&key) {
            return Err(PrintcompError::invalid_input(format!(
                "default font family '{family}' is not registered"
            )));
        }
        self.default_family = Some(key);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Resolve a family name (case-insensitive), falling back to the default family.
    pub fn resolve(&self, family: &str) -> PrintcompResult<(String, Arc<Vec<u8>>)> {
        let key = family_key(family);
        if let Some(bytes) = self.families.get(&key) {
            return Ok((key, bytes.clone()));
        }
        match &self.default_family {
            Some(def) => {
                tracing::warn!(requested = family, fallback = %def, "font family not registered, using default");
                let bytes = self
                    .families
                    .get(def)
                    .cloned()
                    .ok_or_else(|| PrintcompError::invalid_input("default font family missing"))?;
                Ok((def.clone(), bytes))
            }
            None => Err(PrintcompError::invalid_input(format!(
                "font family '{family}' is not available (no fonts registered)"
            ))),
        }
    }
}

fn family_key(family: &str) -> String {
    family.trim().to_ascii_lowercase()
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    // FontBook key -> family name parley registered the bytes under.
    registered: HashMap<String, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    fn family_name_for(&mut self, key: &str, font_bytes: &[u8]) -> PrintcompResult<String> {
        if let Some(name) = self.registered.get(key) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            PrintcompError::invalid_input(format!("font '{key}' contains no usable font families"))
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PrintcompError::invalid_input("registered font family has no name"))?
            .to_string();
        self.registered.insert(key.to_owned(), family_name.clone());
        Ok(family_name)
    }

    /// Shape and lay out a single block of text at `size_px`.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        font_key: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> PrintcompResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PrintcompError::invalid_input(
                "text size must be finite and > 0",
            ));
        }
        let family_name = self.family_name_for(font_key, font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Text extents per pixel of font size, `(width, height)`.
    ///
    /// Layout scales linearly with font size, so the editor can size text footprints without
    /// re-shaping on every gesture.
    pub(crate) fn measure_em(
        &mut self,
        text: &str,
        font_key: &str,
        font_bytes: &[u8],
    ) -> PrintcompResult<(f64, f64)> {
        const PROBE_PX: f32 = 100.0;
        let layout =
            self.layout_plain(text, font_key, font_bytes, PROBE_PX, TextBrushRgba8::default())?;
        Ok((
            f64::from(layout.width()) / f64::from(PROBE_PX),
            f64::from(layout.height()) / f64::from(PROBE_PX),
        ))
    }
}

/// Measures text for the editor using fonts from a [`FontBook`].
pub struct TextMeasurer<'a> {
    fonts: &'a FontBook,
    engine: TextLayoutEngine,
}

impl<'a> TextMeasurer<'a> {
    pub fn new(fonts: &'a FontBook) -> Self {
        Self {
            fonts,
            engine: TextLayoutEngine::new(),
        }
    }

    /// `(width, height)` of `text` per pixel of font size.
    pub fn em_extent(&mut self, text: &str, family: &str) -> PrintcompResult<(f64, f64)> {
        let (key, bytes) = self.fonts.resolve(family)?;
        self.engine.measure_em(text, &key, &bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
