use std::sync::Arc;

use crate::assets::decode::{PreparedImage, SourceImage, SourceLimits};
use crate::foundation::error::{PrintcompError, PrintcompResult};

/// Vector artwork. Rasterized directly at the output size, so it never loses sharpness.
#[derive(Clone, Debug)]
pub struct SvgImage {
    tree: Arc<usvg::Tree>,
}

impl SvgImage {
    pub fn from_bytes(bytes: &[u8], limits: &SourceLimits) -> PrintcompResult<Self> {
        limits.check_encoded_len(bytes.len())?;
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts)
            .map_err(|e| PrintcompError::invalid_input(format!("could not read svg: {e}")))?;
        Ok(Self {
            tree: Arc::new(tree),
        })
    }

    /// Cheap sniff for `<svg` near the start of a payload.
    pub fn sniff(bytes: &[u8]) -> bool {
        let head = &bytes[..bytes.len().min(512)];
        String::from_utf8_lossy(head).contains("<svg")
    }
}

impl SourceImage for SvgImage {
    fn dimensions(&self) -> PrintcompResult<(u32, u32)> {
        fn to_px(v: f32) -> PrintcompResult<u32> {
            if !v.is_finite() || v <= 0.0 {
                return Err(PrintcompError::invalid_input("svg has invalid width/height"));
            }
            Ok((v.ceil() as u32).max(1))
        }

        let size = self.tree.size();
        Ok((to_px(size.width())?, to_px(size.height())?))
    }

    fn is_vector(&self) -> bool {
        true
    }

    fn resample(&self, width: u32, height: u32) -> PrintcompResult<PreparedImage> {
        let rgba8_premul = rasterize_svg_to_premul_rgba8(&self.tree, width, height)?;
        Ok(PreparedImage {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

/// Rasterize an SVG tree stretched to `width x height`. tiny-skia pixmaps are premultiplied.
pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> PrintcompResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PrintcompError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/svg.rs"]
mod tests;
