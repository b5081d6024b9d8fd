use std::io::Cursor;
use std::path::Path;

use crate::foundation::error::{PrintcompError, PrintcompResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A rendered print file as RGBA8 pixels.
///
/// Compositor output is premultiplied; the flag keeps that explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct PrintRaster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl PrintRaster {
    /// A fully transparent raster.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
            premultiplied: true,
        }
    }

    /// RGBA at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixels, as image files expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut out);
        }
        out
    }

    fn to_image(&self) -> PrintcompResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_straight_rgba8()).ok_or_else(
            || {
                PrintcompError::render(format!(
                    "raster buffer does not match {}x{}",
                    self.width, self.height
                ))
            },
        )
    }

    /// Encode as PNG. The pixel-density chunk is left to the caller's print pipeline.
    pub fn encode_png(&self) -> PrintcompResult<Vec<u8>> {
        let img = self.to_image()?;
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| PrintcompError::render(format!("png encode failed: {e}")))?;
        Ok(buf)
    }

    /// Write a PNG file, creating parent directories.
    pub fn save_png(&self, path: &Path) -> PrintcompResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                PrintcompError::Other(anyhow::anyhow!(
                    "create output dir '{}': {e}",
                    parent.display()
                ))
            })?;
        }
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|e| {
            PrintcompError::Other(anyhow::anyhow!("write png '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
