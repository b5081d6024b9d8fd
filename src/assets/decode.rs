use std::io::Cursor;
use std::sync::Arc;

use crate::foundation::error::{PrintcompError, PrintcompResult, ResourceLimit};
use crate::foundation::math::{clamp_premul_in_place, premultiply_rgba8_in_place};

/// Guardrails for untrusted uploads, enforced before any decode/resize work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceLimits {
    /// Maximum width or height in pixels.
    pub max_dimension: u32,
    /// Maximum `width * height`.
    pub max_pixels: u64,
    /// Maximum encoded payload size.
    pub max_encoded_bytes: u64,
}

impl Default for SourceLimits {
    fn default() -> Self {
        Self {
            max_dimension: 12_000,
            max_pixels: 100_000_000,
            max_encoded_bytes: 64 * 1024 * 1024,
        }
    }
}

impl SourceLimits {
    /// Reject sources whose reported dimensions exceed the limits.
    pub fn check_dimensions(&self, width: u32, height: u32) -> PrintcompResult<()> {
        if width == 0 || height == 0 {
            return Err(PrintcompError::invalid_input(format!(
                "source image has zero size ({width}x{height})"
            )));
        }
        if width > self.max_dimension {
            return Err(PrintcompError::resource_exceeded(
                ResourceLimit::Width,
                u64::from(width),
                u64::from(self.max_dimension),
            ));
        }
        if height > self.max_dimension {
            return Err(PrintcompError::resource_exceeded(
                ResourceLimit::Height,
                u64::from(height),
                u64::from(self.max_dimension),
            ));
        }
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.max_pixels {
            return Err(PrintcompError::resource_exceeded(
                ResourceLimit::PixelCount,
                pixels,
                self.max_pixels,
            ));
        }
        Ok(())
    }

    pub fn check_encoded_len(&self, len: usize) -> PrintcompResult<()> {
        let len = len as u64;
        if len > self.max_encoded_bytes {
            return Err(PrintcompError::resource_exceeded(
                ResourceLimit::EncodedBytes,
                len,
                self.max_encoded_bytes,
            ));
        }
        Ok(())
    }

    fn decoder_limits(&self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = Some(self.max_dimension);
        limits.max_image_height = Some(self.max_dimension);
        // RGBA8 output plus decoder scratch.
        limits.max_alloc = Some(self.max_pixels.saturating_mul(8));
        limits
    }
}

#[derive(Clone, Debug)]
/// Raster in premultiplied RGBA8 form, already resampled to its output size.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// A decodable image layer source.
///
/// `dimensions` must be cheap (header-only); `resample` does the expensive decode + resize and is
/// only called once the guardrails have accepted `dimensions`.
pub trait SourceImage {
    /// Native size in pixels.
    fn dimensions(&self) -> PrintcompResult<(u32, u32)>;

    /// Vector sources rasterize at any size without losing sharpness.
    fn is_vector(&self) -> bool {
        false
    }

    /// Decode and resample to exactly `width x height`, premultiplied.
    fn resample(&self, width: u32, height: u32) -> PrintcompResult<PreparedImage>;
}

/// Check guardrails, then resample. No pixel work happens for rejected sources.
///
/// Raster sources are checked at their native size. Vector sources are checked at the target
/// size, since that is the only raster they ever produce.
#[tracing::instrument(level = "debug", skip(source, limits))]
pub fn prepare_source(
    source: &dyn SourceImage,
    limits: &SourceLimits,
    width: u32,
    height: u32,
) -> PrintcompResult<PreparedImage> {
    if width == 0 || height == 0 {
        return Err(PrintcompError::invalid_input(format!(
            "resample target must be non-empty, got {width}x{height}"
        )));
    }
    let (sw, sh) = source.dimensions()?;
    if source.is_vector() {
        limits.check_dimensions(width, height)?;
    } else {
        limits.check_dimensions(sw, sh)?;
    }
    let out = source.resample(width, height)?;
    if out.width != width || out.height != height {
        return Err(PrintcompError::render(format!(
            "source resampled to {}x{}, expected {width}x{height}",
            out.width, out.height
        )));
    }
    Ok(out)
}

/// Encoded raster bytes (PNG/JPEG/WebP/...) with the header already probed.
#[derive(Clone, Debug)]
pub struct EncodedImage {
    bytes: Arc<Vec<u8>>,
    format: image::ImageFormat,
    width: u32,
    height: u32,
    limits: SourceLimits,
}

impl EncodedImage {
    /// Probe the header of `bytes`. Fails with `InvalidInput` when the format is unknown or the
    /// header is unreadable.
    pub fn from_bytes(bytes: Arc<Vec<u8>>, limits: SourceLimits) -> PrintcompResult<Self> {
        limits.check_encoded_len(bytes.len())?;
        let reader = image::ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| PrintcompError::invalid_input(format!("could not read image: {e}")))?;
        let format = reader.format().ok_or_else(|| {
            PrintcompError::invalid_input("could not read image: unrecognized format")
        })?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| PrintcompError::invalid_input(format!("could not read image: {e}")))?;
        Ok(Self {
            bytes,
            format,
            width,
            height,
            limits,
        })
    }

    pub fn format(&self) -> image::ImageFormat {
        self.format
    }

    fn decode_premul(&self) -> PrintcompResult<image::RgbaImage> {
        let mut reader = image::ImageReader::with_format(Cursor::new(self.bytes.as_slice()), self.format);
        reader.limits(self.limits.decoder_limits());
        let decoded = reader
            .decode()
            .map_err(|e| PrintcompError::invalid_input(format!("could not read image: {e}")))?;
        let mut rgba = decoded.to_rgba8();
        premultiply_rgba8_in_place(&mut rgba);
        Ok(rgba)
    }
}

impl SourceImage for EncodedImage {
    fn dimensions(&self) -> PrintcompResult<(u32, u32)> {
        Ok((self.width, self.height))
    }

    fn resample(&self, width: u32, height: u32) -> PrintcompResult<PreparedImage> {
        let src = self.decode_premul()?;
        let out = if src.dimensions() == (width, height) {
            src
        } else {
            // Filtering premultiplied pixels keeps transparent edges from bleeding color.
            image::imageops::resize(&src, width, height, image::imageops::FilterType::Lanczos3)
        };
        let mut rgba8_premul = out.into_raw();
        clamp_premul_in_place(&mut rgba8_premul);
        Ok(PreparedImage {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }
}

/// Decode a whole image without resampling; used by tests and tooling.
pub fn decode_image(bytes: &[u8], limits: &SourceLimits) -> PrintcompResult<PreparedImage> {
    let src = EncodedImage::from_bytes(Arc::new(bytes.to_vec()), *limits)?;
    let (w, h) = src.dimensions()?;
    prepare_source(&src, limits, w, h)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
