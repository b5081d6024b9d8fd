use crate::foundation::error::{PrintcompError, PrintcompResult};

pub use kurbo::{Affine, Point, Vec2};

/// Axis-aligned rectangle in some pixel space (screen or print).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds anchored at the origin.
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Return `true` when the rectangle has no usable area.
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Return `true` when `other` lies fully inside `self`, with `eps` slack on every edge.
    pub fn contains_bounds(self, other: Bounds, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }

    /// Rectangle of `2*half_w x 2*half_h` centered on `(cx, cy)`.
    pub fn around(cx: f64, cy: f64, half_w: f64, half_h: f64) -> Self {
        Self::new(cx - half_w, cy - half_h, half_w * 2.0, half_h * 2.0)
    }
}

impl From<Bounds> for kurbo::Rect {
    fn from(b: Bounds) -> Self {
        kurbo::Rect::new(b.x, b.y, b.right(), b.bottom())
    }
}

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Fixed physical output target: pixel dimensions at a fixed DPI.
///
/// Constant for every order of a given product; never derived from the source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PrintCanvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Dots per inch the canvas is printed at.
    pub dpi: u32,
}

impl PrintCanvas {
    /// 12"x16" direct-to-garment print area at 300 DPI.
    pub const DTG_12X16: Self = Self {
        width: 3600,
        height: 4800,
        dpi: 300,
    };

    pub fn new(width: u32, height: u32, dpi: u32) -> PrintcompResult<Self> {
        let c = Self { width, height, dpi };
        c.validate()?;
        Ok(c)
    }

    pub fn validate(&self) -> PrintcompResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PrintcompError::invalid_input(
                "canvas width/height must be > 0",
            ));
        }
        if self.dpi == 0 {
            return Err(PrintcompError::invalid_input("canvas dpi must be > 0"));
        }
        // vello_cpu surfaces are addressed with u16 coordinates.
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(PrintcompError::invalid_input(format!(
                "canvas {}x{} exceeds the {}px raster limit",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// The whole canvas as placement bounds.
    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(f64::from(self.width), f64::from(self.height))
    }

    /// Physical size in inches.
    pub fn inches(&self) -> (f64, f64) {
        let dpi = f64::from(self.dpi.max(1));
        (f64::from(self.width) / dpi, f64::from(self.height) / dpi)
    }

    /// Same aspect ratio scaled to `width` pixels, for on-screen previews.
    ///
    /// DPI is scaled too so the preview still describes the same physical area.
    pub fn scaled_to_width(&self, width: u32) -> PrintcompResult<Self> {
        if width == 0 {
            return Err(PrintcompError::invalid_input("preview width must be > 0"));
        }
        let k = f64::from(width) / f64::from(self.width.max(1));
        let height = (f64::from(self.height) * k).round().max(1.0) as u32;
        let dpi = (f64::from(self.dpi) * k).round().max(1.0) as u32;
        Self::new(width, height, dpi)
    }
}

impl Default for PrintCanvas {
    fn default() -> Self {
        Self::DTG_12X16
    }
}

/// Straight (non-premultiplied) RGBA8 color, as authored by users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn parse_hex(s: &str) -> PrintcompResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || PrintcompError::invalid_input(format!("invalid hex color '{s}'"));
        if !hex.is_ascii() {
            return Err(bad());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Self::opaque(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(bad()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
