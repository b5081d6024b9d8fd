//! Print-sharpness diagnostics. Advisory only: low-PPI prints are still produced.

use crate::foundation::error::{PrintcompError, PrintcompResult};

/// PPI thresholds for [`QualityStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityThresholds {
    pub ok_ppi: u32,
    pub warn_ppi: u32,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            ok_ppi: 300,
            warn_ppi: 200,
        }
    }
}

impl QualityThresholds {
    pub fn validate(&self) -> PrintcompResult<()> {
        if self.warn_ppi > self.ok_ppi {
            return Err(PrintcompError::invalid_input(format!(
                "warnPpi ({}) must not exceed okPpi ({})",
                self.warn_ppi, self.ok_ppi
            )));
        }
        Ok(())
    }

    pub fn classify(&self, effective_ppi: u32) -> QualityStatus {
        if effective_ppi >= self.ok_ppi {
            QualityStatus::Ok
        } else if effective_ppi >= self.warn_ppi {
            QualityStatus::Warn
        } else {
            QualityStatus::Low
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    Low,
    Warn,
    Ok,
}

/// Source pixels per printed inch, unrounded.
pub fn effective_ppi_exact(source_width: u32, print_dpi: u32, output_width: u32) -> f64 {
    if output_width == 0 {
        return 0.0;
    }
    f64::from(source_width) * f64::from(print_dpi) / f64::from(output_width)
}

/// `round(source_width * print_dpi / output_width)`.
pub fn effective_ppi(source_width: u32, print_dpi: u32, output_width: u32) -> u32 {
    let ppi = effective_ppi_exact(source_width, print_dpi, output_width).round();
    if ppi >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        ppi as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    #[serde(rename = "effectivePPI")]
    pub effective_ppi: u32,
    pub status: QualityStatus,
    /// A requested placement had to be pulled inside the canvas.
    pub clamped: bool,
}

impl QualityReport {
    pub fn from_ppi(effective_ppi: u32, thresholds: &QualityThresholds, clamped: bool) -> Self {
        Self {
            effective_ppi,
            status: thresholds.classify(effective_ppi),
            clamped,
        }
    }

    /// Report for content with no resolution limit (text, vector art).
    pub fn sharp(print_dpi: u32, clamped: bool) -> Self {
        Self {
            effective_ppi: print_dpi,
            status: QualityStatus::Ok,
            clamped,
        }
    }

    /// Combine per-layer reports: the blurriest layer decides, any clamp counts.
    pub fn worst_of(reports: impl IntoIterator<Item = Self>) -> Option<Self> {
        reports.into_iter().reduce(|a, b| {
            let worst = if (b.status, b.effective_ppi) < (a.status, a.effective_ppi) {
                b
            } else {
                a
            };
            Self {
                clamped: a.clamped || b.clamped,
                ..worst
            }
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/quality/quality.rs"]
mod tests;
