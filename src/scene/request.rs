use crate::assets::decode::SourceLimits;
use crate::assets::source::SourceRef;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{PrintcompError, PrintcompResult};
use crate::layout::safe_zone::Side;
use crate::scene::layer::{ImageLayer, Layer, TextLayer};
use crate::scene::placement::PlacementSpec;

/// Layer as stored in job records and sent by clients: every field optional.
///
/// Nothing downstream sees this type; [`LayerRecord::into_layer`] turns it into a validated
/// [`Layer`] or fails with `InvalidInput`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayerRecord {
    pub kind: Option<String>,
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub width_fraction: Option<f64>,
    pub rotation_degrees: Option<f64>,
    pub opacity_percent: Option<f64>,
    #[serde(alias = "src", alias = "imageUrl")]
    pub source: Option<String>,
    pub aspect_ratio: Option<f64>,
    pub text: Option<String>,
    pub font_family: Option<String>,
    /// Hex color, `#rrggbb` or `#rrggbbaa`.
    pub fill: Option<String>,
    pub scale_percent: Option<f64>,
}

impl LayerRecord {
    pub fn into_layer(self) -> PrintcompResult<Layer> {
        self.into_layer_with_limits(&SourceLimits::default())
    }

    /// Like [`LayerRecord::into_layer`]; inline sources are bounded by `limits` before decoding.
    pub fn into_layer_with_limits(self, limits: &SourceLimits) -> PrintcompResult<Layer> {
        let kind = self.kind.as_deref().map(str::trim).unwrap_or_default();
        let layer = match kind {
            "image" => Layer::Image(ImageLayer {
                placement: self.placement(Some(required(self.width_fraction, "widthFraction")?))?,
                source: SourceRef::parse_with_limits(&required(self.source, "source")?, limits)?,
                aspect_ratio: self.aspect_ratio,
            }),
            "text" => Layer::Text(TextLayer {
                placement: self.placement(None)?,
                text: required(self.text, "text")?,
                font_family: self.font_family.unwrap_or_default(),
                fill: match self.fill.as_deref() {
                    Some(hex) => Rgba8::parse_hex(hex)?,
                    None => Rgba8::BLACK,
                },
                scale_percent: self.scale_percent.unwrap_or(TextLayer::DEFAULT_SCALE_PERCENT),
            }),
            "" => return Err(missing("kind")),
            other => {
                return Err(PrintcompError::invalid_input(format!(
                    "unknown layer kind '{other}' (expected 'image' or 'text')"
                )));
            }
        };
        layer.validate()?;
        Ok(layer)
    }

    fn placement(&self, width_fraction: Option<f64>) -> PrintcompResult<PlacementSpec> {
        let defaults = PlacementSpec::centered(1.0);
        Ok(PlacementSpec {
            center_x: self.center_x.unwrap_or(defaults.center_x),
            center_y: self.center_y.unwrap_or(defaults.center_y),
            width_fraction: width_fraction.unwrap_or(defaults.width_fraction),
            rotation_degrees: self.rotation_degrees.unwrap_or(defaults.rotation_degrees),
            opacity_percent: match self.opacity_percent {
                Some(v) => opacity_from_f64(v)?,
                None => defaults.opacity_percent,
            },
        })
    }
}

impl From<&Layer> for LayerRecord {
    fn from(layer: &Layer) -> Self {
        let p = layer.placement();
        let mut rec = Self {
            center_x: Some(p.center_x),
            center_y: Some(p.center_y),
            rotation_degrees: Some(p.rotation_degrees),
            opacity_percent: Some(f64::from(p.opacity_percent)),
            ..Self::default()
        };
        match layer {
            Layer::Image(l) => {
                rec.kind = Some("image".to_owned());
                rec.width_fraction = Some(p.width_fraction);
                rec.source = Some(l.source.to_string());
                rec.aspect_ratio = l.aspect_ratio;
            }
            Layer::Text(l) => {
                rec.kind = Some("text".to_owned());
                rec.text = Some(l.text.clone());
                rec.font_family = Some(l.font_family.clone());
                rec.fill = Some(format!(
                    "#{:02x}{:02x}{:02x}{:02x}",
                    l.fill.r, l.fill.g, l.fill.b, l.fill.a
                ));
                rec.scale_percent = Some(l.scale_percent);
            }
        }
        rec
    }
}

/// Serialized server render request: a garment side plus layers in draw order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub layers: Vec<LayerRecord>,
}

impl RenderRequest {
    pub fn from_json(s: &str) -> PrintcompResult<Self> {
        serde_json::from_str(s).map_err(|e| {
            PrintcompError::invalid_input(format!("render request is not valid json: {e}"))
        })
    }

    /// Validated layers, in the order they were supplied.
    pub fn layers(&self) -> PrintcompResult<Vec<Layer>> {
        self.layers_with_limits(&SourceLimits::default())
    }

    pub fn layers_with_limits(&self, limits: &SourceLimits) -> PrintcompResult<Vec<Layer>> {
        if self.layers.is_empty() {
            return Err(PrintcompError::invalid_input("render request has no layers"));
        }
        self.layers
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                rec.clone().into_layer_with_limits(limits).map_err(|e| match e {
                    PrintcompError::InvalidInput(msg) => {
                        PrintcompError::invalid_input(format!("layer {i}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect()
    }
}

fn required<T>(v: Option<T>, field: &str) -> PrintcompResult<T> {
    v.ok_or_else(|| missing(field))
}

fn missing(field: &str) -> PrintcompError {
    PrintcompError::invalid_input(format!("missing field '{field}'"))
}

fn opacity_from_f64(v: f64) -> PrintcompResult<u8> {
    if !v.is_finite() || !(0.0..=100.0).contains(&v) {
        return Err(PrintcompError::invalid_input(format!(
            "opacityPercent must be in [0, 100], got {v}"
        )));
    }
    Ok(v.round() as u8)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/request.rs"]
mod tests;
