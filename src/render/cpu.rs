use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, SourceImage, SourceLimits, prepare_source};
use crate::assets::resolve::SourceResolver;
use crate::assets::text::{FontBook, TextBrushRgba8, TextLayoutEngine};
use crate::config::CompositorConfig;
use crate::foundation::core::{Affine, PrintCanvas, Size};
use crate::foundation::error::{PrintcompError, PrintcompResult};
use crate::layout::geometry::VerticalClamp;
use crate::quality::{QualityReport, QualityStatus, QualityThresholds, effective_ppi};
use crate::render::raster::PrintRaster;
use crate::render::resolve::{
    ResolvedLayer, canvas_diagonal, capped_raster_size, image_target_size, resolve_layer,
};
use crate::scene::layer::{ImageLayer, Layer, TextLayer};

/// Settings the compositor reads on every render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositorSettings {
    pub limits: SourceLimits,
    pub thresholds: QualityThresholds,
    pub vertical_clamp: VerticalClamp,
    pub text_base_percent_of_width: f64,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self::from(&CompositorConfig::default())
    }
}

impl From<&CompositorConfig> for CompositorSettings {
    fn from(cfg: &CompositorConfig) -> Self {
        Self {
            limits: cfg.limits,
            thresholds: cfg.quality,
            vertical_clamp: cfg.vertical_clamp,
            text_base_percent_of_width: cfg.text.base_percent_of_width,
        }
    }
}

/// One render call: layers in draw order, where their sources come from, and the canvases.
#[derive(Clone, Copy)]
pub struct RenderJob<'a> {
    pub layers: &'a [Layer],
    pub sources: &'a dyn SourceResolver,
    /// Canvas the pixels are produced for. Equal to `print` for print files.
    pub target: PrintCanvas,
    /// The physical print canvas. Quality is always measured against it.
    pub print: PrintCanvas,
}

impl<'a> RenderJob<'a> {
    pub fn new(layers: &'a [Layer], sources: &'a dyn SourceResolver, print: PrintCanvas) -> Self {
        Self {
            layers,
            sources,
            target: print,
            print,
        }
    }

    /// Render at a different resolution (on-screen preview) with the same placement.
    pub fn with_target(mut self, target: PrintCanvas) -> Self {
        self.target = target;
        self
    }
}

/// Per-layer diagnostics, in draw order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerReport {
    pub index: usize,
    pub kind: &'static str,
    pub resolved: ResolvedLayer,
    pub quality: QualityReport,
}

#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub raster: PrintRaster,
    /// Worst layer quality; `clamped` if any layer was clamped.
    pub quality: QualityReport,
    pub layers: Vec<LayerReport>,
}

struct ImagePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

struct TextPaint {
    layout: parley::Layout<TextBrushRgba8>,
    font: vello_cpu::peniko::FontData,
}

enum Paint {
    Image(ImagePaint),
    Text(TextPaint),
}

/// CPU print-file compositor powered by `vello_cpu`.
///
/// Holds fonts and a reusable raster context; no state carries over between renders beyond
/// those caches.
pub struct Compositor {
    settings: CompositorSettings,
    fonts: FontBook,
    text_engine: TextLayoutEngine,
    font_cache: HashMap<String, vello_cpu::peniko::FontData>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl Compositor {
    pub fn new(settings: CompositorSettings, fonts: FontBook) -> Self {
        Self {
            settings,
            fonts,
            text_engine: TextLayoutEngine::new(),
            font_cache: HashMap::new(),
            ctx: None,
        }
    }

    pub fn from_config(cfg: &CompositorConfig, fonts: FontBook) -> Self {
        Self::new(CompositorSettings::from(cfg), fonts)
    }

    pub fn settings(&self) -> &CompositorSettings {
        &self.settings
    }

    /// Composite `job.layers` onto a transparent canvas.
    ///
    /// Every image source is probed and checked against the guardrails before any of them is
    /// decoded or resampled; a rejected source aborts the whole render.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(layers = job.layers.len(), width = job.target.width, height = job.target.height)
    )]
    pub fn render(&mut self, job: &RenderJob<'_>) -> PrintcompResult<RenderOutput> {
        job.target.validate()?;
        job.print.validate()?;
        if job.layers.is_empty() {
            return Err(PrintcompError::invalid_input("nothing to render: no layers"));
        }
        for layer in job.layers {
            layer.validate()?;
        }

        let limits = self.settings.limits;
        let mut sources: Vec<Option<(Box<dyn SourceImage>, (u32, u32))>> =
            Vec::with_capacity(job.layers.len());
        for layer in job.layers {
            let Layer::Image(img) = layer else {
                sources.push(None);
                continue;
            };
            let src = job.sources.resolve(&img.source)?;
            let dims = src.dimensions()?;
            // Vector sources have no pixel grid; their raster target is bounded below instead.
            if !src.is_vector() {
                limits.check_dimensions(dims.0, dims.1)?;
            }
            sources.push(Some((src, dims)));
        }

        let mut paints = Vec::with_capacity(job.layers.len());
        let mut reports = Vec::with_capacity(job.layers.len());
        for (index, (layer, source)) in job.layers.iter().zip(&sources).enumerate() {
            let (paint, resolved, quality) = match (layer, source) {
                (Layer::Image(img), Some((src, dims))) => {
                    self.prepare_image(img, src.as_ref(), *dims, job)?
                }
                (Layer::Text(text), _) => self.prepare_text(text, job)?,
                (Layer::Image(_), None) => {
                    return Err(PrintcompError::render("image layer lost its source"));
                }
            };

            tracing::debug!(
                index,
                kind = layer.kind(),
                cx = resolved.center_x,
                cy = resolved.center_y,
                w = resolved.width,
                h = resolved.height,
                ppi = quality.effective_ppi,
                "layer resolved"
            );
            if resolved.clamped {
                tracing::warn!(
                    index,
                    degenerate = resolved.degenerate,
                    "layer placement clamped to canvas"
                );
            }
            if quality.status != QualityStatus::Ok {
                tracing::warn!(index, ppi = quality.effective_ppi, status = ?quality.status, "low print resolution");
            }

            paints.push(paint);
            reports.push(LayerReport {
                index,
                kind: layer.kind(),
                resolved,
                quality,
            });
        }
        // Decoded sources are no longer needed once their paints exist.
        drop(sources);

        let raster = self.draw(job.target, &paints, &reports)?;

        let quality = QualityReport::worst_of(reports.iter().map(|r| r.quality))
            .ok_or_else(|| PrintcompError::render("no layer reports"))?;
        Ok(RenderOutput {
            raster,
            quality,
            layers: reports,
        })
    }

    fn prepare_image(
        &self,
        layer: &ImageLayer,
        src: &dyn SourceImage,
        source_dims: (u32, u32),
        job: &RenderJob<'_>,
    ) -> PrintcompResult<(Paint, ResolvedLayer, QualityReport)> {
        let p = &layer.placement;
        let (w, h) = image_target_size(p.width_fraction, job.target.width, source_dims);
        let max_side = canvas_diagonal(job.target).min(u32::from(u16::MAX));
        let (rw, rh) = capped_raster_size((w, h), max_side);
        if (rw, rh) != (w, h) {
            tracing::debug!(w, h, rw, rh, "layer raster capped; stretched at draw time");
        }

        let prepared = prepare_source(src, &self.settings.limits, rw, rh)?;
        let resolved = resolve_layer(
            p,
            Size::new(f64::from(w), f64::from(h)),
            job.target.bounds(),
            self.settings.vertical_clamp,
        );

        let quality = if src.is_vector() {
            QualityReport::sharp(job.print.dpi, resolved.clamped)
        } else {
            let (print_w, _) = image_target_size(p.width_fraction, job.print.width, source_dims);
            QualityReport::from_ppi(
                effective_ppi(source_dims.0, job.print.dpi, print_w),
                &self.settings.thresholds,
                resolved.clamped,
            )
        };

        let paint = image_paint_from_prepared(&prepared)?;
        Ok((Paint::Image(paint), resolved, quality))
    }

    fn prepare_text(
        &mut self,
        layer: &TextLayer,
        job: &RenderJob<'_>,
    ) -> PrintcompResult<(Paint, ResolvedLayer, QualityReport)> {
        let (key, bytes) = self.fonts.resolve(&layer.font_family)?;
        let size_px = layer.font_px(
            f64::from(job.target.width),
            self.settings.text_base_percent_of_width,
        ) as f32;
        let layout = self.text_engine.layout_plain(
            &layer.text,
            &key,
            &bytes,
            size_px,
            TextBrushRgba8::from(layer.fill),
        )?;
        let font = self
            .font_cache
            .entry(key)
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.to_vec()),
                    0,
                )
            })
            .clone();

        let size = Size::new(f64::from(layout.width()), f64::from(layout.height()));
        let resolved = resolve_layer(
            &layer.placement,
            size,
            job.target.bounds(),
            self.settings.vertical_clamp,
        );
        let quality = QualityReport::sharp(job.print.dpi, resolved.clamped);
        Ok((Paint::Text(TextPaint { layout, font }), resolved, quality))
    }

    fn draw(
        &mut self,
        target: PrintCanvas,
        paints: &[Paint],
        reports: &[LayerReport],
    ) -> PrintcompResult<PrintRaster> {
        let width: u16 = target
            .width
            .try_into()
            .map_err(|_| PrintcompError::render("canvas width exceeds u16"))?;
        let height: u16 = target
            .height
            .try_into()
            .map_err(|_| PrintcompError::render("canvas height exceeds u16"))?;

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();

        for (paint, report) in paints.iter().zip(reports) {
            let r = &report.resolved;
            if r.opacity <= 0.0 {
                tracing::debug!(index = report.index, "skipping fully transparent layer");
                continue;
            }
            draw_layer(&mut ctx, paint, r);
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(PrintRaster {
            width: target.width,
            height: target.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_layer(ctx: &mut vello_cpu::RenderContext, paint: &Paint, r: &ResolvedLayer) {
    ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(r.transform()));
    let fade = r.opacity < 1.0;
    if fade {
        ctx.push_opacity_layer(r.opacity);
    }

    match paint {
        Paint::Image(p) => {
            // Capped rasters are smaller than the layer; stretch them back to its size.
            let stretch =
                Affine::scale_non_uniform(r.width / f64::from(p.w), r.height / f64::from(p.h));
            ctx.set_transform(affine_to_cpu(r.transform() * stretch));
            ctx.set_paint(p.paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(p.w),
                f64::from(p.h),
            ));
        }
        Paint::Text(t) => {
            for line in t.layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&t.font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
    }

    if fade {
        ctx.pop_layer();
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_paint_from_prepared(prepared: &PreparedImage) -> PrintcompResult<ImagePaint> {
    let pixmap = pixmap_from_premul_bytes(&prepared.rgba8_premul, prepared.width, prepared.height)?;
    Ok(ImagePaint {
        paint: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        w: prepared.width,
        h: prepared.height,
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> PrintcompResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PrintcompError::render("layer width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PrintcompError::render("layer height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(PrintcompError::render("layer pixel buffer size mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}
