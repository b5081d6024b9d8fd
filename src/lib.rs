//! Printcomp renders print-ready files for direct-to-garment printing.
//!
//! A design is a list of layers (images and text), each placed inside a garment's safe zone with
//! resolution-independent coordinates. The same geometry drives two call sites:
//!
//! - the interactive editor, through [`apply_gesture`] and [`EditorLayout`]
//! - the print renderer, through [`Compositor::render`], which produces a transparent raster of
//!   exactly [`PrintCanvas`] size plus a [`QualityReport`]
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod config;
pub mod editor;
pub mod layout;
pub mod quality;
pub mod render;
pub mod scene;

pub use crate::foundation::core::{
    Affine, Bounds, Point, PrintCanvas, Rgba8, Size, Vec2,
};
pub use crate::foundation::error::{PrintcompError, PrintcompResult, ResourceLimit};

pub use crate::assets::decode::{
    EncodedImage, PreparedImage, SourceImage, SourceLimits, decode_image, prepare_source,
};
pub use crate::assets::resolve::{FsSourceResolver, MemorySourceResolver, SourceResolver};
pub use crate::assets::source::SourceRef;
pub use crate::assets::svg::SvgImage;
pub use crate::assets::text::{FontBook, TextMeasurer};
pub use crate::config::{CompositorConfig, TextSettings};
pub use crate::editor::gesture::{
    EditorSettings, Footprint, Gesture, GestureContext, GestureOutcome, apply_gesture, clamp_layer,
};
pub use crate::editor::session::EditorLayout;
pub use crate::layout::geometry::{
    ClampOutcome, VerticalClamp, clamp_center_to_bounds, denormalize, normalize,
    rotated_half_extents,
};
pub use crate::layout::safe_zone::{
    SAFE_ZONE_ASPECT, SafeZonePreset, SafeZonePresets, Side, derive_safe_zone, fallback_safe_zone,
    garment_box_in_container,
};
pub use crate::layout::snap::{Guide, SnapOutcome, snap_to_guides};
pub use crate::quality::{
    QualityReport, QualityStatus, QualityThresholds, effective_ppi, effective_ppi_exact,
};
pub use crate::render::cpu::{
    Compositor, CompositorSettings, LayerReport, RenderJob, RenderOutput,
};
pub use crate::render::raster::PrintRaster;
pub use crate::render::resolve::{
    ResolvedLayer, canvas_diagonal, capped_raster_size, image_target_size, resolve_layer,
};
pub use crate::scene::layer::{ImageLayer, Layer, TextLayer};
pub use crate::scene::placement::PlacementSpec;
pub use crate::scene::request::{LayerRecord, RenderRequest};
