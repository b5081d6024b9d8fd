//! Layer sources: parsing references, guarded decoding, SVG rasterization and fonts.

pub mod decode;
pub mod resolve;
pub mod source;
pub mod svg;
pub mod text;
