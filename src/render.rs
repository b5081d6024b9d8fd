//! Turning layers into print pixels.

pub mod cpu;
pub mod raster;
pub mod resolve;
