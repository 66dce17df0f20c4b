//! Rasterization of SVG scenes into RGBA frames.

pub mod backend;
pub mod raster;
