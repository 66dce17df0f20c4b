//! Connection map scene: options, planning, per-time frame descriptors, and SVG output.

pub mod frame;
pub mod hover;
pub mod map;
pub mod options;
pub mod script;
pub mod svg;
pub mod tooltip;
