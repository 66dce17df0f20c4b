//! Animated connection map: a dotted world map with staggered, looping arcs between
//! geographic coordinate pairs, sampled deterministically into SVG and raster frames.

#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod encode;
pub mod foundation;
pub mod geo;
pub mod render;
pub mod scene;
pub mod session;

pub use animation::{
    ease::Ease,
    timeline::{AnimationMode, ArcTimeline, CycleTiming, TimelineSlice},
};
pub use assets::{
    color::Rgba8,
    dotted_map::{DottedMap, DottedMapOpts, MapImage, SvgOpts},
};
pub use encode::{
    ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path},
    png::{PngSequenceSink, write_png},
    sink::{FrameSink, InMemorySink, SinkConfig},
};
pub use foundation::{
    core::{Canvas, Fps, FrameIndex, FrameRange, Point},
    error::{ArcmapError, ArcmapResult},
};
pub use geo::{
    path::{ArcPath, create_curved_path},
    projection::project_point,
};
pub use render::{backend::FrameRGBA, raster::rasterize_svg};
pub use scene::{
    frame::MapFrame,
    hover::{HoverState, MarkerRef, PointerEvent},
    map::{ConnectionMap, Playback},
    options::{Connection, GeoPoint, MapOptions, MapScene},
    script::PointerScript,
    svg::to_svg,
};
pub use session::render_session::{RenderSession, RenderSessionOpts, RenderStats};
