use std::{collections::HashMap, sync::Arc};

use rayon::prelude::*;

use crate::{
    assets::{
        color::{Rgba8, resolve_color},
        dotted_map::{DottedMapOpts, SvgOpts},
    },
    encode::sink::{FrameSink, SinkConfig},
    foundation::{
        core::{Canvas, Fps, FrameIndex, FrameRange},
        error::{ArcmapError, ArcmapResult},
        hash::Fingerprint,
    },
    render::{backend::FrameRGBA, raster::rasterize_svg},
    scene::{
        frame::MapFrame, map::ConnectionMap, options::MapScene, script::PointerScript, svg::to_svg,
    },
};

/// Options controlling `RenderSession` range rendering behavior.
#[derive(Clone, Debug)]
pub struct RenderSessionOpts {
    /// Enable frame-level parallelism (rayon), using a dedicated thread pool.
    pub parallel: bool,
    /// Frames sampled and rasterized per batch before they are pushed to the sink.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Rasterize each distinct frame within a chunk only once.
    pub static_frame_elision: bool,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames in the requested range.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused from an identical earlier frame.
    pub frames_elided: u64,
}

/// Renderer for one scene file: map, pointer script, and output settings.
pub struct RenderSession {
    map: ConnectionMap,
    script: PointerScript,
    canvas: Canvas,
    fps: Fps,
    clear: Rgba8,
    opts: RenderSessionOpts,
}

impl RenderSession {
    /// Validate `scene` and plan its map.
    pub fn new(scene: &MapScene, opts: RenderSessionOpts) -> ArcmapResult<Self> {
        scene.validate()?;
        let map = ConnectionMap::new(scene.options.clone())?;
        Ok(Self {
            map,
            script: scene.pointer.clone(),
            canvas: scene.canvas,
            fps: scene.fps,
            clear: resolve_color(&scene.background, Rgba8::TRANSPARENT),
            opts,
        })
    }

    /// Override the dotted background generator parameters.
    pub fn with_background(mut self, grid: DottedMapOpts, style: SvgOpts) -> Self {
        self.map = self.map.with_background(grid, style);
        self
    }

    /// Map being rendered.
    pub fn map(&self) -> &ConnectionMap {
        &self.map
    }

    /// Output raster size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Output frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Frames covering one full animation cycle.
    pub fn cycle_frames(&self) -> u64 {
        self.fps
            .secs_to_frames_ceil(self.map.plan().timing().full_cycle_duration())
            .max(1)
    }

    /// Range covering one full animation cycle from frame 0.
    pub fn cycle_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.cycle_frames()),
        }
    }

    /// Shape descriptors for `frame`, with scripted pointer input applied.
    pub fn sample(&self, frame: FrameIndex) -> MapFrame {
        sample_frame(&self.map, &self.script, self.fps, frame)
    }

    /// SVG document for `frame`.
    pub fn svg_frame(&self, frame: FrameIndex) -> String {
        to_svg(&self.sample(frame), self.canvas, self.clear)
    }

    /// Rasterize a single frame.
    pub fn render_frame(&self, frame: FrameIndex) -> ArcmapResult<FrameRGBA> {
        rasterize_svg(&self.svg_frame(frame), self.canvas)
    }

    /// Render a frame range and stream frames into a sink.
    ///
    /// The sink receives frames in strictly increasing frame index order, whether or not
    /// rendering is parallel.
    #[tracing::instrument(skip(self, sink), fields(start = range.start.0, end = range.end.0))]
    pub fn render_range(
        &self,
        range: FrameRange,
        sink: &mut dyn FrameSink,
    ) -> ArcmapResult<RenderStats> {
        if range.is_empty() {
            return Err(ArcmapError::validation(
                "render_range range must be non-empty",
            ));
        }

        let pool = if self.opts.parallel {
            Some(build_thread_pool(self.opts.threads)?)
        } else {
            None
        };
        // Generate the background before workers race for it.
        let _ = self.map.background();

        let ctx = ChunkCtx {
            map: &self.map,
            script: &self.script,
            fps: self.fps,
            canvas: self.canvas,
            clear: self.clear,
            pool: pool.as_ref(),
        };

        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps: self.fps,
        })?;

        let chunk_size = normalized_chunk_size(self.opts.chunk_size);
        let mut stats = RenderStats::default();
        let mut chunk_start = range.start.0;
        while chunk_start < range.end.0 {
            let chunk_end = (chunk_start + chunk_size).min(range.end.0);
            let frames = if self.opts.static_frame_elision {
                render_chunk_with_elision(&ctx, chunk_start, chunk_end, &mut stats)?
            } else {
                let frames = render_chunk(&ctx, chunk_start, chunk_end)?;
                stats.frames_rendered += frames.len() as u64;
                frames
            };
            for (f, frame) in (chunk_start..chunk_end).zip(frames) {
                sink.push_frame(FrameIndex(f), &frame)?;
            }
            stats.frames_total += chunk_end - chunk_start;
            chunk_start = chunk_end;
        }

        sink.end()?;
        tracing::debug!(
            rendered = stats.frames_rendered,
            elided = stats.frames_elided,
            "range rendered"
        );
        Ok(stats)
    }
}

fn sample_frame(
    map: &ConnectionMap,
    script: &PointerScript,
    fps: Fps,
    frame: FrameIndex,
) -> MapFrame {
    let t = fps.frame_to_secs(frame);
    if script.is_empty() {
        map.frame_at(t)
    } else {
        script.frame_at(map, t)
    }
}

#[derive(Clone, Copy)]
struct ChunkCtx<'a> {
    map: &'a ConnectionMap,
    script: &'a PointerScript,
    fps: Fps,
    canvas: Canvas,
    clear: Rgba8,
    pool: Option<&'a rayon::ThreadPool>,
}

impl ChunkCtx<'_> {
    fn rasterize(&self, frame: &MapFrame) -> ArcmapResult<Arc<FrameRGBA>> {
        rasterize_svg(&to_svg(frame, self.canvas, self.clear), self.canvas).map(Arc::new)
    }

    fn sample(&self, f: u64) -> MapFrame {
        sample_frame(self.map, self.script, self.fps, FrameIndex(f))
    }

    /// Rasterize `frames` in order, in parallel when a pool is present.
    fn rasterize_all(&self, frames: &[MapFrame]) -> ArcmapResult<Vec<Arc<FrameRGBA>>> {
        match self.pool {
            Some(pool) => pool.install(|| {
                frames
                    .par_iter()
                    .map(|frame| self.rasterize(frame))
                    .collect::<ArcmapResult<Vec<_>>>()
            }),
            None => frames.iter().map(|frame| self.rasterize(frame)).collect(),
        }
    }
}

fn render_chunk(ctx: &ChunkCtx<'_>, start: u64, end: u64) -> ArcmapResult<Vec<Arc<FrameRGBA>>> {
    let frames: Vec<MapFrame> = match ctx.pool {
        Some(pool) => pool.install(|| (start..end).into_par_iter().map(|f| ctx.sample(f)).collect()),
        None => (start..end).map(|f| ctx.sample(f)).collect(),
    };
    ctx.rasterize_all(&frames)
}

fn render_chunk_with_elision(
    ctx: &ChunkCtx<'_>,
    start: u64,
    end: u64,
    stats: &mut RenderStats,
) -> ArcmapResult<Vec<Arc<FrameRGBA>>> {
    let mut unique = Vec::<MapFrame>::new();
    let mut frame_to_unique = Vec::<usize>::with_capacity((end - start) as usize);
    let mut seen = HashMap::<Fingerprint, usize>::new();

    for f in start..end {
        let frame = ctx.sample(f);
        let u = *seen.entry(frame.fingerprint()).or_insert_with(|| {
            unique.push(frame);
            unique.len() - 1
        });
        frame_to_unique.push(u);
    }

    let rendered = ctx.rasterize_all(&unique)?;
    let total = end - start;
    stats.frames_rendered += rendered.len() as u64;
    stats.frames_elided += total.saturating_sub(rendered.len() as u64);

    Ok(frame_to_unique
        .into_iter()
        .map(|u| Arc::clone(&rendered[u]))
        .collect())
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

fn build_thread_pool(threads: Option<usize>) -> ArcmapResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ArcmapError::validation(
            "render_range 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ArcmapError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
