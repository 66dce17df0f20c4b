//! The animated connection map component.

use std::sync::{
    Arc, OnceLock,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    animation::timeline::{ArcTimeline, CycleTiming, TimelineSlice},
    assets::{
        color::{Rgba8, parse_css_color, resolve_color},
        dotted_map::{DottedMapOpts, MapImage, SvgOpts, cached_map_image},
    },
    foundation::{core::Point, error::ArcmapResult},
    geo::{
        path::{ArcPath, create_curved_path},
        projection::project_point,
    },
    scene::{
        frame::{ArcShape, EndpointShape, MapFrame, TravelingMarker},
        hover::{HoverState, MarkerRef, PointerEvent, PointerTracker},
        options::{Connection, DEFAULT_LINE_COLOR, MapOptions},
        tooltip::Tooltip,
    },
};

/// Geometry and tracks derived from the connection list.
#[derive(Clone, Debug)]
pub struct MapPlan {
    timing: CycleTiming,
    arcs: Vec<PlannedArc>,
}

/// Derived data for one connection.
#[derive(Clone, Debug)]
pub struct PlannedArc {
    /// Connection index.
    pub index: usize,
    /// Curve between the projected endpoints.
    pub path: ArcPath,
    /// Curve length in logical units.
    pub length: f64,
    /// Animation tracks.
    pub timeline: ArcTimeline,
}

impl MapPlan {
    #[tracing::instrument(skip_all, fields(connections = options.dots.len()))]
    fn build(options: &MapOptions) -> ArcmapResult<Self> {
        let timing = CycleTiming::new(options.dots.len(), options.animation_duration);
        let mode = options.mode();
        let arcs = options
            .dots
            .iter()
            .enumerate()
            .map(|(index, dot)| {
                let start = project_point(dot.start.lat, dot.start.lng);
                let end = project_point(dot.end.lat, dot.end.lng);
                let path = create_curved_path(start, end);
                Ok(PlannedArc {
                    index,
                    length: path.arc_length(),
                    path,
                    timeline: ArcTimeline::for_mode(mode, &timing, index)?,
                })
            })
            .collect::<ArcmapResult<Vec<_>>>()?;

        tracing::debug!(
            cycle_secs = timing.full_cycle_duration(),
            arcs = arcs.len(),
            "planned connection map"
        );
        Ok(Self { timing, arcs })
    }

    /// Shared cycle timing.
    pub fn timing(&self) -> &CycleTiming {
        &self.timing
    }

    /// Planned arcs in connection order.
    pub fn arcs(&self) -> &[PlannedArc] {
        &self.arcs
    }

    /// Normalized slices of every arc.
    pub fn slices(&self) -> Vec<TimelineSlice> {
        self.timing.slices()
    }
}

/// Animated world map with staggered connection arcs.
///
/// Replacing the options or the connection list rebuilds the whole plan.
#[derive(Debug)]
pub struct ConnectionMap {
    options: MapOptions,
    line_color: Rgba8,
    plan: MapPlan,
    background_grid: DottedMapOpts,
    background_style: SvgOpts,
    background: OnceLock<Arc<MapImage>>,
    mounted: AtomicUsize,
}

impl ConnectionMap {
    /// Validate `options` and plan the map.
    pub fn new(options: MapOptions) -> ArcmapResult<Self> {
        options.validate()?;
        let plan = MapPlan::build(&options)?;
        Ok(Self {
            line_color: line_color_of(&options),
            options,
            plan,
            background_grid: DottedMapOpts::default(),
            background_style: SvgOpts::default(),
            background: OnceLock::new(),
            mounted: AtomicUsize::new(0),
        })
    }

    /// Override the background generator parameters.
    pub fn with_background(mut self, grid: DottedMapOpts, style: SvgOpts) -> Self {
        self.background_grid = grid;
        self.background_style = style;
        self.background = OnceLock::new();
        self
    }

    /// Current options.
    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Current plan.
    pub fn plan(&self) -> &MapPlan {
        &self.plan
    }

    /// Resolved line color.
    pub fn line_color(&self) -> Rgba8 {
        self.line_color
    }

    /// Replace all options and re-plan.
    pub fn set_options(&mut self, options: MapOptions) -> ArcmapResult<()> {
        options.validate()?;
        self.plan = MapPlan::build(&options)?;
        self.line_color = line_color_of(&options);
        self.options = options;
        Ok(())
    }

    /// Replace the connection list and re-plan.
    pub fn set_dots(&mut self, dots: Vec<Connection>) -> ArcmapResult<()> {
        let options = MapOptions {
            dots,
            ..self.options.clone()
        };
        self.set_options(options)
    }

    /// Dotted background, generated on first use.
    pub fn background(&self) -> Arc<MapImage> {
        Arc::clone(
            self.background
                .get_or_init(|| cached_map_image(self.background_grid, &self.background_style)),
        )
    }

    /// Endpoint marker centers in draw order (start then end, per connection).
    pub fn marker_positions(&self) -> Vec<(MarkerRef, Point)> {
        self.plan
            .arcs
            .iter()
            .flat_map(|a| {
                [
                    (MarkerRef::start(a.index), a.path.start),
                    (MarkerRef::end(a.index), a.path.end),
                ]
            })
            .collect()
    }

    /// Sample arcs and markers at `t_secs` seconds after mount, without any tooltip.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn frame_at(&self, t_secs: f64) -> MapFrame {
        let arcs = self
            .plan
            .arcs
            .iter()
            .map(|a| {
                let s = a.timeline.sample(t_secs);
                ArcShape {
                    index: a.index,
                    path: a.path,
                    length: a.length,
                    visible: s.path_length.clamp(0.0, 1.0),
                    marker: s.marker.map(|m| TravelingMarker {
                        position: a.path.point_at_fraction(m.offset),
                        opacity: m.opacity.clamp(0.0, 1.0),
                    }),
                }
            })
            .collect();

        let endpoints = self
            .marker_positions()
            .into_iter()
            .map(|(marker, center)| EndpointShape { marker, center })
            .collect();

        MapFrame {
            time: t_secs,
            line_color: self.line_color,
            background: self.background(),
            arcs,
            endpoints,
            tooltips: Vec::new(),
        }
    }

    /// Number of playbacks currently mounted on this map.
    pub fn mounted_playbacks(&self) -> usize {
        self.mounted.load(Ordering::Acquire)
    }

    /// Start an interactive playback session over this map.
    pub fn mount(&self) -> Playback<'_> {
        let live = self.mounted.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(arcs = self.plan.arcs.len(), live, "playback mounted");
        Playback {
            map: self,
            hover: HoverState::Idle,
            hovered_label: None,
            pointer: PointerTracker::default(),
            tooltip: Tooltip::default(),
            frames_sampled: 0,
        }
    }
}

fn line_color_of(options: &MapOptions) -> Rgba8 {
    let fallback = parse_css_color(DEFAULT_LINE_COLOR).unwrap_or(Rgba8::rgb(0, 255, 255));
    resolve_color(&options.line_color, fallback)
}

/// Mounted map: owns hover and tooltip state for as long as it lives.
///
/// Dropping the playback releases all of it and unregisters it from the map.
#[derive(Debug)]
pub struct Playback<'a> {
    map: &'a ConnectionMap,
    hover: HoverState,
    hovered_label: Option<String>,
    pointer: PointerTracker,
    tooltip: Tooltip,
    frames_sampled: u64,
}

impl Playback<'_> {
    /// Map this playback renders.
    pub fn map(&self) -> &ConnectionMap {
        self.map
    }

    /// Current hover state.
    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Label captured when the hovered marker was entered.
    pub fn hovered_label(&self) -> Option<&str> {
        self.hovered_label.as_deref()
    }

    /// Apply a marker enter/leave event at time `now`.
    pub fn handle(&mut self, event: PointerEvent, now: f64) {
        self.hover = self.hover.apply(event);
        self.hovered_label = self.hover.label(&self.map.options.dots);
        self.tooltip.sync(self.hovered_label.as_deref(), now);
        tracing::trace!(?event, hover = ?self.hover, "pointer event");
    }

    /// Drop any hover at `now`, whether it came from a marker event or pointer motion.
    ///
    /// The pointer is treated as off every marker, so moving back onto one enters it again.
    pub fn leave(&mut self, now: f64) {
        if let Some(m) = self.hover.marker() {
            self.handle(PointerEvent::Leave(m), now);
        }
        self.pointer.reset();
    }

    /// Move the pointer to `p` (logical coordinates), or off the canvas with `None`.
    pub fn pointer_moved(&mut self, p: Option<Point>, now: f64) {
        let markers = self.map.marker_positions();
        for event in self.pointer.move_to(&markers, p) {
            self.handle(event, now);
        }
    }

    /// Sample the map with tooltips at `now`.
    pub fn frame(&mut self, now: f64) -> MapFrame {
        self.tooltip.sync(self.hovered_label.as_deref(), now);
        self.frames_sampled += 1;
        let mut frame = self.map.frame_at(now);
        frame.tooltips = self.tooltip.layers(now);
        frame
    }

    /// Frames sampled since mount.
    pub fn frames_sampled(&self) -> u64 {
        self.frames_sampled
    }
}

impl Drop for Playback<'_> {
    fn drop(&mut self) {
        let live = self.map.mounted.fetch_sub(1, Ordering::AcqRel).saturating_sub(1);
        tracing::debug!(frames = self.frames_sampled, live, "playback released");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/map.rs"]
mod tests;
