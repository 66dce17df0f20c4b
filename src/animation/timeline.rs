//! Staggered, cyclically repeating arc timelines.
//!
//! Every arc of a map shares one cycle whose length depends on the full connection count:
//! arcs draw in one after another (`STAGGER_DELAY_SECS` apart), hold, and all disappear together
//! at the reset offset before a fixed pause closes the cycle.

use crate::{
    animation::{ease::Ease, keyframes::Keyframes},
    foundation::error::ArcmapResult,
};

/// Offset between the draw start of successive arcs.
pub const STAGGER_DELAY_SECS: f64 = 0.3;
/// Idle time at the end of each looping cycle.
pub const PAUSE_TIME_SECS: f64 = 2.0;
/// Per-arc draw duration used when options do not override it.
pub const DEFAULT_ANIMATION_DURATION_SECS: f64 = 2.0;

/// Shared timing for all arcs of one connection list.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleTiming {
    /// Number of connections in the list.
    pub connection_count: usize,
    /// Offset between successive arcs.
    pub stagger_delay: f64,
    /// Per-arc draw duration.
    pub animation_duration: f64,
    /// Idle time closing each cycle.
    pub pause_time: f64,
}

impl CycleTiming {
    /// Timing for `connection_count` arcs with the fixed stagger and pause.
    pub fn new(connection_count: usize, animation_duration: f64) -> Self {
        Self {
            connection_count,
            stagger_delay: STAGGER_DELAY_SECS,
            animation_duration,
            pause_time: PAUSE_TIME_SECS,
        }
    }

    /// `n * stagger_delay + animation_duration`.
    pub fn total_animation_time(&self) -> f64 {
        self.connection_count as f64 * self.stagger_delay + self.animation_duration
    }

    /// `total_animation_time + pause_time`.
    pub fn full_cycle_duration(&self) -> f64 {
        self.total_animation_time() + self.pause_time
    }

    /// Normalized slice of arc `index`, or `None` past the end of the list.
    pub fn slice(&self, index: usize) -> Option<TimelineSlice> {
        if index >= self.connection_count {
            return None;
        }
        let cycle = self.full_cycle_duration();
        if cycle <= 0.0 {
            return Some(TimelineSlice::default());
        }

        let offset = index as f64 * self.stagger_delay;
        Some(TimelineSlice {
            start_time: norm(offset / cycle),
            end_time: norm((offset + self.animation_duration) / cycle),
            reset_time: norm(self.total_animation_time() / cycle),
        })
    }

    /// Slices for every arc in list order.
    pub fn slices(&self) -> Vec<TimelineSlice> {
        (0..self.connection_count)
            .filter_map(|i| self.slice(i))
            .collect()
    }

    /// Position of `t_secs` inside the current cycle, in `[0, 1)`.
    pub fn cycle_progress(&self, t_secs: f64) -> f64 {
        let cycle = self.full_cycle_duration();
        if cycle <= 0.0 || !t_secs.is_finite() {
            return 0.0;
        }
        t_secs.max(0.0).rem_euclid(cycle) / cycle
    }
}

fn norm(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

/// Normalized offsets of one arc inside the shared cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSlice {
    /// Offset where the arc starts drawing.
    pub start_time: f64,
    /// Offset where the arc reaches full length.
    pub end_time: f64,
    /// Offset where every arc disappears. Identical for all arcs of a list.
    pub reset_time: f64,
}

impl TimelineSlice {
    /// Key offsets `[0, start, end, reset, 1]` shared by every looping track.
    pub fn key_times(&self) -> [f64; 5] {
        [0.0, self.start_time, self.end_time, self.reset_time, 1.0]
    }
}

/// How arcs are animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationMode {
    /// Repeat the shared cycle forever, with traveling markers.
    Looping,
    /// Draw each arc once after its stagger delay.
    OneShot,
}

/// Visible state of one arc at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArcSample {
    /// Visible fraction of the path length in `[0, 1]`.
    pub path_length: f64,
    /// Traveling marker, only present in looping mode.
    pub marker: Option<MarkerSample>,
}

/// Traveling marker state along an arc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MarkerSample {
    /// Arc-length fraction in `[0, 1]` where the marker sits.
    pub offset: f64,
    /// Marker opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Resolved animation tracks for a single arc.
#[derive(Clone, Debug, PartialEq)]
pub enum ArcTimeline {
    /// Looping tracks sampled against the shared cycle.
    Looping {
        /// Shared cycle length in seconds.
        cycle_duration: f64,
        /// This arc's normalized slice.
        slice: TimelineSlice,
        /// Visible path length, keys `[0, 0, 1, 1, 0]`.
        path_length: Keyframes<f64>,
        /// Marker arc-length offset, keys `[0, 0, 1, 1, 1]`.
        marker_offset: Keyframes<f64>,
        /// Marker opacity, keys `[0, 0, 1, 0, 0]`.
        marker_opacity: Keyframes<f64>,
    },
    /// Single draw-in.
    OneShot {
        /// Seconds before drawing starts.
        delay: f64,
        /// Draw duration in seconds.
        duration: f64,
        /// Visible path length, `0 -> 1`.
        path_length: Keyframes<f64>,
    },
}

impl ArcTimeline {
    /// Build the looping tracks for arc `index`.
    pub fn looping(timing: &CycleTiming, index: usize) -> ArcmapResult<Self> {
        let slice = timing.slice(index).unwrap_or_default();
        let times = slice.key_times();
        let ease = Ease::EaseInOut;
        Ok(Self::Looping {
            cycle_duration: timing.full_cycle_duration(),
            slice,
            path_length: Keyframes::new(&[0.0, 0.0, 1.0, 1.0, 0.0], &times, ease)?,
            marker_offset: Keyframes::new(&[0.0, 0.0, 1.0, 1.0, 1.0], &times, ease)?,
            marker_opacity: Keyframes::new(&[0.0, 0.0, 1.0, 0.0, 0.0], &times, ease)?,
        })
    }

    /// Build the one-shot track for arc `index`.
    pub fn one_shot(timing: &CycleTiming, index: usize) -> Self {
        Self::OneShot {
            delay: index as f64 * timing.stagger_delay,
            duration: timing.animation_duration,
            path_length: Keyframes::tween(0.0, 1.0, Ease::EaseInOut),
        }
    }

    /// Build the tracks for arc `index` in the given mode.
    pub fn for_mode(mode: AnimationMode, timing: &CycleTiming, index: usize) -> ArcmapResult<Self> {
        match mode {
            AnimationMode::Looping => Self::looping(timing, index),
            AnimationMode::OneShot => Ok(Self::one_shot(timing, index)),
        }
    }

    /// Sample the arc at `t_secs` seconds after mount.
    pub fn sample(&self, t_secs: f64) -> ArcSample {
        let t = if t_secs.is_finite() {
            t_secs.max(0.0)
        } else {
            0.0
        };
        match self {
            Self::Looping {
                cycle_duration,
                path_length,
                marker_offset,
                marker_opacity,
                ..
            } => {
                let p = if *cycle_duration > 0.0 {
                    t.rem_euclid(*cycle_duration) / cycle_duration
                } else {
                    0.0
                };
                ArcSample {
                    path_length: path_length.sample(p),
                    marker: Some(MarkerSample {
                        offset: marker_offset.sample(p),
                        opacity: marker_opacity.sample(p),
                    }),
                }
            }
            Self::OneShot {
                delay,
                duration,
                path_length,
            } => {
                let p = if t < *delay {
                    0.0
                } else if *duration <= 0.0 {
                    1.0
                } else {
                    (t - delay) / duration
                };
                ArcSample {
                    path_length: path_length.sample(p),
                    marker: None,
                }
            }
        }
    }

    /// Return `true` once the arc can no longer change.
    pub fn is_settled(&self, t_secs: f64) -> bool {
        match self {
            Self::Looping { .. } => false,
            Self::OneShot {
                delay, duration, ..
            } => t_secs >= delay + duration.max(0.0),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
