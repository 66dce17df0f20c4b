use std::path::Path;

use crate::{
    animation::timeline::{AnimationMode, DEFAULT_ANIMATION_DURATION_SECS},
    foundation::{
        core::{Canvas, Fps},
        error::{ArcmapError, ArcmapResult},
    },
    scene::script::PointerScript,
};

/// Geographic endpoint of a connection.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, `-90..90`.
    pub lat: f64,
    /// Longitude in degrees, `-180..180`.
    pub lng: f64,
    /// Optional tooltip label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GeoPoint {
    /// Unlabeled point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            label: None,
        }
    }

    /// Labeled point.
    pub fn labeled(lat: f64, lng: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            label: Some(label.into()),
        }
    }
}

/// Pair of endpoints animated as one arc.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Connection {
    /// Arc origin.
    pub start: GeoPoint,
    /// Arc destination.
    pub end: GeoPoint,
}

impl Connection {
    /// Connection from `start` to `end`.
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }
}

/// Public options of a connection map.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapOptions {
    /// Connections in stagger order.
    pub dots: Vec<Connection>,
    /// Arc, marker, and glow color (CSS).
    pub line_color: String,
    /// Accepted for compatibility; does not affect output.
    pub show_labels: bool,
    /// Per-arc draw duration in seconds.
    pub animation_duration: f64,
    /// Looping (`true`) or one-shot animation.
    #[serde(rename = "loop")]
    pub looping: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            dots: Vec::new(),
            line_color: DEFAULT_LINE_COLOR.to_owned(),
            show_labels: true,
            animation_duration: DEFAULT_ANIMATION_DURATION_SECS,
            looping: true,
        }
    }
}

/// Line color used when none (or an unparseable one) is given.
pub const DEFAULT_LINE_COLOR: &str = "#00ffff";

impl MapOptions {
    /// Options for `dots` with every other setting at its default.
    pub fn with_dots(dots: Vec<Connection>) -> Self {
        Self {
            dots,
            ..Self::default()
        }
    }

    /// Animation mode selected by `looping`.
    pub fn mode(&self) -> AnimationMode {
        if self.looping {
            AnimationMode::Looping
        } else {
            AnimationMode::OneShot
        }
    }

    /// Reject values no frame could be sampled from.
    pub fn validate(&self) -> ArcmapResult<()> {
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            return Err(ArcmapError::validation(
                "animationDuration must be a finite number >= 0",
            ));
        }
        for (i, dot) in self.dots.iter().enumerate() {
            for (which, p) in [("start", &dot.start), ("end", &dot.end)] {
                if !p.lat.is_finite() || !p.lng.is_finite() {
                    return Err(ArcmapError::validation(format!(
                        "connection {i} {which} has a non-finite coordinate"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Options plus output settings, as loaded from a scene file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapScene {
    /// Map options.
    #[serde(flatten)]
    pub options: MapOptions,
    /// Output raster size.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Clear color behind the map (CSS).
    pub background: String,
    /// Pointer input replayed while rendering.
    pub pointer: PointerScript,
}

impl Default for MapScene {
    fn default() -> Self {
        Self {
            options: MapOptions::default(),
            canvas: Canvas::default(),
            fps: Fps::default(),
            background: "transparent".to_owned(),
            pointer: PointerScript::default(),
        }
    }
}

impl MapScene {
    /// Parse a scene from JSON text.
    pub fn from_json_str(s: &str) -> ArcmapResult<Self> {
        let scene: Self = serde_json::from_str(s)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read and parse a scene file.
    pub fn from_path(path: impl AsRef<Path>) -> ArcmapResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ArcmapError::validation(format!("read scene '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Validate options and output settings.
    pub fn validate(&self) -> ArcmapResult<()> {
        self.options.validate()?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ArcmapError::validation("canvas width/height must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        self.pointer.validate()?;
        self.pointer.validate_targets(self.options.dots.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/options.rs"]
mod tests;
