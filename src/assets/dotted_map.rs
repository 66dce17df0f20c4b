//! Dotted world-map background generator.
//!
//! Land cells of an equirectangular grid become dots; the result is emitted as a standalone SVG
//! document and embedded into scenes through a `data:` URI.

use std::{
    collections::HashMap,
    fmt::Write as _,
    sync::{Arc, Mutex, OnceLock},
};

use crate::{
    assets::{
        color::{Rgba8, parse_css_color, resolve_color},
        land::{LandMask, WorldOutline},
    },
    foundation::hash::{Fingerprint, StableHasher},
};

/// Dot grid layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridKind {
    /// Every row aligned.
    Vertical,
    /// Every other row shifted by half a cell.
    #[default]
    Diagonal,
}

/// Grid options for [`DottedMap::new`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DottedMapOpts {
    /// Number of dot rows; the grid has twice as many columns.
    pub height: u32,
    /// Row layout.
    pub grid: GridKind,
}

impl Default for DottedMapOpts {
    fn default() -> Self {
        Self {
            height: 100,
            grid: GridKind::Diagonal,
        }
    }
}

/// Dot shape used by [`DottedMap::get_svg`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DotShape {
    /// Circle of `radius`.
    #[default]
    Circle,
    /// Flat-top hexagon with circumradius `radius`.
    Hexagon,
}

/// Styling for [`DottedMap::get_svg`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgOpts {
    /// Dot radius in grid cells.
    pub radius: f64,
    /// Dot color (CSS).
    pub color: String,
    /// Dot shape.
    pub shape: DotShape,
    /// Document background (CSS).
    pub background_color: String,
}

impl Default for SvgOpts {
    fn default() -> Self {
        Self {
            radius: 0.22,
            color: "#00ffff40".to_owned(),
            shape: DotShape::Circle,
            background_color: "transparent".to_owned(),
        }
    }
}

/// One land dot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Dot {
    /// Latitude of the cell center.
    pub lat: f64,
    /// Longitude of the cell center.
    pub lng: f64,
    /// Grid-space x of the cell center.
    pub x: f64,
    /// Grid-space y of the cell center.
    pub y: f64,
}

/// Sampled dot grid.
#[derive(Clone, Debug)]
pub struct DottedMap {
    width: u32,
    height: u32,
    points: Vec<Dot>,
}

impl DottedMap {
    /// Sample the built-in world outline.
    pub fn new(opts: DottedMapOpts) -> Self {
        Self::with_mask(opts, &WorldOutline)
    }

    /// Sample an arbitrary land mask.
    #[tracing::instrument(skip(mask))]
    pub fn with_mask(opts: DottedMapOpts, mask: &dyn LandMask) -> Self {
        let height = opts.height.max(1);
        let width = height * 2;
        let mut points = Vec::new();

        for row in 0..height {
            let shift = match opts.grid {
                GridKind::Diagonal if row % 2 == 1 => 0.5,
                _ => 0.0,
            };
            let y = f64::from(row) + 0.5;
            let lat = 90.0 - y / f64::from(height) * 180.0;
            for col in 0..width {
                let x = f64::from(col) + 0.5 + shift;
                if x >= f64::from(width) {
                    continue;
                }
                let lng = x / f64::from(width) * 360.0 - 180.0;
                if mask.is_land(lat, lng) {
                    points.push(Dot { lat, lng, x, y });
                }
            }
        }

        tracing::debug!(width, height, dots = points.len(), "sampled dotted map");
        Self {
            width,
            height,
            points,
        }
    }

    /// Grid columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Land dots in row-major order.
    pub fn points(&self) -> &[Dot] {
        &self.points
    }

    /// Render the grid as an SVG document with a `0 0 width height` view box.
    pub fn get_svg(&self, opts: &SvgOpts) -> String {
        let color = resolve_color(&opts.color, Rgba8::rgba(0, 255, 255, 0x40));
        let background = parse_css_color(&opts.background_color).unwrap_or(Rgba8::TRANSPARENT);
        let radius = if opts.radius.is_finite() && opts.radius > 0.0 {
            opts.radius
        } else {
            SvgOpts::default().radius
        };

        let mut svg = String::with_capacity(64 + self.points.len() * 48);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.width,
            h = self.height,
        );
        if background.a > 0 {
            let _ = write!(
                svg,
                r#"<rect width="{}" height="{}" fill="{}" fill-opacity="{}"/>"#,
                self.width,
                self.height,
                background.to_hex_rgb(),
                background.opacity()
            );
        }
        let _ = write!(
            svg,
            r#"<g fill="{}" fill-opacity="{}">"#,
            color.to_hex_rgb(),
            color.opacity()
        );
        for p in &self.points {
            match opts.shape {
                DotShape::Circle => {
                    let _ = write!(svg, r#"<circle cx="{}" cy="{}" r="{}"/>"#, p.x, p.y, radius);
                }
                DotShape::Hexagon => {
                    svg.push_str(r#"<polygon points=""#);
                    for k in 0..6 {
                        let a = std::f64::consts::FRAC_PI_3 * f64::from(k);
                        if k > 0 {
                            svg.push(' ');
                        }
                        let _ = write!(
                            svg,
                            "{:.4},{:.4}",
                            p.x + radius * a.cos(),
                            p.y + radius * a.sin()
                        );
                    }
                    svg.push_str(r#""/>"#);
                }
            }
        }
        svg.push_str("</g></svg>");
        svg
    }
}

/// Generated background document plus its memo fingerprint.
#[derive(Debug)]
pub struct MapImage {
    svg: String,
    fingerprint: Fingerprint,
}

impl MapImage {
    /// Generate the image for `grid` styled with `style`.
    pub fn generate(grid: DottedMapOpts, style: &SvgOpts) -> Self {
        let svg = DottedMap::new(grid).get_svg(style);
        Self {
            svg,
            fingerprint: fingerprint_params(grid, style),
        }
    }

    /// Raw SVG document.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Parameters fingerprint this image was generated from.
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// `data:image/svg+xml;utf8,` URI with `encodeURIComponent` escaping.
    pub fn data_uri(&self) -> String {
        format!(
            "data:image/svg+xml;utf8,{}",
            urlencoding::encode(&self.svg)
        )
    }
}

fn fingerprint_params(grid: DottedMapOpts, style: &SvgOpts) -> Fingerprint {
    let mut h = StableHasher::new();
    h.write_u32(grid.height);
    h.write_bool(grid.grid == GridKind::Diagonal);
    h.write_f64(style.radius);
    h.write_str(&style.color);
    h.write_u8(match style.shape {
        DotShape::Circle => 0,
        DotShape::Hexagon => 1,
    });
    h.write_str(&style.background_color);
    h.finish()
}

type ImageCache = Mutex<HashMap<Fingerprint, Arc<MapImage>>>;

fn image_cache() -> &'static ImageCache {
    static CACHE: OnceLock<ImageCache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Process-wide memoized [`MapImage::generate`].
///
/// Images are immutable once generated, so maps with identical background parameters share one.
pub fn cached_map_image(grid: DottedMapOpts, style: &SvgOpts) -> Arc<MapImage> {
    let key = fingerprint_params(grid, style);
    let mut cache = image_cache()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(hit) = cache.get(&key) {
        return Arc::clone(hit);
    }
    let image = Arc::new(MapImage::generate(grid, style));
    cache.insert(key, Arc::clone(&image));
    image
}

#[cfg(test)]
#[path = "../../tests/unit/assets/dotted_map.rs"]
mod tests;
