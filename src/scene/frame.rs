use std::sync::Arc;

use crate::{
    assets::{color::Rgba8, dotted_map::MapImage},
    foundation::{
        core::Point,
        hash::{Fingerprint, StableHasher},
    },
    geo::path::ArcPath,
    scene::{hover::MarkerRef, tooltip::TooltipLayer},
};

/// Declarative description of everything visible at one instant.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MapFrame {
    /// Seconds since mount.
    pub time: f64,
    /// Resolved line color.
    pub line_color: Rgba8,
    /// Memoized dotted background.
    #[serde(skip)]
    pub background: Arc<MapImage>,
    /// Arcs in connection order, including fully hidden ones.
    pub arcs: Vec<ArcShape>,
    /// Endpoint markers in draw order.
    pub endpoints: Vec<EndpointShape>,
    /// Tooltip boxes, oldest first.
    pub tooltips: Vec<TooltipLayer>,
}

/// One connection arc.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ArcShape {
    /// Connection index.
    pub index: usize,
    /// Curve geometry.
    pub path: ArcPath,
    /// Total curve length in logical units.
    pub length: f64,
    /// Visible fraction of `length`, in `[0, 1]`.
    pub visible: f64,
    /// Marker traveling along the curve (looping mode only).
    pub marker: Option<TravelingMarker>,
}

/// Marker dot following an arc.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TravelingMarker {
    /// Position on the curve.
    pub position: Point,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Static endpoint marker.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EndpointShape {
    /// Which marker this is.
    pub marker: MarkerRef,
    /// Marker center.
    pub center: Point,
}

impl MapFrame {
    /// Arcs with a non-zero visible length.
    pub fn visible_arcs(&self) -> impl Iterator<Item = &ArcShape> {
        self.arcs.iter().filter(|a| a.visible > 0.0)
    }

    /// Fingerprint of the visual content, ignoring `time`.
    ///
    /// Two frames with equal fingerprints rasterize identically.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut h = StableHasher::new();
        let bg = self.background.fingerprint();
        h.write_u64(bg.hi);
        h.write_u64(bg.lo);
        h.write_bytes(&self.line_color.to_array());

        h.write_u64(self.arcs.len() as u64);
        for arc in &self.arcs {
            for p in [arc.path.start, arc.path.control, arc.path.end] {
                h.write_f64(p.x);
                h.write_f64(p.y);
            }
            h.write_f64(arc.visible);
            match arc.marker {
                None => h.write_u8(0),
                Some(m) => {
                    h.write_u8(1);
                    h.write_f64(m.position.x);
                    h.write_f64(m.position.y);
                    h.write_f64(m.opacity);
                }
            }
        }

        h.write_u64(self.endpoints.len() as u64);
        for e in &self.endpoints {
            h.write_f64(e.center.x);
            h.write_f64(e.center.y);
        }

        h.write_u64(self.tooltips.len() as u64);
        for t in &self.tooltips {
            h.write_str(&t.label);
            h.write_f64(t.opacity);
            h.write_f64(t.offset_y);
        }
        h.finish()
    }
}
