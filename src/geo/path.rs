use kurbo::{ParamCurve, ParamCurveArclen};

use crate::foundation::core::{Point, QuadBez};

/// Height, in logical units, the arc control point is lifted above the higher endpoint.
pub const ARC_LIFT: f64 = 50.0;

const ARCLEN_ACCURACY: f64 = 1e-6;

/// Quadratic arc between two projected points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArcPath {
    /// First endpoint.
    pub start: Point,
    /// Control point, always at or above both endpoints.
    pub control: Point,
    /// Second endpoint.
    pub end: Point,
}

/// Build the arc from `start` to `end`.
///
/// The control point sits at the horizontal midpoint, `ARC_LIFT` above the higher (smaller y)
/// of the two endpoints, so the arc bows toward the top of the canvas in either direction.
pub fn create_curved_path(start: Point, end: Point) -> ArcPath {
    let control = Point::new((start.x + end.x) / 2.0, start.y.min(end.y) - ARC_LIFT);
    ArcPath {
        start,
        control,
        end,
    }
}

impl ArcPath {
    /// SVG path data, `M sx sy Q cx cy ex ey`.
    pub fn to_svg_d(&self) -> String {
        format!(
            "M {} {} Q {} {} {} {}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }

    /// Curve as a `kurbo` quadratic Bézier.
    pub fn quad(&self) -> QuadBez {
        QuadBez::new(self.start, self.control, self.end)
    }

    /// Total arc length in logical units.
    pub fn arc_length(&self) -> f64 {
        self.quad().arclen(ARCLEN_ACCURACY)
    }

    /// Point at arc-length `fraction` of the curve (clamped to `[0, 1]`).
    pub fn point_at_fraction(&self, fraction: f64) -> Point {
        let quad = self.quad();
        let f = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let len = quad.arclen(ARCLEN_ACCURACY);
        if len <= f64::EPSILON {
            return self.start;
        }
        let t = quad.inv_arclen(f * len, ARCLEN_ACCURACY);
        quad.eval(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/path.rs"]
mod tests;
