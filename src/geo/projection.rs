use crate::foundation::core::Point;

/// Logical canvas width all geometry is laid out in.
pub const LOGICAL_WIDTH: f64 = 800.0;
/// Logical canvas height all geometry is laid out in.
pub const LOGICAL_HEIGHT: f64 = 400.0;

/// Map `(lat, lng)` in degrees onto the logical canvas.
///
/// Equirectangular: longitude `-180..180` spans the width and latitude `90..-90` spans the
/// height. Inputs are not validated; out-of-range coordinates land off-canvas.
pub fn project_point(lat: f64, lng: f64) -> Point {
    let x = (lng + 180.0) * (LOGICAL_WIDTH / 360.0);
    let y = (90.0 - lat) * (LOGICAL_HEIGHT / 180.0);
    Point::new(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projection.rs"]
mod tests;
