//! Coarse built-in land mask used by the dotted background.
//!
//! Outlines are hand-simplified continent and large-island rings in `(lng, lat)` degrees.
//! They are only accurate to a few degrees, which is below the resolution of the dot grid.

/// Decides whether a geographic coordinate is land.
pub trait LandMask: Send + Sync {
    /// Return `true` when `(lat, lng)` should receive a dot.
    fn is_land(&self, lat: f64, lng: f64) -> bool;
}

/// Land mask backed by the built-in simplified world outlines.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorldOutline;

impl LandMask for WorldOutline {
    fn is_land(&self, lat: f64, lng: f64) -> bool {
        OUTLINES
            .iter()
            .any(|ring| point_in_ring(ring, lng, lat))
    }
}

/// Even-odd ray cast against a closed ring of `(x, y)` vertices.
pub fn point_in_ring(ring: &[(f64, f64)], x: f64, y: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];
        if (yi > y) != (yj > y) {
            let cross_x = xj + (y - yj) * (xi - xj) / (yi - yj);
            if x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

const NORTH_AMERICA: &[(f64, f64)] = &[
    (-168.0, 66.0), (-162.0, 70.0), (-156.0, 71.0), (-140.0, 70.0), (-128.0, 70.0),
    (-115.0, 68.0), (-95.0, 72.0), (-80.0, 73.0), (-75.0, 68.0), (-62.0, 60.0),
    (-56.0, 52.0), (-66.0, 45.0), (-70.0, 42.0), (-76.0, 35.0), (-81.0, 31.0),
    (-80.0, 25.0), (-84.0, 30.0), (-90.0, 29.0), (-97.0, 27.0), (-97.0, 22.0),
    (-91.0, 19.0), (-87.0, 21.0), (-88.0, 16.0), (-83.0, 10.0), (-78.0, 8.0),
    (-80.0, 7.0), (-86.0, 12.0), (-92.0, 14.0), (-105.0, 20.0), (-110.0, 24.0),
    (-112.0, 31.0), (-117.0, 32.0), (-124.0, 40.0), (-124.0, 48.0), (-133.0, 56.0),
    (-146.0, 61.0), (-155.0, 58.0), (-165.0, 60.0),
];

const GREENLAND: &[(f64, f64)] = &[
    (-73.0, 78.0), (-60.0, 82.0), (-30.0, 83.0), (-18.0, 80.0), (-20.0, 70.0),
    (-42.0, 60.0), (-50.0, 64.0), (-55.0, 70.0), (-68.0, 76.0),
];

const SOUTH_AMERICA: &[(f64, f64)] = &[
    (-80.0, 8.0), (-72.0, 12.0), (-62.0, 10.0), (-50.0, 2.0), (-35.0, -5.0),
    (-38.0, -13.0), (-41.0, -22.0), (-48.0, -26.0), (-58.0, -35.0), (-63.0, -40.0),
    (-65.0, -47.0), (-69.0, -52.0), (-72.0, -54.0), (-75.0, -50.0), (-73.0, -40.0),
    (-71.0, -30.0), (-70.0, -18.0), (-76.0, -14.0), (-81.0, -5.0), (-80.0, 1.0),
];

const EURASIA: &[(f64, f64)] = &[
    (-10.0, 36.0), (-9.0, 43.0), (-2.0, 44.0), (-5.0, 48.0), (2.0, 51.0),
    (8.0, 54.0), (5.0, 62.0), (14.0, 69.0), (28.0, 71.0), (42.0, 67.0),
    (60.0, 70.0), (80.0, 73.0), (100.0, 77.0), (115.0, 74.0), (130.0, 72.0),
    (150.0, 71.0), (170.0, 70.0), (180.0, 68.0), (180.0, 65.0), (170.0, 60.0),
    (160.0, 60.0), (156.0, 52.0), (142.0, 54.0), (140.0, 48.0), (132.0, 43.0),
    (128.0, 38.0), (126.0, 34.0), (122.0, 30.0), (121.0, 25.0), (115.0, 22.0),
    (108.0, 21.0), (109.0, 12.0), (105.0, 9.0), (103.0, 1.0), (100.0, 7.0),
    (98.0, 16.0), (94.0, 18.0), (91.0, 22.0), (87.0, 21.0), (80.0, 15.0),
    (77.0, 8.0), (73.0, 18.0), (72.0, 22.0), (67.0, 25.0), (57.0, 25.0),
    (56.0, 27.0), (52.0, 24.0), (56.0, 22.0), (59.0, 22.0), (55.0, 17.0),
    (52.0, 16.0), (45.0, 13.0), (43.0, 15.0), (39.0, 21.0), (35.0, 28.0),
    (33.0, 31.0), (36.0, 36.0), (30.0, 36.0), (27.0, 37.0), (26.0, 40.0),
    (23.0, 40.0), (22.0, 37.0), (19.0, 40.0), (19.0, 42.0), (13.0, 45.0),
    (16.0, 41.0), (18.0, 40.0), (16.0, 38.0), (12.0, 38.0), (10.0, 44.0),
    (6.0, 43.0), (3.0, 43.0), (0.0, 39.0), (-2.0, 37.0), (-6.0, 36.0),
];

const AFRICA: &[(f64, f64)] = &[
    (-17.0, 21.0), (-16.0, 28.0), (-10.0, 30.0), (-6.0, 36.0), (10.0, 37.0),
    (11.0, 33.0), (20.0, 31.0), (25.0, 32.0), (32.0, 31.0), (34.0, 28.0),
    (38.0, 18.0), (43.0, 12.0), (51.0, 12.0), (47.0, 5.0), (40.0, -3.0),
    (39.0, -10.0), (40.0, -16.0), (35.0, -24.0), (33.0, -29.0), (27.0, -34.0),
    (20.0, -35.0), (18.0, -30.0), (12.0, -18.0), (13.0, -10.0), (9.0, -1.0),
    (9.0, 4.0), (5.0, 6.0), (-4.0, 5.0), (-8.0, 4.0), (-13.0, 8.0),
    (-17.0, 14.0),
];

const AUSTRALIA: &[(f64, f64)] = &[
    (114.0, -22.0), (114.0, -34.0), (118.0, -35.0), (124.0, -34.0), (131.0, -31.0),
    (138.0, -35.0), (141.0, -38.0), (147.0, -39.0), (150.0, -37.0), (153.0, -30.0),
    (153.0, -25.0), (146.0, -19.0), (142.0, -11.0), (141.0, -17.0), (136.0, -15.0),
    (137.0, -12.0), (130.0, -11.0), (125.0, -14.0), (122.0, -18.0),
];

const JAPAN: &[(f64, f64)] = &[
    (130.0, 31.0), (131.0, 34.0), (135.0, 35.0), (140.0, 41.0), (142.0, 45.0),
    (145.0, 44.0), (142.0, 39.0), (140.0, 35.0), (136.0, 33.0),
];

const BRITAIN: &[(f64, f64)] = &[
    (-5.0, 50.0), (1.0, 51.0), (2.0, 53.0), (-2.0, 56.0), (-2.0, 58.0),
    (-6.0, 58.0), (-5.0, 55.0), (-3.0, 54.0), (-4.0, 53.0),
];

const IRELAND: &[(f64, f64)] = &[(-10.0, 52.0), (-6.0, 52.0), (-6.0, 55.0), (-8.0, 55.0), (-10.0, 54.0)];

const ICELAND: &[(f64, f64)] = &[(-24.0, 64.0), (-22.0, 66.0), (-15.0, 66.0), (-13.0, 65.0), (-18.0, 63.0)];

const MADAGASCAR: &[(f64, f64)] = &[(44.0, -25.0), (47.0, -25.0), (50.0, -15.0), (49.0, -12.0), (44.0, -17.0)];

const SUMATRA: &[(f64, f64)] = &[(95.0, 5.0), (98.0, 4.0), (104.0, -2.0), (106.0, -6.0), (101.0, -3.0)];

const BORNEO: &[(f64, f64)] = &[(109.0, 1.0), (117.0, 7.0), (119.0, 1.0), (116.0, -4.0), (110.0, -3.0)];

const NEW_GUINEA: &[(f64, f64)] = &[(131.0, -1.0), (141.0, -3.0), (150.0, -10.0), (141.0, -9.0), (137.0, -5.0)];

const PHILIPPINES: &[(f64, f64)] = &[(120.0, 18.0), (122.0, 18.0), (126.0, 7.0), (122.0, 7.0), (120.0, 14.0)];

const NEW_ZEALAND: &[(f64, f64)] = &[
    (172.0, -35.0), (178.0, -38.0), (175.0, -41.0), (171.0, -46.0), (167.0, -46.0),
    (172.0, -41.0),
];

const OUTLINES: &[&[(f64, f64)]] = &[
    NORTH_AMERICA,
    GREENLAND,
    SOUTH_AMERICA,
    EURASIA,
    AFRICA,
    AUSTRALIA,
    JAPAN,
    BRITAIN,
    IRELAND,
    ICELAND,
    MADAGASCAR,
    SUMATRA,
    BORNEO,
    NEW_GUINEA,
    PHILIPPINES,
    NEW_ZEALAND,
];

#[cfg(test)]
#[path = "../../tests/unit/assets/land.rs"]
mod tests;
