use super::*;

#[test]
fn ray_cast_on_unit_square() {
    let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    assert!(point_in_ring(&square, 0.5, 0.5));
    assert!(!point_in_ring(&square, 1.5, 0.5));
    assert!(!point_in_ring(&square, 0.5, -0.1));
    assert!(!point_in_ring(&square[..2], 0.5, 0.5));
}

#[test]
fn well_known_cities_are_on_land() {
    let mask = WorldOutline;
    let cities = [
        ("new york", 40.7, -74.5),
        ("chicago", 41.9, -87.6),
        ("sao paulo", -23.5, -46.6),
        ("paris", 48.9, 2.35),
        ("moscow", 55.8, 37.6),
        ("cairo", 30.0, 31.2),
        ("nairobi", -1.3, 36.8),
        ("delhi", 28.6, 77.2),
        ("beijing", 39.9, 116.4),
        ("sydney", -33.0, 150.5),
        ("tokyo", 35.7, 139.7),
    ];
    for (name, lat, lng) in cities {
        assert!(mask.is_land(lat, lng), "{name} should be land");
    }
}

#[test]
fn open_ocean_is_not_land() {
    let mask = WorldOutline;
    let oceans = [
        ("mid atlantic", 30.0, -40.0),
        ("south pacific", -30.0, -130.0),
        ("indian ocean", -20.0, 80.0),
        ("north pacific", 30.0, 170.0),
    ];
    for (name, lat, lng) in oceans {
        assert!(!mask.is_land(lat, lng), "{name} should be water");
    }
}
