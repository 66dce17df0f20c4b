use super::*;

#[test]
fn origin_projects_to_canvas_center() {
    let p = project_point(0.0, 0.0);
    assert_eq!(p, Point::new(400.0, 200.0));
}

#[test]
fn corners_project_to_canvas_corners() {
    assert_eq!(project_point(90.0, -180.0), Point::new(0.0, 0.0));
    assert_eq!(project_point(-90.0, 180.0), Point::new(800.0, 400.0));
}

#[test]
fn projection_is_linear() {
    let a = project_point(10.0, 20.0);
    let b = project_point(30.0, 60.0);
    let mid = project_point(20.0, 40.0);
    assert!((mid.x - (a.x + b.x) / 2.0).abs() < 1e-9);
    assert!((mid.y - (a.y + b.y) / 2.0).abs() < 1e-9);
}

#[test]
fn out_of_range_inputs_land_off_canvas() {
    let p = project_point(120.0, 200.0);
    assert!(p.x > LOGICAL_WIDTH);
    assert!(p.y < 0.0);
}

