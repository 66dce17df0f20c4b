use super::*;
use crate::scene::options::GeoPoint;

fn dots() -> Vec<Connection> {
    vec![
        Connection::new(
            GeoPoint::labeled(40.7, -74.0, "New York"),
            GeoPoint::new(51.5, -0.1),
        ),
        Connection::new(
            GeoPoint::new(35.7, 139.7),
            GeoPoint::labeled(-33.9, 151.2, ""),
        ),
    ]
}

#[test]
fn enter_start_uses_label_or_fallback() {
    let dots = dots();
    let s = HoverState::Idle.apply(PointerEvent::Enter(MarkerRef::start(0)));
    assert_eq!(s, HoverState::HoveringStart(0));
    assert_eq!(s.label(&dots).as_deref(), Some("New York"));

    let s = HoverState::Idle.apply(PointerEvent::Enter(MarkerRef::start(1)));
    assert_eq!(s.label(&dots).as_deref(), Some("Location 1"));
}

#[test]
fn enter_end_uses_destination_fallback() {
    let dots = dots();
    let s = HoverState::Idle.apply(PointerEvent::Enter(MarkerRef::end(0)));
    assert_eq!(s, HoverState::HoveringEnd(0));
    assert_eq!(s.label(&dots).as_deref(), Some("Destination 0"));

    // Empty labels fall back too.
    let s = HoverState::Idle.apply(PointerEvent::Enter(MarkerRef::end(1)));
    assert_eq!(s.label(&dots).as_deref(), Some("Destination 1"));
}

#[test]
fn leave_always_resets_label() {
    let dots = dots();
    let states = [
        HoverState::Idle,
        HoverState::HoveringStart(0),
        HoverState::HoveringEnd(1),
    ];
    for s in states {
        for m in [MarkerRef::start(0), MarkerRef::end(1), MarkerRef::start(7)] {
            let next = s.apply(PointerEvent::Leave(m));
            assert_eq!(next, HoverState::Idle);
            assert_eq!(next.label(&dots), None);
        }
    }
}

#[test]
fn hit_test_prefers_topmost_marker() {
    let markers = vec![
        (MarkerRef::start(0), Point::new(100.0, 100.0)),
        (MarkerRef::end(0), Point::new(102.0, 100.0)),
        (MarkerRef::start(1), Point::new(300.0, 50.0)),
    ];
    assert_eq!(
        hit_test(&markers, Point::new(101.0, 100.0)),
        Some(MarkerRef::end(0))
    );
    assert_eq!(
        hit_test(&markers, Point::new(97.0, 100.0)),
        Some(MarkerRef::start(0))
    );
    assert_eq!(
        hit_test(&markers, Point::new(300.0, 54.0)),
        Some(MarkerRef::start(1))
    );
    assert_eq!(hit_test(&markers, Point::new(300.0, 55.0)), None);
}

#[test]
fn tracker_emits_leave_before_enter() {
    let markers = vec![
        (MarkerRef::start(0), Point::new(10.0, 10.0)),
        (MarkerRef::end(0), Point::new(50.0, 10.0)),
    ];
    let mut t = PointerTracker::default();

    assert_eq!(
        t.move_to(&markers, Some(Point::new(10.0, 11.0))),
        vec![PointerEvent::Enter(MarkerRef::start(0))]
    );
    assert!(t.move_to(&markers, Some(Point::new(11.0, 10.0))).is_empty());
    assert_eq!(
        t.move_to(&markers, Some(Point::new(50.0, 10.0))),
        vec![
            PointerEvent::Leave(MarkerRef::start(0)),
            PointerEvent::Enter(MarkerRef::end(0)),
        ]
    );
    assert_eq!(
        t.move_to(&markers, None),
        vec![PointerEvent::Leave(MarkerRef::end(0))]
    );
    assert_eq!(t.current(), None);
}

#[test]
fn missing_marker_has_no_label() {
    let dots = dots();
    let s = HoverState::Idle.apply(PointerEvent::Enter(MarkerRef::start(42)));
    assert_eq!(s, HoverState::HoveringStart(42));
    assert_eq!(s.label(&dots), None);
}
