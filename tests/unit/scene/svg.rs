use super::*;
use crate::{
    assets::dotted_map::{DottedMapOpts, SvgOpts},
    scene::{
        hover::{MarkerRef, PointerEvent},
        map::ConnectionMap,
        options::{Connection, GeoPoint, MapOptions},
    },
};

fn map(looping: bool) -> ConnectionMap {
    let dots = vec![
        Connection::new(
            GeoPoint::labeled(40.7, -74.0, "Fish & <Chips>"),
            GeoPoint::new(51.5, -0.1),
        ),
        Connection::new(GeoPoint::new(35.7, 139.7), GeoPoint::new(-33.9, 151.2)),
    ];
    ConnectionMap::new(MapOptions {
        looping,
        ..MapOptions::with_dots(dots)
    })
    .unwrap()
    .with_background(
        DottedMapOpts {
            height: 8,
            ..DottedMapOpts::default()
        },
        SvgOpts::default(),
    )
}

#[test]
fn document_has_defs_background_and_markers() {
    let m = map(true);
    let svg = to_svg(&m.frame_at(1.0), Canvas::default(), Rgba8::TRANSPARENT);
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"viewBox="0 0 800 400""#));
    assert!(svg.contains(r#"id="path-gradient""#));
    assert!(svg.contains(r#"<feGaussianBlur stdDeviation="2""#));
    assert!(svg.contains("data:image/svg+xml;utf8,"));
    assert_eq!(svg.matches(r#"filter="url(#glow)""#).count(), 4);
    assert!(!svg.contains("<rect x=\"-100%\""));
}

#[test]
fn hidden_arcs_are_omitted() {
    let m = map(true);
    let at_start = to_svg(&m.frame_at(0.0), Canvas::default(), Rgba8::TRANSPARENT);
    assert_eq!(at_start.matches("<path").count(), 0);

    let later = to_svg(&m.frame_at(2.5), Canvas::default(), Rgba8::TRANSPARENT);
    assert_eq!(later.matches("<path").count(), 2);
    // Both arcs are fully drawn between their end and the shared reset.
    assert!(!later.contains("stroke-dasharray"));
}

#[test]
fn partial_arc_is_one_dash_from_the_start() {
    let m = map(true);
    let frame = m.frame_at(1.0);
    let arc = &frame.arcs[0];
    assert!(arc.visible > 0.0 && arc.visible < 1.0);

    let svg = to_svg(&frame, Canvas::default(), Rgba8::TRANSPARENT);
    let dash = format!(
        r#"stroke-dasharray="{} {}""#,
        arc.length * arc.visible,
        arc.length * 2.0 + 1.0
    );
    assert!(svg.contains(&dash));
    assert!(!svg.contains("stroke-dashoffset"));
}

#[test]
fn one_shot_frames_have_no_traveling_markers() {
    let m = map(false);
    let svg = to_svg(&m.frame_at(1.0), Canvas::default(), Rgba8::TRANSPARENT);
    // Only the four glowing endpoints.
    assert_eq!(svg.matches("<circle").count(), 4);
}

#[test]
fn tooltip_text_is_escaped() {
    let m = map(true);
    let mut playback = m.mount();
    playback.handle(PointerEvent::Enter(MarkerRef::start(0)), 0.0);
    let svg = to_svg(&playback.frame(1.0), Canvas::default(), Rgba8::TRANSPARENT);
    assert!(svg.contains("Fish &amp; &lt;Chips&gt;"));
    assert!(!svg.contains("<Chips>"));
}

#[test]
fn opaque_clear_color_adds_backdrop() {
    let m = map(true);
    let svg = to_svg(
        &m.frame_at(0.0),
        Canvas {
            width: 320,
            height: 240,
        },
        Rgba8::rgb(10, 12, 20),
    );
    assert!(svg.contains(r#"width="320" height="240""#));
    assert!(svg.contains("#0a0c14"));
}
