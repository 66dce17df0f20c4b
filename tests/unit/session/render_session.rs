use super::*;
use crate::{
    encode::sink::InMemorySink,
    scene::options::{Connection, GeoPoint, MapOptions},
};

fn scene(looping: bool) -> MapScene {
    MapScene {
        options: MapOptions {
            looping,
            ..MapOptions::with_dots(vec![
                Connection::new(GeoPoint::new(40.7, -74.0), GeoPoint::new(51.5, -0.1)),
                Connection::new(GeoPoint::new(35.7, 139.7), GeoPoint::new(-33.9, 151.2)),
            ])
        },
        canvas: Canvas {
            width: 80,
            height: 40,
        },
        fps: Fps { num: 10, den: 1 },
        background: "#101018".to_owned(),
        ..MapScene::default()
    }
}

fn session(scene: &MapScene, opts: RenderSessionOpts) -> RenderSession {
    RenderSession::new(scene, opts).unwrap().with_background(
        DottedMapOpts {
            height: 10,
            ..DottedMapOpts::default()
        },
        SvgOpts::default(),
    )
}

#[test]
fn cycle_frames_cover_full_cycle() {
    let s = session(&scene(true), RenderSessionOpts::default());
    // 2 * 0.3 + 2 + 2 = 4.6 s at 10 fps.
    assert_eq!(s.cycle_frames(), 46);
    assert_eq!(s.cycle_range().len_frames(), 46);
}

#[test]
fn render_frame_uses_canvas_and_clear_color() {
    let s = session(&scene(true), RenderSessionOpts::default());
    let f = s.render_frame(FrameIndex(0)).unwrap();
    assert_eq!((f.width, f.height), (80, 40));
    assert_eq!(f.pixel(0, 39).map(|p| p[3]), Some(255));
}

#[test]
fn range_is_delivered_in_order() {
    let s = session(
        &scene(true),
        RenderSessionOpts {
            parallel: true,
            threads: Some(2),
            chunk_size: 3,
            ..RenderSessionOpts::default()
        },
    );
    let range = FrameRange::new(FrameIndex(5), FrameIndex(12)).unwrap();
    let mut sink = InMemorySink::new();
    let stats = s.render_range(range, &mut sink).unwrap();

    assert_eq!(stats.frames_total, 7);
    assert_eq!(stats.frames_rendered, 7);
    assert!(sink.is_finished());
    let idx: Vec<u64> = sink.frames.iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, (5..12).collect::<Vec<_>>());
}

#[test]
fn parallel_matches_sequential() {
    let range = FrameRange::new(FrameIndex(0), FrameIndex(6)).unwrap();
    let mut seq = InMemorySink::new();
    session(&scene(true), RenderSessionOpts::default())
        .render_range(range, &mut seq)
        .unwrap();
    let mut par = InMemorySink::new();
    session(
        &scene(true),
        RenderSessionOpts {
            parallel: true,
            ..RenderSessionOpts::default()
        },
    )
    .render_range(range, &mut par)
    .unwrap();
    assert_eq!(seq.frames, par.frames);
}

#[test]
fn settled_one_shot_frames_are_elided() {
    let s = session(
        &scene(false),
        RenderSessionOpts {
            static_frame_elision: true,
            ..RenderSessionOpts::default()
        },
    );
    // Both arcs are complete from 2.3 s; frames 30..40 are identical.
    let range = FrameRange::new(FrameIndex(30), FrameIndex(40)).unwrap();
    let mut sink = InMemorySink::new();
    let stats = s.render_range(range, &mut sink).unwrap();
    assert_eq!(stats.frames_total, 10);
    assert_eq!(stats.frames_rendered, 1);
    assert_eq!(stats.frames_elided, 9);
    assert_eq!(sink.frames.len(), 10);
}

#[test]
fn rejects_empty_range_and_zero_threads() {
    let s = session(&scene(true), RenderSessionOpts::default());
    let mut sink = InMemorySink::new();
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(s.render_range(empty, &mut sink).is_err());

    let s = session(
        &scene(true),
        RenderSessionOpts {
            parallel: true,
            threads: Some(0),
            ..RenderSessionOpts::default()
        },
    );
    let range = FrameRange::new(FrameIndex(0), FrameIndex(1)).unwrap();
    assert!(s.render_range(range, &mut sink).is_err());
}

#[test]
fn scripted_hover_shows_tooltip_in_svg() {
    let mut sc = scene(true);
    sc.options.dots[0].start.label = Some("New York".to_owned());
    sc.pointer = serde_json::from_str(
        r#"[{ "at": 0.0, "type": "enter", "index": 0, "marker": "start" }]"#,
    )
    .unwrap();
    let s = session(&sc, RenderSessionOpts::default());
    assert!(!s.svg_frame(FrameIndex(0)).contains("New York"));
    assert!(s.svg_frame(FrameIndex(10)).contains("New York"));
}
