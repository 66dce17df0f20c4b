use super::*;

#[test]
fn defaults_match_component_defaults() {
    let opts: MapOptions = serde_json::from_str("{}").unwrap();
    assert!(opts.dots.is_empty());
    assert_eq!(opts.line_color, "#00ffff");
    assert!(opts.show_labels);
    assert_eq!(opts.animation_duration, 2.0);
    assert!(opts.looping);
    assert_eq!(opts.mode(), AnimationMode::Looping);
}

#[test]
fn camel_case_keys_and_loop_rename() {
    let opts: MapOptions = serde_json::from_str(
        r##"{
            "dots": [
                { "start": { "lat": 40.7, "lng": -74.0, "label": "New York" },
                  "end": { "lat": 51.5, "lng": -0.12 } }
            ],
            "lineColor": "#ff00ff",
            "showLabels": false,
            "animationDuration": 1.5,
            "loop": false
        }"##,
    )
    .unwrap();
    assert_eq!(opts.dots.len(), 1);
    assert_eq!(opts.dots[0].start.label.as_deref(), Some("New York"));
    assert_eq!(opts.dots[0].end.label, None);
    assert_eq!(opts.line_color, "#ff00ff");
    assert!(!opts.show_labels);
    assert_eq!(opts.animation_duration, 1.5);
    assert_eq!(opts.mode(), AnimationMode::OneShot);

    let back = serde_json::to_value(&opts).unwrap();
    assert_eq!(back["loop"], serde_json::json!(false));
    assert!(back["dots"][0]["end"].get("label").is_none());
}

#[test]
fn validate_rejects_bad_numbers() {
    let mut opts = MapOptions::default();
    opts.animation_duration = -1.0;
    assert!(opts.validate().is_err());
    opts.animation_duration = f64::NAN;
    assert!(opts.validate().is_err());

    let mut opts = MapOptions::with_dots(vec![Connection::new(
        GeoPoint::new(f64::INFINITY, 0.0),
        GeoPoint::new(0.0, 0.0),
    )]);
    assert!(opts.validate().is_err());
    opts.dots[0].start.lat = 95.0; // off-canvas but finite
    assert!(opts.validate().is_ok());
}

#[test]
fn scene_flattens_options_and_applies_output_defaults() {
    let scene = MapScene::from_json_str(r#"{ "animationDuration": 3 }"#).unwrap();
    assert_eq!(scene.options.animation_duration, 3.0);
    assert_eq!(scene.canvas, Canvas { width: 800, height: 400 });
    assert_eq!(scene.fps, Fps { num: 30, den: 1 });
    assert_eq!(scene.background, "transparent");
}

#[test]
fn scene_rejects_zero_sized_canvas_and_fps() {
    assert!(MapScene::from_json_str(r#"{ "canvas": { "width": 0, "height": 10 } }"#).is_err());
    assert!(MapScene::from_json_str(r#"{ "fps": { "num": 30, "den": 0 } }"#).is_err());
    assert!(matches!(
        MapScene::from_json_str("[]"),
        Err(ArcmapError::Serde(_))
    ));
}

#[test]
fn scene_rejects_pointer_script_for_missing_connection() {
    let json = r#"{
        "dots": [{ "start": { "lat": 0, "lng": 0 }, "end": { "lat": 10, "lng": 20 } }],
        "pointer": [{ "at": 0.5, "type": "enter", "index": 42, "marker": "start" }]
    }"#;
    let err = MapScene::from_json_str(json).unwrap_err();
    assert!(matches!(err, ArcmapError::Validation(_)));

    let ok = json.replace("42", "0");
    assert_eq!(MapScene::from_json_str(&ok).unwrap().pointer.steps().len(), 1);
}
