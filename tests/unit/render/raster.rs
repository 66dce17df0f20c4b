use super::*;

const RED_SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect x="0" y="0" width="5" height="10" fill="red"/></svg>"#;

#[test]
fn rasterizes_and_scales_to_canvas() {
    let f = rasterize_svg(
        RED_SQUARE,
        Canvas {
            width: 20,
            height: 20,
        },
    )
    .unwrap();
    assert_eq!((f.width, f.height), (20, 20));
    assert_eq!(f.data.len(), 20 * 20 * 4);
    assert_eq!(f.pixel(2, 10), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(17, 10), Some([0, 0, 0, 0]));
}

#[test]
fn rejects_zero_canvas() {
    let err = rasterize_svg(
        RED_SQUARE,
        Canvas {
            width: 0,
            height: 4,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ArcmapError::Validation(_)));
}

#[test]
fn rejects_malformed_svg() {
    let err = rasterize_svg(
        "<svg",
        Canvas {
            width: 4,
            height: 4,
        },
    )
    .unwrap_err();
    assert!(matches!(err, ArcmapError::Evaluation(_)));
}
