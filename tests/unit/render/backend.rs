use super::*;

#[test]
fn transparent_frame_has_expected_size() {
    let f = FrameRGBA::transparent(3, 2);
    assert_eq!(f.data.len(), 24);
    assert_eq!(f.pixel(2, 1), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(3, 0), None);
}

#[test]
fn straight_alpha_undoes_premultiplication() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 128, 128],
    };
    assert_eq!(f.to_straight_rgba8(), vec![128, 0, 255, 128]);
}

#[test]
fn flatten_alpha_0_returns_bg() {
    let f = FrameRGBA::transparent(1, 1);
    let mut dst = vec![0u8; 4];
    assert!(f.flatten_into(&mut dst, [10, 20, 30, 255]));
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_alpha_255_is_identity() {
    let f = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![1, 2, 3, 255],
    };
    let mut dst = vec![0u8; 4];
    assert!(f.flatten_into(&mut dst, [10, 20, 30, 255]));
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffer() {
    let f = FrameRGBA::transparent(2, 2);
    let mut dst = vec![0u8; 4];
    assert!(!f.flatten_into(&mut dst, [0, 0, 0, 255]));
}
