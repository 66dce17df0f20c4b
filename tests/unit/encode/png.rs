use super::*;
use crate::foundation::core::Fps;

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("arcmap_png_{name}_{}", std::process::id()))
}

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::default(),
    }
}

#[test]
fn writes_numbered_frames() {
    let dir = scratch_dir("numbered");
    let mut sink = PngSequenceSink::new(&dir).with_prefix("map");
    sink.begin(cfg()).unwrap();
    let mut frame = FrameRGBA::transparent(2, 2);
    frame.data[..4].copy_from_slice(&[128, 0, 0, 128]);
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(3), &frame).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    assert!(dir.join("map_00003.png").exists());

    let img = image::open(dir.join("map_00000.png")).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn rejects_out_of_order_and_mismatched_frames() {
    let dir = scratch_dir("order");
    let mut sink = PngSequenceSink::new(&dir);
    let frame = FrameRGBA::transparent(2, 2);
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());

    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    assert!(sink.push_frame(FrameIndex(1), &frame).is_err());
    assert!(
        sink.push_frame(FrameIndex(2), &FrameRGBA::transparent(4, 4))
            .is_err()
    );
    let _ = std::fs::remove_dir_all(&dir);
}
