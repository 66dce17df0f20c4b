use super::*;
use crate::foundation::core::Fps;

fn cfg(width: u32, height: u32) -> SinkConfig {
    SinkConfig {
        width,
        height,
        fps: Fps { num: 30, den: 1 },
    }
}

#[test]
fn args_describe_raw_input_and_mp4_output() {
    let sink = FfmpegSink::new(FfmpegSinkOpts::new("out/map.mp4"));
    let args = sink.args(&cfg(800, 400));
    let joined = args.join(" ");
    assert!(joined.starts_with("-y "));
    assert!(joined.contains("-f rawvideo -pix_fmt rgba -s 800x400 -r 30/1 -i pipe:0"));
    assert!(joined.contains("-c:v libx264 -pix_fmt yuv420p"));
    assert_eq!(args.last().map(String::as_str), Some("out/map.mp4"));

    let keep = FfmpegSink::new(FfmpegSinkOpts {
        overwrite: false,
        ..FfmpegSinkOpts::new("x.mp4")
    });
    assert_eq!(keep.args(&cfg(2, 2))[0], "-n");
}

#[test]
fn rejects_odd_dimensions_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("arcmap_odd.mp4"),
    ));
    let err = sink.begin(cfg(801, 400)).unwrap_err();
    assert!(matches!(err, ArcmapError::Validation(_)));
    assert!(!sink.is_running());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    assert!(
        sink.push_frame(FrameIndex(0), &FrameRGBA::transparent(2, 2))
            .is_err()
    );
    assert!(sink.end().is_err());
}

#[test]
fn encodes_when_ffmpeg_is_available() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = std::env::temp_dir().join(format!("arcmap_sink_{}.mp4", std::process::id()));
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &FrameRGBA::transparent(16, 16))
            .unwrap();
    }
    assert!(
        sink.push_frame(FrameIndex(1), &FrameRGBA::transparent(16, 16))
            .is_err()
    );
    sink.end().unwrap();
    assert!(!sink.is_running());
    assert!(out.exists());
    let _ = std::fs::remove_file(&out);
}

#[test]
fn dropping_mid_range_stops_encoder() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let out = std::env::temp_dir().join(format!("arcmap_abort_{}.mp4", std::process::id()));
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(cfg(16, 16)).unwrap();
    sink.push_frame(FrameIndex(0), &FrameRGBA::transparent(16, 16))
        .unwrap();
    assert!(sink.is_running());
    // Returns only once the child has been killed and reaped.
    drop(sink);
    let _ = std::fs::remove_file(&out);
}
