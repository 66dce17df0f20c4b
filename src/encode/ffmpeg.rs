use std::{
    io::{Read, Write as _},
    path::PathBuf,
    process::{Child, ChildStdin, Command, Stdio},
    thread::JoinHandle,
};

use crate::{
    encode::{
        ensure_parent_dir,
        sink::{FrameSink, SinkConfig},
    },
    foundation::{
        core::FrameIndex,
        error::{ArcmapError, ArcmapResult},
    },
    render::backend::FrameRGBA,
};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Opaque color transparent map pixels are composited over (straight RGBA8).
    pub bg_rgba: [u8; 4],
}

impl FfmpegSinkOpts {
    /// Write `out_path` over black.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

/// Running `ffmpeg` process fed through its stdin.
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl Encoder {
    fn spawn(args: &[String]) -> ArcmapResult<Self> {
        let mut child = Command::new("ffmpeg")
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ArcmapError::encode(format!("could not start ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut bytes = Vec::new();
                pipe.read_to_end(&mut bytes)?;
                Ok(bytes)
            })
        });
        if stdin.is_none() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(ArcmapError::encode("ffmpeg stdin is not piped"));
        }
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> ArcmapResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| ArcmapError::encode("ffmpeg stdin already closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| ArcmapError::encode(format!("ffmpeg stopped accepting frames: {e}")))
    }

    /// Close stdin and wait for the encoder to flush the file.
    fn finish(mut self) -> ArcmapResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| ArcmapError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        let log = self.stderr_log();
        if status.success() {
            Ok(())
        } else {
            Err(ArcmapError::encode(format!(
                "ffmpeg exited with {status}: {}",
                log.trim()
            )))
        }
    }

    /// Stop the encoder without waiting for it to finish the file.
    fn abort(mut self) {
        drop(self.stdin.take());
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = self.stderr_log();
    }

    fn stderr_log(&mut self) -> String {
        self.stderr
            .take()
            .and_then(|h| h.join().ok())
            .and_then(Result::ok)
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }
}

/// Streams opaque RGBA frames into the system `ffmpeg`, producing an H.264 MP4.
///
/// The process starts on `begin` and is finalized by `end`. A sink dropped mid-range (for
/// example after a render error) kills the process instead of leaving it running.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    opaque: Vec<u8>,
}

impl FfmpegSink {
    /// Sink for `opts`; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            last_idx: None,
            opaque: Vec::new(),
        }
    }

    /// Return `true` while an `ffmpeg` process is attached.
    pub fn is_running(&self) -> bool {
        self.encoder.is_some()
    }

    /// Command-line arguments for a range described by `cfg`.
    pub fn args(&self, cfg: &SinkConfig) -> Vec<String> {
        let mut args: Vec<String> = vec![
            if self.opts.overwrite { "-y" } else { "-n" }.into(),
            "-loglevel".into(),
            "error".into(),
            // Raw input: flattened RGBA at the scene size and rate.
            "-f".into(),
            "rawvideo".into(),
            "-pix_fmt".into(),
            "rgba".into(),
            "-s".into(),
            format!("{}x{}", cfg.width, cfg.height),
            "-r".into(),
            format!("{}/{}", cfg.fps.num, cfg.fps.den),
            "-i".into(),
            "pipe:0".into(),
        ];
        args.extend(
            ["-an", "-c:v", "libx264", "-pix_fmt", "yuv420p", "-movflags", "+faststart"]
                .map(String::from),
        );
        args.push(self.opts.out_path.to_string_lossy().into_owned());
        args
    }

    fn check_config(&self, cfg: &SinkConfig) -> ArcmapResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(ArcmapError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(ArcmapError::validation("mp4 frame size must be non-zero"));
        }
        // yuv420p subsamples chroma 2x2.
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(ArcmapError::validation(format!(
                "mp4 frame size must be even, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(ArcmapError::validation(format!(
                "'{}' already exists",
                self.opts.out_path.display()
            )));
        }
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> ArcmapResult<()> {
        self.check_config(&cfg)?;
        if let Some(stale) = self.encoder.take() {
            stale.abort();
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(ArcmapError::encode(
                "MP4 output needs ffmpeg on PATH, and it was not found",
            ));
        }

        self.encoder = Some(Encoder::spawn(&self.args(&cfg))?);
        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            "ffmpeg started"
        );
        self.opaque = vec![0; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> ArcmapResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg, self.encoder.as_mut()) else {
            return Err(ArcmapError::encode("ffmpeg sink not started"));
        };
        if self.last_idx.is_some_and(|last| idx.0 <= last.0) {
            return Err(ArcmapError::encode(format!(
                "frame {} arrived out of order",
                idx.0
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(ArcmapError::validation(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if !frame.flatten_into(&mut self.opaque, self.opts.bg_rgba) {
            return Err(ArcmapError::validation(
                "frame data length does not match its size",
            ));
        }
        encoder.write(&self.opaque)?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> ArcmapResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| ArcmapError::encode("ffmpeg sink not started"))?;
        self.cfg = None;
        encoder.finish()?;
        tracing::debug!(out = %self.opts.out_path.display(), "mp4 written");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            tracing::warn!(
                out = %self.opts.out_path.display(),
                "ffmpeg sink dropped before end; aborting encoder"
            );
            encoder.abort();
        }
    }
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
