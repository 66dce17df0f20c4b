use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "arcmap", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the SVG document for a single frame.
    Svg(SvgArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a frame range as an MP4 (requires `ffmpeg` on PATH) or a PNG sequence.
    Render(RenderArgs),
    /// Print cycle timing and per-connection slices as JSON.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct SvgArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output SVG path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output MP4 path, or directory for a PNG sequence.
    #[arg(long)]
    out: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Mp4)]
    format: OutputFormat,

    /// Number of frames; one full animation cycle when omitted.
    #[arg(long)]
    frames: Option<u64>,

    /// First frame index.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Render frames in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel rendering.
    #[arg(long)]
    threads: Option<usize>,

    /// Rasterize identical frames once.
    #[arg(long)]
    elide_static: bool,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Mp4,
    Png,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Svg(args) => cmd_svg(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<arcmap::MapScene> {
    arcmap::MapScene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn session(path: &Path, opts: arcmap::RenderSessionOpts) -> anyhow::Result<arcmap::RenderSession> {
    let scene = read_scene(path)?;
    Ok(arcmap::RenderSession::new(&scene, opts)?)
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let session = session(&args.in_path, arcmap::RenderSessionOpts::default())?;
    let svg = session.svg_frame(arcmap::FrameIndex(args.frame));
    match args.out {
        Some(out) => {
            arcmap::encode::ensure_parent_dir(&out)?;
            std::fs::write(&out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let session = session(&args.in_path, arcmap::RenderSessionOpts::default())?;
    let frame = session.render_frame(arcmap::FrameIndex(args.frame))?;
    arcmap::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let session = arcmap::RenderSession::new(
        &scene,
        arcmap::RenderSessionOpts {
            parallel: args.parallel,
            threads: args.threads,
            static_frame_elision: args.elide_static,
            ..arcmap::RenderSessionOpts::default()
        },
    )?;

    let frames = args.frames.unwrap_or_else(|| session.cycle_frames());
    let range = arcmap::FrameRange::new(
        arcmap::FrameIndex(args.start),
        arcmap::FrameIndex(args.start.saturating_add(frames)),
    )?;

    let stats = match args.format {
        OutputFormat::Mp4 => {
            let bg = arcmap::assets::color::resolve_color(&scene.background, arcmap::Rgba8::TRANSPARENT);
            let mut opts = arcmap::FfmpegSinkOpts::new(&args.out);
            if bg.a == 255 {
                opts.bg_rgba = bg.to_array();
            }
            let mut sink = arcmap::FfmpegSink::new(opts);
            session.render_range(range, &mut sink)?
        }
        OutputFormat::Png => {
            let mut sink = arcmap::PngSequenceSink::new(&args.out);
            session.render_range(range, &mut sink)?
        }
    };

    eprintln!(
        "wrote {} ({} frames, {} rendered, {} elided)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

#[derive(serde::Serialize)]
struct TimelineReport {
    connections: usize,
    total_animation_secs: f64,
    full_cycle_secs: f64,
    cycle_frames: u64,
    slices: Vec<arcmap::TimelineSlice>,
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let session = session(&args.in_path, arcmap::RenderSessionOpts::default())?;
    let plan = session.map().plan();
    let report = TimelineReport {
        connections: plan.arcs().len(),
        total_animation_secs: plan.timing().total_animation_time(),
        full_cycle_secs: plan.timing().full_cycle_duration(),
        cycle_frames: session.cycle_frames(),
        slices: plan.slices(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize timeline")?
    );
    Ok(())
}
