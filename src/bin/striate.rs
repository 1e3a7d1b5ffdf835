use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "striate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single animation frame (by default the final one) as a PNG.
    Frame(FrameArgs),
    /// Render the whole animation to an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Scene config JSON. When omitted, a default scene is used.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Override the canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Override the canvas height.
    #[arg(long)]
    height: Option<u32>,

    /// Override the determinism seed. Defaults to a clock-derived seed when
    /// no scene file is given.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based). Omit to render the final frame.
    #[arg(long)]
    frame: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn resolve_config(args: &SceneArgs) -> anyhow::Result<striate::SceneConfig> {
    let mut config = match &args.in_path {
        Some(path) => read_scene_json(path)?,
        None => striate::SceneConfig::new(striate::Canvas::new(800, 800), clock_seed()),
    };

    if let Some(w) = args.width {
        config.canvas.width = w;
    }
    if let Some(h) = args.height {
        config.canvas.height = h;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    config.validate()?;
    Ok(config)
}

fn read_scene_json(path: &Path) -> anyhow::Result<striate::SceneConfig> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: striate::SceneConfig =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(config)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.scene)?;
    let frame = striate::render_frame(&config, args.frame)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    // Strokes and background are all opaque, so the premultiplied frame is
    // directly usable as straight RGBA.
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.scene)?;
    let frames = striate::render_to_mp4(&config, &args.out)?;
    eprintln!("wrote {} ({frames} frames)", args.out.display());
    Ok(())
}
