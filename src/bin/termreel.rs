use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use termreel::encode::png::write_png;
use termreel::{
    DemoReel, FontSpec, Fps, FrameIndex, GifSink, GifSinkOpts, Renderer, Rgba8, Scene, TitleCard,
    render_to_sink,
};

#[derive(Parser, Debug)]
#[command(name = "termreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animated demo reel GIF.
    Demo(DemoArgs),
    /// Render the title card GIF plus a PNG preview.
    TitleCard(TitleCardArgs),
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output GIF path.
    #[arg(long, default_value = "assets/demo.gif")]
    out: PathBuf,

    /// Font file tried before the built-in monospace candidates.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TitleCardArgs {
    /// Output GIF path.
    #[arg(long, default_value = "assets/title_card.gif")]
    out: PathBuf,

    /// Output PNG preview path.
    #[arg(long, default_value = "assets/title_card.png")]
    png: PathBuf,

    /// Font file tried before the built-in monospace candidates.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::TitleCard(args) => cmd_title_card(args),
    }
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let scene = DemoReel::new()?;
    let mut renderer = renderer_for(&scene, args.font)?;

    let mut sink = GifSink::new(GifSinkOpts::new(&args.out));
    let stats = render_to_sink(&scene, &mut renderer, &mut sink)?;

    report(&args.out, stats.frames_total, scene.fps())
}

fn cmd_title_card(args: TitleCardArgs) -> anyhow::Result<()> {
    let scene = TitleCard::new()?;
    let mut renderer = renderer_for(&scene, args.font)?;

    let mut sink = GifSink::new(GifSinkOpts::new(&args.out));
    let stats = render_to_sink(&scene, &mut renderer, &mut sink)?;
    report(&args.out, stats.frames_total, scene.fps())?;

    // PNG preview of the (static) first frame.
    let frame = renderer.render_frame(|painter| scene.draw(FrameIndex(0), painter))?;
    write_png(&args.png, &frame, Rgba8::opaque(0, 0, 0))?;
    let size = std::fs::metadata(&args.png)
        .with_context(|| format!("stat '{}'", args.png.display()))?
        .len();
    eprintln!("wrote {} ({:.1} KiB)", args.png.display(), size as f64 / 1024.0);
    Ok(())
}

fn renderer_for(scene: &dyn Scene, font: Option<PathBuf>) -> anyhow::Result<Renderer> {
    let mut spec = FontSpec::monospace_defaults();
    if let Some(path) = font {
        spec = spec.with_primary(path);
    }
    let font_bytes = spec.load()?;
    Ok(Renderer::new(scene.canvas(), &font_bytes)?)
}

fn report(path: &Path, frames: u64, fps: Fps) -> anyhow::Result<()> {
    let size = std::fs::metadata(path)
        .with_context(|| format!("stat '{}'", path.display()))?
        .len();
    eprintln!(
        "wrote {} ({:.1} KiB, {frames} frames @ {:.0} fps, {:.1}s)",
        path.display(),
        size as f64 / 1024.0,
        fps.as_f64(),
        frames as f64 * fps.frame_duration_secs(),
    );
    Ok(())
}
