use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cornice::{FramePosition, FrameReader, PixelBuffer, PixelFormat};

#[derive(Parser, Debug)]
#[command(name = "cornice", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print frame margins, pixel format, and per-section sizes.
    Info(InfoArgs),
    /// Extract the frame thumbnail as a PNG.
    Thumbnail(ThumbnailArgs),
    /// Render the frame border at a destination size and write a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Frame asset directory.
    #[arg(long)]
    frame: PathBuf,
}

#[derive(Parser, Debug)]
struct ThumbnailArgs {
    /// Frame asset directory.
    #[arg(long)]
    frame: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Frame asset directory.
    #[arg(long)]
    frame: PathBuf,

    /// Destination width in pixels.
    #[arg(long)]
    width: u32,

    /// Destination height in pixels.
    #[arg(long)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Info(args) => cmd_info(args),
        Command::Thumbnail(args) => cmd_thumbnail(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let frame = FrameReader::open(&args.frame)?.read_frame()?;
    let m = frame.margins();
    let (min_w, min_h) = frame.min_canvas();

    println!("frame: {}", args.frame.display());
    println!("format: {:?}", frame.format());
    println!(
        "margins: left={} top={} right={} bottom={}",
        m.left, m.top, m.right, m.bottom
    );
    println!("minimum canvas: {min_w}x{min_h}");
    for pos in FramePosition::ALL {
        let s = frame.section(pos);
        println!(
            "  {:<12} {}x{}  offset=({},{})  repeating={}",
            pos.name(),
            s.width(),
            s.height(),
            s.x_offset(),
            s.y_offset(),
            s.repeating()
        );
    }
    Ok(())
}

fn cmd_thumbnail(args: ThumbnailArgs) -> anyhow::Result<()> {
    let thumb = FrameReader::open(&args.frame)?.read_thumbnail()?;
    write_png(&thumb, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let frame = FrameReader::open(&args.frame)?.read_frame()?;
    let rendered = cornice::render(&frame, args.width, args.height)?;
    write_png(&rendered, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_png(buf: &PixelBuffer, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let color = match buf.format() {
        PixelFormat::Gray8 => image::ColorType::L8,
        PixelFormat::GrayAlpha8 => image::ColorType::La8,
        PixelFormat::Rgb8 => image::ColorType::Rgb8,
        PixelFormat::Rgba8 => image::ColorType::Rgba8,
    };

    image::save_buffer_with_format(
        out,
        buf.as_bytes(),
        buf.width(),
        buf.height(),
        color,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}
