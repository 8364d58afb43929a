use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use jokeframe::{
    CaptionFace, DOWNLOAD_FILE_NAME, EditDoc, EditSession, FontFace, LayoutMode, Point, Rgb8,
    ShapeKind, build_mask,
};

#[derive(Parser, Debug)]
#[command(name = "jokeframe", version)]
struct Cli {
    /// Log at debug level (otherwise `RUST_LOG`, default `warn`).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one photo into a framed, captioned PNG.
    Render(RenderArgs),
    /// Print a frame shape as SVG path data.
    Mask(MaskArgs),
    /// List the available frame shapes.
    Shapes,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutArg {
    Fill,
    Inset,
}

impl From<LayoutArg> for LayoutMode {
    fn from(v: LayoutArg) -> Self {
        match v {
            LayoutArg::Fill => LayoutMode::Fill,
            LayoutArg::Inset => LayoutMode::Inset,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Source photo (png, jpeg, gif, webp, bmp, ...).
    #[arg(long)]
    image: PathBuf,

    /// Output PNG path.
    #[arg(long, default_value = DOWNLOAD_FILE_NAME)]
    out: PathBuf,

    /// Edit document JSON; flags below override its fields.
    #[arg(long)]
    doc: Option<PathBuf>,

    /// TTF/OTF font for the caption. Required when the caption is not blank.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Frame shape id (circle, square, triangle, hexagon, star, heart, diamond, none).
    #[arg(long)]
    shape: Option<String>,

    #[arg(long)]
    layout: Option<LayoutArg>,

    /// Caption text.
    #[arg(long)]
    text: Option<String>,

    /// Caption color as #RRGGBB.
    #[arg(long)]
    color: Option<String>,

    /// Caption size in px (clamped to 16..=48).
    #[arg(long)]
    size: Option<u32>,

    /// Caption center x in canvas pixels.
    #[arg(long)]
    x: Option<f64>,

    /// Caption center y in canvas pixels.
    #[arg(long)]
    y: Option<f64>,
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Frame shape id.
    #[arg(long, default_value = "circle")]
    shape: String,

    #[arg(long, default_value_t = 600)]
    width: u32,

    #[arg(long, default_value_t = 700)]
    height: u32,
}

/// Face for captionless renders; never asked to draw anything.
struct NoGlyphs;

impl CaptionFace for NoGlyphs {
    fn measure(&mut self, _text: &str, _size_px: f32) -> f64 {
        0.0
    }

    fn fill_line(
        &mut self,
        _ctx: &mut jokeframe::vello_cpu::RenderContext,
        _text: &str,
        _size_px: f32,
        _anchor: Point,
    ) {
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Mask(args) => cmd_mask(args),
        Command::Shapes => {
            for shape in ShapeKind::ALL {
                println!("{}\t{}", shape.id(), shape.label());
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("jokeframe=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut doc = match &args.doc {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read edit document '{}'", path.display()))?;
            EditDoc::from_json_str(&json)
                .with_context(|| format!("parse edit document '{}'", path.display()))?
        }
        None => EditDoc::default(),
    };

    if let Some(shape) = &args.shape {
        doc.shape = ShapeKind::from_id(shape);
    }
    if let Some(layout) = args.layout {
        doc.layout = Some(layout.into());
    }
    if let Some(text) = args.text {
        doc.text = text;
    }
    if let Some(color) = &args.color {
        doc.color = Some(Rgb8::from_hex(color)?);
    }
    if let Some(size) = args.size {
        doc.size = Some(size);
    }
    if args.x.is_some() || args.y.is_some() {
        let base = doc.position.unwrap_or_else(|| doc.opts.canvas.center());
        doc.position = Some(Point::new(
            args.x.unwrap_or(base.x),
            args.y.unwrap_or(base.y),
        ));
    }

    let face: Box<dyn CaptionFace> = match &args.font {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font '{}'", path.display()))?;
            Box::new(FontFace::from_bytes(bytes)?)
        }
        None if jokeframe::is_blank(&doc.text) => Box::new(NoGlyphs),
        None => anyhow::bail!("caption text needs a font; pass --font <path>"),
    };

    let image_bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;

    let mut session = EditSession::with_opts(doc.opts.clone(), face)?;
    session.apply_doc(&doc)?;
    session.load_image(&image_bytes)?;
    let png = session
        .png()
        .context("session produced no composite")?
        .to_vec();
    session.teardown();

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_mask(args: MaskArgs) -> anyhow::Result<()> {
    let canvas = jokeframe::Canvas::new(args.width, args.height);
    if canvas.is_empty() {
        anyhow::bail!("mask area {}x{} is empty", args.width, args.height);
    }
    let shape = ShapeKind::from_id(&args.shape);
    match build_mask(shape, canvas.rect()).to_svg() {
        Some(svg) => println!("{svg}"),
        None => eprintln!("shape '{shape}' has no mask"),
    }
    Ok(())
}
