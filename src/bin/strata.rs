use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use strata::{BlendMode, Drawable, Graphics, GraphicsOpts, IRect, Layer, ScaleMode, Surface, Texture};

#[derive(Parser, Debug)]
#[command(name = "strata", version)]
struct Cli {
    /// Graphics options JSON (scale mode, surface byte limit, clear color).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Gate an image by a same-size mask's alpha.
    Mask(MaskArgs),
    /// Flatten layer images, in order, onto a blank layer.
    Flatten(FlattenArgs),
    /// Copy a region with wraparound source addressing.
    Tile(TileArgs),
    /// Rescale an image.
    Resize(ResizeArgs),
}

#[derive(Parser, Debug)]
struct MaskArgs {
    /// Image to mask.
    #[arg(long)]
    base: PathBuf,

    /// Mask image; its alpha channel gates `--base`.
    #[arg(long)]
    mask: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FlattenArgs {
    /// Layer image, bottom first. Repeat for each layer.
    #[arg(long = "layer", required = true)]
    layers: Vec<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TileArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Region x; may be negative or past the right edge.
    #[arg(long, allow_hyphen_values = true)]
    src_x: i32,

    /// Region y; may be negative or past the bottom edge.
    #[arg(long, allow_hyphen_values = true)]
    src_y: i32,

    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ResizeArgs {
    /// Source image.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long)]
    width: u32,

    #[arg(long)]
    height: u32,

    #[arg(long, value_enum, default_value_t = ScaleChoice::Linear)]
    scale: ScaleChoice,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScaleChoice {
    Nearest,
    Linear,
}

impl From<ScaleChoice> for ScaleMode {
    fn from(choice: ScaleChoice) -> Self {
        match choice {
            ScaleChoice::Nearest => ScaleMode::Nearest,
            ScaleChoice::Linear => ScaleMode::Linear,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = match &cli.config {
        Some(path) => GraphicsOpts::from_json_file(path)?,
        None => GraphicsOpts::default(),
    };
    // Every command draws into surfaces; the display is never presented.
    let mut gfx = Graphics::new(1, 1, opts)?;

    match cli.cmd {
        Command::Mask(args) => cmd_mask(&mut gfx, args),
        Command::Flatten(args) => cmd_flatten(&mut gfx, args),
        Command::Tile(args) => cmd_tile(&mut gfx, args),
        Command::Resize(args) => cmd_resize(&mut gfx, args),
    }
}

fn load(gfx: &mut Graphics, path: &Path) -> anyhow::Result<Texture> {
    Texture::from_file(gfx, path).with_context(|| format!("load image '{}'", path.display()))
}

fn write_png<D: Drawable>(gfx: &mut Graphics, drawable: &D, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    if !drawable.save(gfx, out) {
        anyhow::bail!("write png '{}'", out.display());
    }
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_mask(gfx: &mut Graphics, args: MaskArgs) -> anyhow::Result<()> {
    let mut base = load(gfx, &args.base)?;
    let mask = load(gfx, &args.mask)?;
    base.apply_mask(gfx, &mask)?;
    write_png(gfx, &base, &args.out)
}

fn cmd_flatten(gfx: &mut Graphics, args: FlattenArgs) -> anyhow::Result<()> {
    let mut target: Option<Layer> = None;
    for path in &args.layers {
        let image = load(gfx, path)?;
        let mut layer = Layer::new(gfx, image.width(), image.height())?;
        image.render_to(gfx, &mut layer, 0, 0, BlendMode::None)?;

        let mut dst = match target.take() {
            Some(t) => t,
            None => Layer::new(gfx, image.width(), image.height())?,
        };
        layer.flatten_to(gfx, &mut dst)?;
        target = Some(dst);
    }
    let target = target.context("no layers given")?;
    write_png(gfx, &target, &args.out)
}

fn cmd_tile(gfx: &mut Graphics, args: TileArgs) -> anyhow::Result<()> {
    let source = load(gfx, &args.in_path)?;
    let mut out = Surface::new(gfx, args.width, args.height)?;
    let region = IRect::new(
        args.src_x,
        args.src_y,
        i32::try_from(args.width).context("--width out of range")?,
        i32::try_from(args.height).context("--height out of range")?,
    );
    source.render_region_to(gfx, &mut out, region, 0, 0, BlendMode::None)?;
    write_png(gfx, &out, &args.out)
}

fn cmd_resize(gfx: &mut Graphics, args: ResizeArgs) -> anyhow::Result<()> {
    let mut texture = load(gfx, &args.in_path)?;
    texture.resize(gfx, args.width, args.height, args.scale.into())?;
    write_png(gfx, &texture, &args.out)
}
