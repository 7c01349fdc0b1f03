//! Spherical panorama compositor CLI.
//!
//! Fuses captures of the upper and lower celestial sphere into one
//! equirectangular panorama using a precomputed angular calibration map.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use calmap_parser::CalibrationMap;
use compositor::{compose, ComposeOptions, RowWrapPolicy};
use pano_common::SourceImage;

#[derive(Parser, Debug)]
#[command(name = "compose")]
#[command(about = "Compose a spherical panorama from two hemisphere captures")]
struct Args {
    /// Calibration map (CMAP binary or tabular text)
    map: PathBuf,

    /// Image of the upper celestial sphere
    upper: PathBuf,

    /// Image of the lower celestial sphere
    lower: PathBuf,

    /// Output image
    output: PathBuf,

    /// Width of the output image (requires --height)
    #[arg(long)]
    width: Option<usize>,

    /// Height of the output image (requires --width)
    #[arg(long)]
    height: Option<usize>,

    /// Treat the map as open (no duplicated closing row/column)
    #[arg(long)]
    open_grid: bool,

    /// Fallback for rows sampled outside a source image: clamp or fill
    #[arg(long, default_value = "clamp")]
    row_wrap: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let row_wrap = match args.row_wrap.to_lowercase().as_str() {
        "clamp" => RowWrapPolicy::Clamp,
        "fill" => RowWrapPolicy::Fill,
        other => bail!("unknown row wrap policy '{}', expected clamp or fill", other),
    };

    if args.width.is_some() != args.height.is_some() {
        warn!("only one of --width/--height given; composing at native map resolution");
    }

    let map = CalibrationMap::load(&args.map)
        .with_context(|| format!("failed to load calibration map {}", args.map.display()))?;
    info!(
        height = map.grid.height(),
        width = map.grid.width(),
        closed = map.closed,
        "calibration map loaded"
    );

    let upper = load_image(&args.upper).context("failed to load upper-sphere image")?;
    let lower = load_image(&args.lower).context("failed to load lower-sphere image")?;

    let options = ComposeOptions {
        output_width: args.width,
        output_height: args.height,
        closed_grid: map.closed && !args.open_grid,
        row_wrap,
    };

    let composite = compose(&map.grid, &upper, &lower, &options)?;
    let (out_w, out_h) = (composite.width() as u32, composite.height() as u32);

    let buffer = image::RgbImage::from_raw(out_w, out_h, composite.into_raw())
        .context("composite buffer does not match its dimensions")?;
    buffer
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(width = out_w, height = out_h, path = %args.output.display(), "panorama written");
    Ok(())
}

fn load_image(path: &Path) -> Result<SourceImage> {
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    let img = SourceImage::from_raw(width as usize, height as usize, decoded.into_raw())?;
    Ok(img)
}
