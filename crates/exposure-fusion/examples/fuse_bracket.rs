//! Example: fuse an exposure bracket and report timing.
//!
//! Loads a list of equally sized RGB exposures, fuses them with the default
//! quality metrics, writes the fused image, and drops a JSON report next to
//! it (per-stage millisecond timings, pyramid depth, level sizes, and
//! per-channel means of the result).
//!
//! Run from the workspace root:
//!   cargo run -p exposure-fusion --example fuse_bracket -- --help
//!   cargo run -p exposure-fusion --example fuse_bracket -- \
//!       under.png normal.png over.png -o fused.png

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use exposure_fusion::{
    fuse, level_dims, max_pyramid_level, rgb_from_u8, rgb_to_u8, split_channels, FuseConfig,
    Image, Rgb32,
};
use image::RgbImage;
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Fuse an exposure bracket and report per-stage timing")]
struct Args {
    /// Input image paths, brightest-to-darkest order is irrelevant
    inputs: Vec<PathBuf>,

    /// Fused output image path
    #[arg(short, long, default_value = "fused.png")]
    output: PathBuf,

    /// Report JSON path (default: <output stem>_report.json next to output)
    #[arg(long)]
    report: Option<PathBuf>,
}

// ── JSON report ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Report {
    inputs: Vec<String>,
    width: usize,
    height: usize,
    pyramid_depth: usize,
    level_sizes: Vec<[usize; 2]>,
    decode_ms: f64,
    fuse_ms: f64,
    encode_ms: f64,
    channel_means: [f32; 3],
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_rgb(path: &Path) -> Result<Image<Rgb32>> {
    let decoded = image::open(path)
        .with_context(|| format!("opening input image {}", path.display()))?
        .to_rgb8();
    let (w, h) = decoded.dimensions();
    rgb_from_u8(w as usize, h as usize, decoded.as_raw())
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn channel_means(img: &Image<Rgb32>) -> [f32; 3] {
    let [r, g, b] = split_channels(&img.as_view());
    [r, g, b].map(|plane| {
        let sum: f32 = plane.data().iter().sum();
        sum / plane.data().len() as f32
    })
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    anyhow::ensure!(!args.inputs.is_empty(), "at least one input image required");

    let report_path = args.report.clone().unwrap_or_else(|| {
        let stem = args.output.file_stem().unwrap_or_default().to_string_lossy();
        let dir = args.output.parent().unwrap_or(Path::new("."));
        dir.join(format!("{stem}_report.json"))
    });

    let t0 = Instant::now();
    let stack = args
        .inputs
        .iter()
        .map(|p| load_rgb(p))
        .collect::<Result<Vec<_>>>()?;
    let decode_ms = t0.elapsed().as_secs_f64() * 1e3;

    let (width, height) = (stack[0].width(), stack[0].height());
    let pyramid_depth = max_pyramid_level(width, height)?;
    println!(
        "loaded {} exposures at {width}x{height}, pyramid depth {pyramid_depth}",
        stack.len()
    );

    let t1 = Instant::now();
    let fused = fuse(&stack, &FuseConfig::default())?;
    let fuse_ms = t1.elapsed().as_secs_f64() * 1e3;
    println!("fused in {fuse_ms:.2} ms");

    let t2 = Instant::now();
    let bytes = rgb_to_u8(&fused.as_view());
    let out = RgbImage::from_raw(width as u32, height as u32, bytes)
        .context("constructing output image buffer")?;
    out.save(&args.output)
        .with_context(|| format!("saving {}", args.output.display()))?;
    let encode_ms = t2.elapsed().as_secs_f64() * 1e3;

    let report = Report {
        inputs: args.inputs.iter().map(|p| p.display().to_string()).collect(),
        width,
        height,
        pyramid_depth,
        level_sizes: level_dims(width, height, pyramid_depth)
            .into_iter()
            .map(|(w, h)| [w, h])
            .collect(),
        decode_ms,
        fuse_ms,
        encode_ms,
        channel_means: channel_means(&fused),
    };

    let file = std::fs::File::create(&report_path)
        .with_context(|| format!("creating {}", report_path.display()))?;
    serde_json::to_writer_pretty(file, &report)
        .with_context(|| format!("writing JSON to {}", report_path.display()))?;

    println!("wrote {} and {}", args.output.display(), report_path.display());
    Ok(())
}
