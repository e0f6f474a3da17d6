use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use ef_core::{rgb_from_u8, rgb_to_u8, Image, Rgb32};
use ef_fusion::{add_circular_padding, crop_panorama, fuse, FuseConfig};
use ef_metrics::MetricWeights;
use image::RgbImage;

#[derive(Parser, Debug)]
#[command(name = "ef_cli")]
#[command(about = "Fuse a bracket of 3 or 5 exposures into one image")]
struct Cli {
    /// Input image paths: 3 or 5 equally sized exposures of one scene
    inputs: Vec<PathBuf>,

    /// Fused output image path
    #[arg(short, long)]
    output: PathBuf,

    /// Treat inputs as 2:1 equirectangular panoramas: wrap the seam columns
    /// before fusion and crop the result back. Requires 5 inputs.
    #[arg(long)]
    panorama: bool,

    /// Contrast metric exponent (0 excludes the metric)
    #[arg(long, default_value_t = 1.0)]
    wcon: f32,

    /// Saturation metric exponent (0 excludes the metric)
    #[arg(long, default_value_t = 1.0)]
    wsat: f32,

    /// Well-exposedness metric exponent (0 excludes the metric)
    #[arg(long, default_value_t = 1.0)]
    wexp: f32,
}

fn load_rgb(path: &Path) -> Result<Image<Rgb32>> {
    let decoded = image::open(path)
        .with_context(|| format!("opening input image {}", path.display()))?
        .to_rgb8();
    let (w, h) = decoded.dimensions();
    rgb_from_u8(w as usize, h as usize, decoded.as_raw())
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn save_rgb(path: &Path, img: &Image<Rgb32>) -> Result<()> {
    let bytes = rgb_to_u8(&img.as_view());
    let out = RgbImage::from_raw(img.width() as u32, img.height() as u32, bytes)
        .context("constructing output image buffer")?;
    out.save(path)
        .with_context(|| format!("saving {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let count = cli.inputs.len();
    if count != 3 && count != 5 {
        bail!("expected 3 or 5 input images, got {count}");
    }
    if cli.panorama && count != 5 {
        bail!("panorama mode requires exactly 5 input images, got {count}");
    }

    let mut stack = Vec::with_capacity(count);
    for path in &cli.inputs {
        let img = load_rgb(path)?;
        if cli.panorama {
            if img.width() != 2 * img.height() {
                bail!(
                    "panorama input {} is {}x{}, expected a 2:1 aspect ratio",
                    path.display(),
                    img.width(),
                    img.height()
                );
            }
            stack.push(add_circular_padding(&img.as_view())?);
        } else {
            stack.push(img);
        }
    }

    let cfg = FuseConfig {
        metrics: MetricWeights {
            contrast: cli.wcon,
            saturation: cli.wsat,
            exposedness: cli.wexp,
        },
    };

    let fused = fuse(&stack, &cfg)?;
    let fused = if cli.panorama {
        crop_panorama(&fused.as_view())?
    } else {
        fused
    };

    save_rgb(&cli.output, &fused)?;
    println!("fused {count} exposures into {}", cli.output.display());
    Ok(())
}
