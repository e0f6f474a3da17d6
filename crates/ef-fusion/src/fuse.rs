use ef_core::{Error, Image, Rgb32};
use ef_metrics::{normalize_weights, weight_map, MetricWeights};
use ef_pyr::{
    build_gaussian_f32, build_laplacian_rgb, collapse_rgb, level_dims, max_pyramid_level,
};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuseConfig {
    pub metrics: MetricWeights,
}

/// Fuses a stack of equally sized, pixel-registered exposures.
///
/// Output channel values are not clamped to `[0, 1]`; display-range scaling
/// belongs to the encoding boundary.
pub fn fuse(images: &[Image<Rgb32>], cfg: &FuseConfig) -> Result<Image<Rgb32>, Error> {
    let first = images.first().ok_or(Error::EmptyStack)?;
    let expected = (first.width(), first.height());

    for img in images {
        let actual = (img.width(), img.height());
        if actual != expected {
            return Err(Error::DimensionMismatch { expected, actual });
        }
    }

    let (width, height) = expected;
    let levels = max_pyramid_level(width, height)?;
    debug!(
        "fusing {} images at {width}x{height}, pyramid depth {levels}",
        images.len()
    );

    let mut weights: Vec<Image<f32>> = images
        .iter()
        .map(|img| weight_map(&img.as_view(), &cfg.metrics))
        .collect();
    normalize_weights(&mut weights)?;

    let mut result: Vec<Image<Rgb32>> = level_dims(width, height, levels)
        .into_iter()
        .map(|(w, h)| Image::new_fill(w, h, [0.0f32; 3]))
        .collect();

    for (idx, (img, wmap)) in images.iter().zip(&weights).enumerate() {
        let lap = build_laplacian_rgb(&img.as_view(), levels);
        let wpyr = build_gaussian_f32(&wmap.as_view(), levels);
        debug!("image {idx}: accumulating {} levels", lap.len());

        for ((acc, lap_lvl), w_lvl) in result.iter_mut().zip(&lap).zip(&wpyr) {
            for ((a, l), &wv) in acc
                .data_mut()
                .iter_mut()
                .zip(lap_lvl.data())
                .zip(w_lvl.data())
            {
                for c in 0..3 {
                    a[c] += l[c] * wv;
                }
            }
        }
    }

    Ok(collapse_rgb(result))
}

#[cfg(test)]
mod tests {
    use ef_core::{Error, Image, Rgb32};
    use ef_metrics::MetricWeights;

    use super::{fuse, FuseConfig};

    fn gradient_exposure(width: usize, height: usize, gain: f32) -> Image<Rgb32> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let base = (x as f32 / width as f32) * 0.7 + (y as f32 / height as f32) * 0.3;
                data.push([
                    (base * gain).min(1.0),
                    (base * gain * 0.9).min(1.0),
                    (base * gain * 1.1).min(1.0),
                ]);
            }
        }
        Image::from_vec(width, height, data).expect("valid image")
    }

    fn max_abs_diff(a: &Image<Rgb32>, b: &Image<Rgb32>) -> f32 {
        let mut max = 0.0f32;
        for (pa, pb) in a.data().iter().zip(b.data()) {
            for c in 0..3 {
                max = max.max((pa[c] - pb[c]).abs());
            }
        }
        max
    }

    #[test]
    fn single_image_fusion_is_identity() {
        let img = gradient_exposure(48, 20, 1.0);
        let fused = fuse(&[img.clone()], &FuseConfig::default()).expect("valid stack");
        assert!(max_abs_diff(&fused, &img) < 1e-5);
    }

    #[test]
    fn identical_gray_stack_fuses_to_itself() {
        let gray = Image::new_fill(64, 32, [128.0f32 / 255.0; 3]);
        let stack = vec![gray.clone(); 5];
        let fused = fuse(&stack, &FuseConfig::default()).expect("valid stack");

        assert_eq!(fused.width(), 64);
        assert_eq!(fused.height(), 32);
        assert!(max_abs_diff(&fused, &gray) < 1e-5);
    }

    #[test]
    fn well_exposed_image_dominates_dark_one() {
        let mid = Image::new_fill(32, 16, [0.5f32; 3]);
        let dark = Image::new_fill(32, 16, [0.002f32; 3]);
        let cfg = FuseConfig {
            metrics: MetricWeights {
                contrast: 0.0,
                saturation: 0.0,
                exposedness: 1.0,
            },
        };

        let fused = fuse(&[mid.clone(), dark.clone()], &cfg).expect("valid stack");
        for px in fused.data() {
            for c in 0..3 {
                let to_mid = (px[c] - 0.5).abs();
                let to_dark = (px[c] - 0.002).abs();
                assert!(to_mid < to_dark * 0.05);
            }
        }
    }

    #[test]
    fn fusion_is_order_invariant() {
        let a = gradient_exposure(40, 24, 0.6);
        let b = gradient_exposure(40, 24, 1.3);
        let c = gradient_exposure(40, 24, 2.5);
        let cfg = FuseConfig::default();

        let fwd = fuse(&[a.clone(), b.clone(), c.clone()], &cfg).expect("valid stack");
        let rev = fuse(&[c, b, a], &cfg).expect("valid stack");
        assert!(max_abs_diff(&fwd, &rev) < 1e-4);
    }

    #[test]
    fn empty_stack_is_rejected() {
        assert_eq!(fuse(&[], &FuseConfig::default()), Err(Error::EmptyStack));
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let a = Image::new_fill(32, 16, [0.5f32; 3]);
        let b = Image::new_fill(32, 18, [0.5f32; 3]);
        assert_eq!(
            fuse(&[a, b], &FuseConfig::default()),
            Err(Error::DimensionMismatch {
                expected: (32, 16),
                actual: (32, 18),
            })
        );
    }

    #[test]
    fn tiny_images_are_rejected() {
        let img = Image::new_fill(3, 3, [0.5f32; 3]);
        assert!(matches!(
            fuse(&[img], &FuseConfig::default()),
            Err(Error::ImageTooSmall { .. })
        ));
    }
}
