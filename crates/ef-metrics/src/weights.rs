use ef_core::{to_luma, BorderMode, Error, Image, ImageView, Rgb32};

use crate::laplacian::laplacian_3x3;

/// Additive floor keeping every weight strictly positive, so the per-pixel
/// sum across a stack never divides by zero.
pub const WEIGHT_FLOOR: f32 = 1e-12;

/// Well-exposedness curve denominator: `2 * sigma^2` with `sigma = 0.2`.
const EXPOSEDNESS_DENOM: f32 = 0.08;

/// Metric exponents. Zero excludes a metric from the product; a positive
/// value raises the metric to that power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricWeights {
    pub contrast: f32,
    pub saturation: f32,
    pub exposedness: f32,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            saturation: 1.0,
            exposedness: 1.0,
        }
    }
}

/// Scores one exposure: product of the included, exponentiated metrics plus
/// [`WEIGHT_FLOOR`].
///
/// With every exponent zero the map is uniform `1 + WEIGHT_FLOOR`, which
/// degenerates fusion to plain per-pixel averaging.
pub fn weight_map(src: &ImageView<'_, Rgb32>, exponents: &MetricWeights) -> Image<f32> {
    let w = src.width();
    let h = src.height();

    let luma = to_luma(src);
    let contrast = laplacian_3x3(&luma.as_view(), BorderMode::Reflect101);

    let mut out = Image::new_fill(w, h, 0.0f32);
    let dst = out.data_mut();
    for y in 0..h {
        let row = src.row(y);
        let lap_row = contrast.row(y);
        let dst_row = &mut dst[y * w..(y + 1) * w];

        for (x, out_px) in dst_row.iter_mut().enumerate() {
            let px = row[x];
            let mut weight = 1.0f32;

            if exponents.contrast > 0.0 {
                weight *= lap_row[x].abs().powf(exponents.contrast);
            }

            if exponents.saturation > 0.0 {
                let mean = (px[0] + px[1] + px[2]) / 3.0;
                let mut var = 0.0f32;
                for &c in &px {
                    let dev = c - mean;
                    var += dev * dev;
                }
                weight *= (var / 3.0).sqrt().powf(exponents.saturation);
            }

            if exponents.exposedness > 0.0 {
                let mut wexp = 1.0f32;
                for &c in &px {
                    let dev = c - 0.5;
                    wexp *= (-(dev * dev) / EXPOSEDNESS_DENOM).exp();
                }
                weight *= wexp.powf(exponents.exposedness);
            }

            *out_px = weight + WEIGHT_FLOOR;
        }
    }

    out
}

/// Rescales a stack of weight maps so they sum to 1 at every pixel.
///
/// The per-pixel sum is accumulated across the whole stack before any map
/// is divided.
pub fn normalize_weights(maps: &mut [Image<f32>]) -> Result<(), Error> {
    let first = maps.first().ok_or(Error::EmptyStack)?;
    let expected = (first.width(), first.height());

    for map in maps.iter() {
        let actual = (map.width(), map.height());
        if actual != expected {
            return Err(Error::DimensionMismatch { expected, actual });
        }
    }

    let mut sum = vec![0.0f32; expected.0 * expected.1];
    for map in maps.iter() {
        for (s, &v) in sum.iter_mut().zip(map.data()) {
            *s += v;
        }
    }

    for map in maps.iter_mut() {
        for (v, &s) in map.data_mut().iter_mut().zip(sum.iter()) {
            *v /= s;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ef_core::{Error, Image};

    use super::{normalize_weights, weight_map, MetricWeights};

    fn gradient_rgb(width: usize, height: usize, gain: f32) -> Image<[f32; 3]> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let v = (x + y * width) as f32 / (width * height) as f32;
                data.push([
                    (v * gain).min(1.0),
                    (v * gain * 0.8).min(1.0),
                    (v * gain * 0.6).min(1.0),
                ]);
            }
        }
        Image::from_vec(width, height, data).expect("valid image")
    }

    #[test]
    fn weights_are_strictly_positive() {
        let flat = Image::new_fill(16, 12, [0.5f32, 0.5, 0.5]);
        let textured = gradient_rgb(16, 12, 2.0);

        for img in [&flat, &textured] {
            for exponents in [
                MetricWeights::default(),
                MetricWeights {
                    contrast: 0.0,
                    saturation: 0.0,
                    exposedness: 0.0,
                },
                MetricWeights {
                    contrast: 2.0,
                    saturation: 0.5,
                    exposedness: 1.0,
                },
            ] {
                let map = weight_map(&img.as_view(), &exponents);
                for &v in map.data() {
                    assert!(v > 0.0);
                }
            }
        }
    }

    #[test]
    fn excluded_metrics_yield_uniform_map() {
        let img = gradient_rgb(8, 8, 1.0);
        let map = weight_map(
            &img.as_view(),
            &MetricWeights {
                contrast: 0.0,
                saturation: 0.0,
                exposedness: 0.0,
            },
        );

        for &v in map.data() {
            assert!((v - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn exposedness_prefers_mid_range_over_shadows() {
        let mid = Image::new_fill(6, 6, [0.5f32, 0.5, 0.5]);
        let dark = Image::new_fill(6, 6, [0.02f32, 0.02, 0.02]);
        let exponents = MetricWeights {
            contrast: 0.0,
            saturation: 0.0,
            exposedness: 1.0,
        };

        let w_mid = weight_map(&mid.as_view(), &exponents);
        let w_dark = weight_map(&dark.as_view(), &exponents);
        for (&m, &d) in w_mid.data().iter().zip(w_dark.data()) {
            assert!(m > d * 100.0);
        }
    }

    #[test]
    fn saturation_is_channel_standard_deviation() {
        let img = Image::from_vec(1, 1, vec![[1.0f32, 0.5, 0.0]]).expect("valid image");
        let exponents = MetricWeights {
            contrast: 0.0,
            saturation: 1.0,
            exposedness: 0.0,
        };

        let map = weight_map(&img.as_view(), &exponents);
        // mean 0.5, deviations (0.5, 0, -0.5) -> sqrt(0.5/3).
        let expected = (0.5f32 / 3.0).sqrt();
        assert!((map.data()[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn normalized_stack_sums_to_one() {
        let mut maps = vec![
            weight_map(&gradient_rgb(12, 9, 0.8).as_view(), &MetricWeights::default()),
            weight_map(&gradient_rgb(12, 9, 1.6).as_view(), &MetricWeights::default()),
            weight_map(&gradient_rgb(12, 9, 3.0).as_view(), &MetricWeights::default()),
        ];

        normalize_weights(&mut maps).expect("uniform stack");

        for i in 0..(12 * 9) {
            let total: f32 = maps.iter().map(|m| m.data()[i]).sum();
            assert!((total - 1.0).abs() < 1e-5, "pixel {i} sums to {total}");
        }
    }

    #[test]
    fn normalize_rejects_empty_and_mismatched_stacks() {
        assert_eq!(normalize_weights(&mut []), Err(Error::EmptyStack));

        let mut maps = vec![
            Image::new_fill(4, 4, 1.0f32),
            Image::new_fill(4, 5, 1.0f32),
        ];
        assert_eq!(
            normalize_weights(&mut maps),
            Err(Error::DimensionMismatch {
                expected: (4, 4),
                actual: (4, 5),
            })
        );
    }
}
