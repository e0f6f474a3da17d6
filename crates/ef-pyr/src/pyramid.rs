use ef_core::{Error, Image, ImageView, Rgb32};

use crate::resample::{half_dim, pyr_down_f32, pyr_down_rgb, pyr_up_rgb};

/// Smallest image dimension for which at least one pyramid level exists.
pub const MIN_BASE_DIM: usize = 4;

/// Pyramid depth for a given base size: `floor(log2(min(w, h))) - 1`.
///
/// The depth is computed once per fusion call and threaded into every
/// pyramid build so that all pyramids of one call share it.
pub fn max_pyramid_level(width: usize, height: usize) -> Result<usize, Error> {
    let min_dim = width.min(height);
    if min_dim < MIN_BASE_DIM {
        return Err(Error::ImageTooSmall {
            width,
            height,
            min_dim: MIN_BASE_DIM,
        });
    }

    Ok(min_dim.ilog2() as usize - 1)
}

/// Sizes of the `levels + 1` pyramid levels for a given base size.
pub fn level_dims(width: usize, height: usize, levels: usize) -> Vec<(usize, usize)> {
    let mut dims = Vec::with_capacity(levels + 1);
    let (mut w, mut h) = (width, height);
    dims.push((w, h));
    for _ in 0..levels {
        w = half_dim(w);
        h = half_dim(h);
        dims.push((w, h));
    }
    dims
}

/// Gaussian pyramid of a scalar map: `levels + 1` successive low-pass,
/// half-resolution copies.
pub fn build_gaussian_f32(src: &ImageView<'_, f32>, levels: usize) -> Vec<Image<f32>> {
    let mut pyr = Vec::with_capacity(levels + 1);
    let mut current = src.to_image();
    for _ in 0..levels {
        let next = pyr_down_f32(&current.as_view());
        pyr.push(current);
        current = next;
    }
    pyr.push(current);
    pyr
}

/// Gaussian pyramid of an RGB image.
pub fn build_gaussian_rgb(src: &ImageView<'_, Rgb32>, levels: usize) -> Vec<Image<Rgb32>> {
    let mut pyr = Vec::with_capacity(levels + 1);
    let mut current = src.to_image();
    for _ in 0..levels {
        let next = pyr_down_rgb(&current.as_view());
        pyr.push(current);
        current = next;
    }
    pyr.push(current);
    pyr
}

/// Laplacian pyramid of an RGB image.
///
/// Levels `0..levels` hold the residual against the up-sampled next-coarser
/// Gaussian level; the last level stays the plain low-pass image.
pub fn build_laplacian_rgb(src: &ImageView<'_, Rgb32>, levels: usize) -> Vec<Image<Rgb32>> {
    let mut pyr = build_gaussian_rgb(src, levels);

    for lvl in 0..levels {
        let (fine, coarse) = pyr.split_at_mut(lvl + 1);
        let fine = &mut fine[lvl];
        let up = pyr_up_rgb(&coarse[0].as_view(), fine.width(), fine.height());
        for (d, u) in fine.data_mut().iter_mut().zip(up.data()) {
            for c in 0..3 {
                d[c] -= u[c];
            }
        }
    }

    pyr
}

/// Collapses a blended Laplacian pyramid back to full resolution.
///
/// Exact inverse of the residual subtraction in [`build_laplacian_rgb`]:
/// each level is up-sampled with the same kernel and added into the next
/// finer one, finishing at level 0.
pub fn collapse_rgb(mut levels: Vec<Image<Rgb32>>) -> Image<Rgb32> {
    assert!(!levels.is_empty(), "cannot collapse an empty pyramid");

    for lvl in (1..levels.len()).rev() {
        let (fine, coarse) = levels.split_at_mut(lvl);
        let dst = &mut fine[lvl - 1];
        let up = pyr_up_rgb(&coarse[0].as_view(), dst.width(), dst.height());
        for (d, u) in dst.data_mut().iter_mut().zip(up.data()) {
            for c in 0..3 {
                d[c] += u[c];
            }
        }
    }

    levels.swap_remove(0)
}
