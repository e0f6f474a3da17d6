//! Image pyramid primitives for multi-resolution exposure blending.
//!
//! Resampling kernel:
//! - Both directions use the separable 5-tap binomial low-pass
//!   `[1, 4, 6, 4, 1] / 16` with reflect-101 border extension on both axes.
//! - `pyr_up` applies the zero-insertion transpose of the same kernel, so a
//!   Laplacian pyramid built and collapsed with these primitives
//!   reconstructs its source up to floating-point rounding.
//!
//! Round-up halving policy:
//! - Level `i+1` has size `((w_i + 1) / 2, (h_i + 1) / 2)`; odd dimensions
//!   round up, so no pixel column/row is dropped and dimensions need not be
//!   powers of two.
//! - `pyr_up` targets an explicit size, which must be `2w` or `2w - 1` per
//!   axis (the two sizes a round-up halving can originate from).
//!
//! Level indexing:
//! - Level 0 is full resolution; the last level is the coarsest. A pyramid
//!   of depth `L` holds `L + 1` levels.

mod pyramid;
mod resample;

pub use pyramid::{
    build_gaussian_f32, build_gaussian_rgb, build_laplacian_rgb, collapse_rgb, level_dims,
    max_pyramid_level, MIN_BASE_DIM,
};
pub use resample::{pyr_down_f32, pyr_down_rgb, pyr_up_f32, pyr_up_rgb};
