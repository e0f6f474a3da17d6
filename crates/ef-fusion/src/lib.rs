//! Multi-exposure fusion.
//!
//! [`fuse`] blends a stack of pixel-registered exposures of one scene into a
//! single well-exposed image: per-pixel quality weights are normalized
//! across the stack, each image's Laplacian pyramid is blended level by
//! level under the Gaussian pyramid of its weight map, and the accumulated
//! pyramid is collapsed back to full resolution.
//!
//! For 360° panoramas, [`add_circular_padding`] and [`crop_panorama`] wrap
//! the seam columns around both horizontal edges before fusion and recover
//! the center band afterwards, so the blend sees no wrap discontinuity.
//!
//! Fusion is a pure batch computation: no state survives a call, and the
//! output is deterministic for a given input stack up to floating-point
//! rounding of the per-level accumulation order.

mod fuse;
mod panorama;

pub use fuse::{fuse, FuseConfig};
pub use panorama::{add_circular_padding, crop_panorama};
