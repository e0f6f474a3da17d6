//! Foundational primitives for exposure fusion.
//!
//! ## Image Layout
//! Images are owned, contiguous, row-major grids generic over the element
//! type. RGB pixels are `[f32; 3]` elements (see [`Rgb32`]); scalar maps
//! (weights, luma) are `f32` elements. Normalized pixel data lives in
//! `[0, 1]`; fusion output may leave that range and is rescaled only at the
//! encoding boundary.
//!
//! ## Image Views and Stride
//! Views use element stride (not byte stride). `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`,
//! which allows borrowed rectangular subviews (used by the panorama crop).
//!
//! ## Border Modes
//! Out-of-range sampling supports clamp and reflect-101 behavior.
//! Reflect-101 mirrors around edge elements without repeating them and is
//! the extension rule for every resampling kernel in this workspace.

mod border;
mod channel;
mod error;
mod image;

pub use border::{map_index, BorderMode};
pub use channel::{
    merge_channels, rgb_from_u8, rgb_to_u8, split_channels, to_luma, Rgb32,
};
pub use error::Error;
pub use image::{Image, ImageView};
