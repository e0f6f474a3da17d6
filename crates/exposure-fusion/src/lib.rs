//! Umbrella crate for the `exposure-fusion` workspace.
//!
//! Re-exports the image primitives, pyramid codec, quality metrics and the
//! fusion entry points from the foundational crates.

pub use ef_core::*;
pub use ef_fusion::*;
pub use ef_metrics::*;
pub use ef_pyr::*;
