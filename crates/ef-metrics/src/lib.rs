//! Per-pixel quality metrics for exposure fusion.
//!
//! A weight map scores every pixel of one exposure by three metrics:
//! local contrast (absolute Laplacian of luma), color saturation (per-pixel
//! channel standard deviation), and well-exposedness (a Gaussian curve
//! around mid-range applied per channel and multiplied across channels).
//! Metric exponents of zero exclude a metric entirely; positive exponents
//! raise it to that power before the metrics are multiplied.
//!
//! Weight maps are strictly positive (an additive `1e-12` floor) so a stack
//! of maps can always be normalized to a per-pixel partition of unity.

mod laplacian;
mod weights;

pub use laplacian::laplacian_3x3;
pub use weights::{normalize_weights, weight_map, MetricWeights, WEIGHT_FLOOR};
