//! Numerical-stability constants shared across the likelihood and inference
//! layers.
//!
//! The likelihood path must never produce a NaN from a log of zero
//! probability (one bad bin would poison the whole evaluation), and the
//! standard-error path must not divide by numerically zero curvature. Both
//! policies live here as named constants so call sites state intent rather
//! than magic numbers.

/// Floor applied to per-bin probabilities before taking logs in the
/// likelihood hot path. A zero-probability bin contributes a very negative
/// finite term instead of −∞/NaN.
pub const PROB_FLOOR: f64 = 1e-300;

/// Eigenvalues with magnitude at or below this threshold are treated as zero
/// when building pseudoinverse directions for standard errors, inflating
/// uncertainty along weakly identified directions instead of dividing by
/// noise.
pub const EIGEN_EPS: f64 = 1e-12;

/// Clamp a per-bin probability to the log-domain floor.
///
/// NaN inputs pass through unchanged; the pairwise evaluator owns the
/// NaN-to-sentinel policy.
pub fn floor_prob(probability: f64) -> f64 {
    if probability < PROB_FLOOR { PROB_FLOOR } else { probability }
}
