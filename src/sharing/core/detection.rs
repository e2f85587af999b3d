//! Calibrated detection-error functions and the false-positive profile.
//!
//! Purpose
//! -------
//! Provide the closed-form error model governing how true IBD blocks are
//! detected and distorted: the probability a block is missed entirely, the
//! direction and rate of length distortion given detection, and the
//! background rate of spurious detections. All functions are pure and
//! deterministic; the constants are empirical calibrations against
//! detection-error studies (Ralph & Coop 2013) and are treated as fixed
//! configuration, not derived quantities.
//!
//! Key behaviors
//! -------------
//! - [`censor_prob`] / [`prob_down`] / [`up_rate`] / [`down_rate`] feed the
//!   transition-matrix builder.
//! - [`fp_rate`] and [`ErrorProfile`] supply the per-bin false-positive mass
//!   added to every observed-probability vector.
//!
//! Conventions
//! -----------
//! - Lengths are centiMorgans; rates are per cM.
//! - `up_rate` takes the length argument for signature uniformity with the
//!   other distortion rates even though the calibration is constant.
//! - Blocks of 1 cM or less are never observed shorter than truth:
//!   `prob_down(l) = 0` for `l ≤ 1`.
use crate::sharing::core::grid::BinGrid;
use ndarray::Array1;

const CENSOR_SCALE: f64 = 0.0772355;
const CENSOR_RATE: f64 = 0.5423082;

const DOWN_WEIGHT: f64 = 0.341945;
const DOWN_SHAPE_SCALE: f64 = 0.5066205;
const DOWN_SHAPE_RATE: f64 = 0.6761991;

const UP_RATE: f64 = 1.399283;

const DOWN_RATE_CAP: f64 = 12.0;
const DOWN_RATE_BASE: f64 = 0.4009342;
const DOWN_RATE_SCALE: f64 = 0.18161222;

const FP_INTERCEPT: f64 = -13.704;
const FP_LINEAR: f64 = -2.095;
const FP_SQRT: f64 = 4.381;
/// Total genetic map length (cM) scaling the per-cM false-positive density to
/// a per-pair rate.
const GENOME_LENGTH_CM: f64 = 3587.0;

/// Probability a true block of length `length` (cM) is never detected.
///
/// `1 / (1 + a·l²·exp(b·l))`; decreases monotonically in `l` for positive
/// lengths, approaching 1 as `l → 0`.
pub fn censor_prob(length: f64) -> f64 {
    1.0 / (1.0 + CENSOR_SCALE * length.powi(2) * (CENSOR_RATE * length).exp())
}

/// Probability that, given detection, the observed length underestimates the
/// true length.
///
/// Uses the overhang `l1 = max(l − 1, 0)`: a block at or below 1 cM cannot be
/// shortened, so the probability is exactly zero there.
pub fn prob_down(length: f64) -> f64 {
    let overhang = (length - 1.0).max(0.0);
    (1.0 - 1.0 / (1.0 + DOWN_SHAPE_SCALE * overhang * (DOWN_SHAPE_RATE * overhang).exp()))
        * DOWN_WEIGHT
}

/// Rate of the truncated exponential governing overestimation magnitude.
///
/// Constant in the calibration; the length argument is kept for signature
/// uniformity with [`down_rate`].
pub fn up_rate(_length: f64) -> f64 {
    UP_RATE
}

/// Rate of the truncated exponential governing underestimation magnitude.
///
/// Capped at 12 to avoid blow-up as `length → 0`.
pub fn down_rate(length: f64) -> f64 {
    DOWN_RATE_CAP.min(DOWN_RATE_BASE + 1.0 / (DOWN_RATE_SCALE * length))
}

/// Expected false-positive segment rate per pair, per cM, at length `length`.
///
/// `exp(−13.704 − 2.095·l + 4.381·√l)` scaled by the total map length.
pub fn fp_rate(length: f64) -> f64 {
    (FP_INTERCEPT + FP_LINEAR * length + FP_SQRT * length.sqrt()).exp() * GENOME_LENGTH_CM
}

/// Per-bin false-positive probability mass, computed once from [`fp_rate`]
/// and the bin width.
///
/// Owned by the model instance; immutable after construction and added to
/// every full-bin probability vector when error modeling is enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorProfile {
    /// False-positive mass per bin: `fp_rate(midpoint) · bin_width`.
    per_bin: Array1<f64>,
}

impl ErrorProfile {
    /// Evaluate the false-positive rate at every grid midpoint and scale by
    /// the bin width.
    pub fn from_grid(grid: &BinGrid) -> ErrorProfile {
        let per_bin = grid.midpoints().mapv(fp_rate) * grid.bin_width();
        ErrorProfile { per_bin }
    }

    /// Per-bin false-positive mass vector.
    pub fn per_bin(&self) -> &Array1<f64> {
        &self.per_bin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sharing::core::grid::GridConfig;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Range and monotonicity properties of the calibrated error functions.
    // - The down-rate cap and the zero-down region at short lengths.
    // - ErrorProfile construction against a direct evaluation.
    //
    // They intentionally DO NOT cover:
    // - How these functions combine inside the transition matrix (covered in
    //   the transition-matrix tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that censoring probabilities are proper probabilities and that
    // longer blocks are less likely to go undetected.
    //
    // Given
    // -----
    // - A spread of positive lengths from 0.1 to 30 cM.
    //
    // Expect
    // ------
    // - `censor_prob(l)` lies strictly inside (0, 1) for every l > 0.
    // - `censor_prob(1) > censor_prob(10)`.
    fn censor_prob_is_a_probability_and_decreases_with_length() {
        for &length in &[0.1, 0.5, 1.0, 4.0, 10.0, 30.0] {
            let p = censor_prob(length);
            assert!(p > 0.0 && p < 1.0, "censor_prob({length}) = {p} outside (0, 1)");
        }
        assert!(censor_prob(1.0) > censor_prob(10.0));
    }

    #[test]
    // Purpose
    // -------
    // Confirm the zero-down region and the downweighted asymptote of
    // `prob_down`.
    //
    // Given
    // -----
    // - Lengths at and below the 1 cM overhang threshold, and well above it.
    //
    // Expect
    // ------
    // - `prob_down(l) == 0` exactly for l ≤ 1.
    // - `prob_down` increases with length and stays below the 0.341945
    //   calibration weight.
    fn prob_down_vanishes_below_one_cm_and_saturates_above() {
        assert_eq!(prob_down(0.5), 0.0);
        assert_eq!(prob_down(1.0), 0.0);

        let short = prob_down(2.0);
        let long = prob_down(10.0);
        assert!(short > 0.0);
        assert!(long > short);
        assert!(long < DOWN_WEIGHT);
    }

    #[test]
    // Purpose
    // -------
    // Exercise the down-rate cap at short lengths and the closed form away
    // from it; `up_rate` is the calibration constant everywhere.
    //
    // Given
    // -----
    // - A very short length (0.1 cM) and a long one (10 cM).
    //
    // Expect
    // ------
    // - `down_rate(0.1) == 12.0` (capped).
    // - `down_rate(10)` matches `0.4009342 + 1/(0.18161222·10)` and is
    //   uncapped.
    // - `up_rate` returns 1.399283 regardless of length.
    fn distortion_rates_match_calibration() {
        assert_eq!(down_rate(0.1), 12.0);
        assert_relative_eq!(down_rate(10.0), 0.4009342 + 1.0 / 1.8161222, epsilon = 1e-12);
        assert!(down_rate(10.0) < 12.0);

        assert_eq!(up_rate(0.1), 1.399283);
        assert_eq!(up_rate(25.0), 1.399283);
    }

    #[test]
    // Purpose
    // -------
    // Check that the false-positive rate is positive and falls off for the
    // block lengths inside the analysis window.
    //
    // Given
    // -----
    // - Lengths 4 and 10 cM (window territory, past the short-length bump).
    //
    // Expect
    // ------
    // - Both rates are strictly positive and `fp_rate(4) > fp_rate(10)`.
    fn fp_rate_is_positive_and_decays_in_the_window() {
        let at_four = fp_rate(4.0);
        let at_ten = fp_rate(10.0);
        assert!(at_four > 0.0 && at_ten > 0.0);
        assert!(at_four > at_ten);
    }

    #[test]
    // Purpose
    // -------
    // Verify that `ErrorProfile::from_grid` evaluates `fp_rate` at every
    // midpoint and scales by the bin width.
    //
    // Given
    // -----
    // - The default POPRES grid.
    //
    // Expect
    // ------
    // - The profile has one entry per bin, each equal to
    //   `fp_rate(midpoint) · bin_width`.
    fn error_profile_scales_fp_rate_by_bin_width() {
        let grid = BinGrid::new(&GridConfig::default()).expect("default config should validate");
        let profile = ErrorProfile::from_grid(&grid);

        assert_eq!(profile.per_bin().len(), grid.len());
        for (mass, &midpoint) in profile.per_bin().iter().zip(grid.midpoints()) {
            assert_relative_eq!(*mass, fp_rate(midpoint) * grid.bin_width(), epsilon = 1e-15);
        }
    }
}
