//! Transition matrix mapping true-length bins to observed-length bins.
//!
//! Purpose
//! -------
//! Discretize the detection-error model into a fixed k×k kernel: column `i`
//! is the sub-probability distribution over observed bins for a true block in
//! bin `i`. Built once from the grid and the calibrated error functions; it
//! is independent of the fit parameters and immutable thereafter.
//!
//! Key behaviors
//! -------------
//! - Downshifted mass follows a truncated exponential conditioned on the
//!   observed block staying above the 1 cM detection floor.
//! - Upshifted mass follows an exponential anchored at `max(x, 1)`.
//! - The diagonal averages the two one-sided densities at zero shift, the
//!   upshift side evaluated from `x` itself (reference behavior, preserved).
//!
//! Invariants & assumptions
//! ------------------------
//! - Column `i` sums to `1 − censor_prob(x_i)` up to discretization error;
//!   the shortfall is the undetected mass and is deliberately absent.
//! - For true lengths at or below 1 cM, `prob_down` is identically zero and
//!   the downshift branch (whose normalizer is singular at x = 1) is never
//!   evaluated.
//! - Construction is O(k²) and happens once per model.
use crate::sharing::core::{
    detection::{censor_prob, down_rate, prob_down, up_rate},
    grid::BinGrid,
};
use ndarray::{Array1, Array2};

/// Fixed k×k detection-error kernel over the bin grid.
///
/// Column `i` holds the distribution of observed bins given a detected true
/// block in bin `i`; applying the matrix to a theoretical per-bin sharing
/// vector yields the detected portion of the observed sharing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    /// `kernel[[j, i]]` = probability mass moved from true bin i to observed
    /// bin j.
    kernel: Array2<f64>,
}

impl TransitionMatrix {
    /// Discretize the error model over the grid.
    ///
    /// For each true bin `i` with midpoint `x` and each observed bin `j` with
    /// midpoint `y`:
    /// - `j < i`: `pr_detect(x) · prob_down(x) · down_rate(x) ·
    ///   exp(−down_rate(x)·(x−y)) / (1 − exp(−down_rate(x)·(x−1))) · w`;
    /// - `j > i`: `pr_detect(x) · (1 − prob_down(x)) · up_rate(x) ·
    ///   exp(−up_rate(x)·(y − max(x,1))) · w`;
    /// - `j = i`: half the sum of both one-sided densities at zero shift,
    ///   times `pr_detect(x) · w`; the upshift factor collapses to 1 here
    ///   (zero shift from `x`, not from `max(x, 1)`).
    pub fn from_grid(grid: &BinGrid) -> TransitionMatrix {
        let k = grid.len();
        let w = grid.bin_width();
        let mids = grid.midpoints();
        let mut kernel = Array2::zeros((k, k));
        for i in 0..k {
            let x = mids[i];
            let pr_detect = 1.0 - censor_prob(x);
            let p_down = prob_down(x);
            let rate_down = down_rate(x);
            let rate_up = up_rate(x);
            // Normalizer of the truncated downshift exponential; singular at
            // x = 1, where p_down is identically zero and the branch is
            // skipped.
            let down_norm = 1.0 - (-rate_down * (x - 1.0)).exp();
            if p_down > 0.0 {
                for j in 0..i {
                    let y = mids[j];
                    let shift = p_down * rate_down * (-rate_down * (x - y)).exp() / down_norm;
                    kernel[[j, i]] = pr_detect * shift * w;
                }
            }
            for j in (i + 1)..k {
                let y = mids[j];
                let shift = (1.0 - p_down) * rate_up * (-rate_up * (y - x.max(1.0))).exp();
                kernel[[j, i]] = pr_detect * shift * w;
            }
            let zero_down = if p_down > 0.0 { p_down * rate_down / down_norm } else { 0.0 };
            let zero_up = (1.0 - p_down) * rate_up;
            kernel[[i, i]] = pr_detect * 0.5 * (zero_down + zero_up) * w;
        }
        TransitionMatrix { kernel }
    }

    /// Fold a theoretical per-bin sharing vector through the kernel,
    /// producing the detected portion of the observed per-bin sharing.
    pub fn apply(&self, theoretical: &Array1<f64>) -> Array1<f64> {
        self.kernel.dot(theoretical)
    }

    /// The raw kernel, for reporting layers.
    pub fn kernel(&self) -> &Array2<f64> {
        &self.kernel
    }

    /// Sum of column `i`: total detection probability mass for true bin `i`.
    pub fn column_sum(&self, i: usize) -> f64 {
        self.kernel.column(i).sum()
    }
}
