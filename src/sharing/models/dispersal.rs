//! Dispersal model: Poisson point-process likelihood over binned block
//! sharing.
//!
//! This module wires the sharing core to the `LogLikelihood` trait. A
//! [`DispersalModel`] owns the immutable derived state (bin grid,
//! false-positive profile, transition matrix), evaluates per-pair
//! log-likelihoods against caller-owned observations, and exposes fit
//! orchestration plus post-fit queries (standard errors, interval
//! estimates).
//!
//! Key ideas:
//! - Per pair and per parameter vector, the theoretical sharing density is
//!   folded through the fixed transition matrix and false-positive profile
//!   into observed per-bin probabilities.
//! - Within the analysis window, each of the pair's `comparisons` trials may
//!   produce a detected block per bin: the log-likelihood is
//!   `Σ log p[bin(l)] − comparisons · Σ p[bin]`.
//! - Infeasible parameters (any component ≤ 0 or non-finite) short-circuit
//!   to −∞ for every pair without touching the density engine.
use crate::{
    inference::hessian::calc_standard_errors,
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Cost, LogLikelihood, OptimOutcome, Theta, maximize},
        numerical_stability::floor_prob,
    },
    sharing::{
        core::{
            data::{PairObservation, SharingData},
            density::DispersalKernel,
            detection::ErrorProfile,
            grid::BinGrid,
            options::SharingOptions,
            params::{DispersalParams, PARAM_DIM},
            transition::TransitionMatrix,
        },
        errors::{SharingError, SharingResult},
    },
};
use finitediff::FiniteDiff;
use ndarray::{Array1, s};

/// Block-sharing dispersal model with a calibrated detection-error layer.
///
/// Owns the derived immutable state and caches the latest fit. Observation
/// data stay with the caller and are passed by reference into `fit` and the
/// likelihood entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct DispersalModel {
    /// Theoretical sharing-density kernel (demographic-history variant).
    pub kernel: DispersalKernel,
    /// Configured starting parameters for fits without an explicit start.
    pub start_params: DispersalParams,
    /// Grid, error-model flag, and optimizer configuration.
    pub options: SharingOptions,
    /// Discretized length axis and analysis window.
    pub grid: BinGrid,
    /// Per-bin false-positive mass.
    pub fp_profile: ErrorProfile,
    /// Detection-error kernel; absent when the error model is disabled.
    pub trans_mat: Option<TransitionMatrix>,
    /// Optimizer outcome of the latest fit.
    pub results: Option<OptimOutcome>,
    /// Parameter estimate of the latest fit.
    pub estimates: Option<DispersalParams>,
}

impl DispersalModel {
    /// Construct the model and its derived state.
    ///
    /// Builds the validated [`BinGrid`], the false-positive profile, and —
    /// when the error model is enabled — the O(k²) transition matrix. All
    /// three are immutable for the lifetime of the instance.
    ///
    /// # Errors
    /// - Any grid/window configuration error from [`BinGrid::new`].
    pub fn new(
        kernel: DispersalKernel, start_params: DispersalParams, options: SharingOptions,
    ) -> SharingResult<Self> {
        let grid = BinGrid::new(&options.grid)?;
        let fp_profile = ErrorProfile::from_grid(&grid);
        let trans_mat = options.error_model.then(|| TransitionMatrix::from_grid(&grid));
        Ok(DispersalModel {
            kernel,
            start_params,
            options,
            grid,
            fp_profile,
            trans_mat,
            results: None,
            estimates: None,
        })
    }

    /// Theoretical per-bin sharing for a pair at `distance`: density at the
    /// grid midpoints times the bin width.
    pub fn theoretical_sharing(&self, distance: f64, params: &DispersalParams) -> Array1<f64> {
        self.kernel.density(self.grid.midpoints().view(), distance, params) * self.grid.bin_width()
    }

    /// Observed per-bin probabilities: the theoretical sharing folded
    /// through the transition matrix plus the false-positive profile, or the
    /// theoretical sharing unchanged when the error model is disabled.
    pub fn full_bin_probability(&self, theoretical: &Array1<f64>) -> Array1<f64> {
        match &self.trans_mat {
            Some(trans_mat) => trans_mat.apply(theoretical) + self.fp_profile.per_bin(),
            None => theoretical.clone(),
        }
    }

    /// Poisson point-process log-likelihood of one pair's observations.
    ///
    /// Blocks outside the window's length range are discarded; each retained
    /// block contributes the log of its bin's (floored) probability, and the
    /// no-detection expectation `comparisons · Σ window p` is subtracted. A
    /// degenerate evaluation reports −∞ for this pair only.
    pub fn pairwise_loglik(&self, pair: &PairObservation, params: &DispersalParams) -> f64 {
        let theoretical = self.theoretical_sharing(pair.distance, params);
        let full = self.full_bin_probability(&theoretical);
        let (lo, hi) = self.grid.window();
        let expected = full.slice(s![lo..hi]).sum() * pair.comparisons as f64;

        let mut observed = 0.0;
        for &length in &pair.blocks {
            if let Some(bin) = self.grid.window_bin(length) {
                observed += floor_prob(full[bin]).ln();
            }
        }

        let loglik = observed - expected;
        // One pair's numeric breakdown must not poison the whole round.
        if loglik.is_nan() { f64::NEG_INFINITY } else { loglik }
    }

    /// Vector of per-pair log-likelihoods at validated parameters.
    pub fn loglik_obs(&self, params: &DispersalParams, data: &SharingData) -> Array1<f64> {
        self.loglik_obs_raw(params.scale, params.sigma, data)
    }

    /// Per-pair log-likelihoods at raw parameter values, applying the
    /// infeasibility sentinel: any component ≤ 0 or non-finite yields −∞
    /// for every pair without invoking the density engine.
    fn loglik_obs_raw(&self, scale: f64, sigma: f64, data: &SharingData) -> Array1<f64> {
        if !scale.is_finite() || scale <= 0.0 || !sigma.is_finite() || sigma <= 0.0 {
            return Array1::from_elem(data.len(), f64::NEG_INFINITY);
        }
        let params = DispersalParams { scale, sigma };
        data.pairs.iter().map(|pair| self.pairwise_loglik(pair, &params)).collect()
    }

    /// Fit by maximum likelihood and cache the outcome.
    ///
    /// Starts from `start` (falling back to the configured
    /// [`start_params`](Self::start_params)); `max_iter`, when given,
    /// overrides the configured iteration cap for this fit. On success the
    /// optimizer outcome and the materialized parameter estimate are cached
    /// for later queries and the full outcome is returned. Non-convergence
    /// is reported through the outcome diagnostics, not as an error.
    ///
    /// # Errors
    /// - Any optimizer-layer error from [`maximize`].
    /// - Parameter-domain errors when materializing the estimate from θ̂.
    pub fn fit(
        &mut self, data: &SharingData, start: Option<DispersalParams>, max_iter: Option<usize>,
    ) -> OptResult<OptimOutcome> {
        let start = start.unwrap_or(self.start_params);
        let theta0 = start.to_theta();
        let mut opts = self.options.mle_opts.clone();
        if let Some(cap) = max_iter {
            opts.tols.max_iter = Some(cap);
        }
        let outcome = maximize(&*self, theta0, data, &opts)?;
        self.estimates = Some(DispersalParams::from_theta(outcome.theta_hat.view())?);
        self.results = Some(outcome.clone());
        Ok(outcome)
    }

    /// Classical standard errors at the fitted estimate.
    ///
    /// Differences the negative total log-likelihood twice to form the
    /// observed information at θ̂ and pseudo-inverts it. Requires a prior
    /// successful [`fit`](Self::fit).
    ///
    /// # Errors
    /// - [`OptError::ModelNotFitted`] before any fit.
    /// - Finite-difference/Hessian validation errors from the inference
    ///   layer.
    pub fn standard_errors(&self, data: &SharingData) -> OptResult<Array1<f64>> {
        let estimates = self.estimates.ok_or(OptError::ModelNotFitted)?;
        let theta_hat = estimates.to_theta();
        let neg_loglik =
            |theta: &Theta| -> f64 { -self.loglik_obs_raw(theta[0], theta[1], data).sum() };
        let grad_fn = |theta: &Theta| -> Theta { theta.central_diff(&neg_loglik) };
        calc_standard_errors(&grad_fn, &theta_hat)
    }

    /// Expected sharing mass over an arbitrary length interval, per
    /// distance.
    ///
    /// Averages the full-bin probabilities over the bins covering
    /// `interval` and rescales by `(end − start) / bin_width`; an interval
    /// exactly spanning one bin reproduces that bin's probability. Uses the
    /// last fitted estimate when `params` is omitted. A post-fit reporting
    /// utility — not part of the optimization loop.
    ///
    /// # Errors
    /// - [`SharingError::ModelNotFitted`] when `params` is omitted before
    ///   any fit.
    /// - Interval validation errors from [`BinGrid::interval_cover`].
    pub fn estimated_sharing(
        &self, interval: (f64, f64), distances: &[f64], params: Option<DispersalParams>,
    ) -> SharingResult<Array1<f64>> {
        let params = match params {
            Some(params) => params,
            None => self.estimates.ok_or(SharingError::ModelNotFitted)?,
        };
        let (first, last) = self.grid.interval_cover(interval.0, interval.1)?;
        let bins = (last - first + 1) as f64;
        let rescale = (interval.1 - interval.0) / self.grid.bin_width();

        let mut estimates = Array1::zeros(distances.len());
        for (slot, &distance) in estimates.iter_mut().zip(distances) {
            let theoretical = self.theoretical_sharing(distance, &params);
            let full = self.full_bin_probability(&theoretical);
            let mean = full.slice(s![first..=last]).sum() / bins;
            *slot = mean * rescale;
        }
        Ok(estimates)
    }
}

impl LogLikelihood for DispersalModel {
    type Data = SharingData;

    /// Summed log-likelihood at the optimizer-space vector `θ = [scale,
    /// sigma]`; −∞ marks an infeasible iterate.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        if theta.len() != PARAM_DIM {
            return Err(OptError::ThetaLengthMismatch {
                expected: PARAM_DIM,
                actual: theta.len(),
            });
        }
        Ok(self.loglik_obs_raw(theta[0], theta[1], data).sum())
    }

    /// Validate the starting vector: correct length, finite entries.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        if theta.len() != PARAM_DIM {
            return Err(OptError::ThetaLengthMismatch {
                expected: PARAM_DIM,
                actual: theta.len(),
            });
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(OptError::NonFiniteTheta { index, value });
            }
        }
        Ok(())
    }
}
