//! Structural parameters of the sharing-density model.
//!
//! This module provides the model-space parameter container
//! [`DispersalParams`] and its mapping to the optimizer-space vector θ.
//!
//! ## Mapping conventions
//! - θ layout is `[scale, sigma]` — the identity mapping. No
//!   reparameterization is needed: infeasible iterates (any component ≤ 0)
//!   are handled by the −∞ log-likelihood sentinel in the evaluator, so the
//!   optimizer never requires an unconstrained space.
//!
//! ## Invariants validated by constructors
//! - `scale > 0` and finite
//! - `sigma > 0` and finite
use crate::{
    optimization::loglik_optimizer::Theta,
    sharing::errors::{ParamError, ParamResult},
};
use ndarray::{ArrayView1, array};

/// Optimizer-space dimension of the dispersal parameterization.
pub const PARAM_DIM: usize = 2;

/// Constrained model-space parameters of the sharing density.
///
/// `scale` is the absolute sharing constant C; `sigma` is the dispersal
/// parameter (distance per generation¹ᐟ²) of the underlying diffusion.
/// Invariants are validated at construction; use this type for any density
/// evaluation or post-fit query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispersalParams {
    /// Absolute sharing constant C, > 0.
    pub scale: f64,
    /// Dispersal parameter σ, > 0.
    pub sigma: f64,
}

impl DispersalParams {
    /// Create validated model-space parameters.
    ///
    /// # Errors
    /// - [`ParamError::InvalidScale`] if `scale` is non-finite or ≤ 0.
    /// - [`ParamError::InvalidSigma`] if `sigma` is non-finite or ≤ 0.
    pub fn new(scale: f64, sigma: f64) -> ParamResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ParamError::InvalidScale { value: scale });
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ParamError::InvalidSigma { value: sigma });
        }
        Ok(DispersalParams { scale, sigma })
    }

    /// Map model-space parameters to the optimizer-space vector
    /// `θ = [scale, sigma]`.
    pub fn to_theta(&self) -> Theta {
        array![self.scale, self.sigma]
    }

    /// Build validated model-space parameters from an optimizer-space vector.
    ///
    /// Intended for post-fit materialization of the optimizer's estimate;
    /// mid-optimization iterates go through the sentinel guard instead.
    ///
    /// # Errors
    /// - [`ParamError::ThetaLengthMismatch`] if `theta.len() != 2`.
    /// - [`ParamError::NonFiniteTheta`] for NaN/±∞ entries.
    /// - Domain errors from [`DispersalParams::new`].
    pub fn from_theta(theta: ArrayView1<'_, f64>) -> ParamResult<Self> {
        if theta.len() != PARAM_DIM {
            return Err(ParamError::ThetaLengthMismatch {
                expected: PARAM_DIM,
                actual: theta.len(),
            });
        }
        for (index, &value) in theta.iter().enumerate() {
            if !value.is_finite() {
                return Err(ParamError::NonFiniteTheta { index, value });
            }
        }
        DispersalParams::new(theta[0], theta[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Domain validation of `DispersalParams::new`.
    // - The θ round trip and its error paths.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that valid parameters construct and round-trip through θ.
    //
    // Given
    // -----
    // - scale = 0.01, sigma = 50.
    //
    // Expect
    // ------
    // - Construction succeeds; `from_theta(to_theta())` reproduces the
    //   parameters exactly.
    fn params_round_trip_through_theta() {
        let params = DispersalParams::new(0.01, 50.0).expect("positive params should validate");
        let theta = params.to_theta();

        assert_eq!(theta, array![0.01, 50.0]);
        assert_eq!(DispersalParams::from_theta(theta.view()).unwrap(), params);
    }

    #[test]
    // Purpose
    // -------
    // Ensure non-positive or non-finite components are rejected with the
    // matching error variant.
    //
    // Given
    // -----
    // - Zero scale, negative sigma, and NaN scale.
    //
    // Expect
    // ------
    // - `InvalidScale` / `InvalidSigma` as appropriate.
    fn out_of_domain_params_are_rejected() {
        assert_eq!(
            DispersalParams::new(0.0, 50.0).unwrap_err(),
            ParamError::InvalidScale { value: 0.0 }
        );
        assert_eq!(
            DispersalParams::new(0.01, -1.0).unwrap_err(),
            ParamError::InvalidSigma { value: -1.0 }
        );
        assert!(matches!(
            DispersalParams::new(f64::NAN, 50.0).unwrap_err(),
            ParamError::InvalidScale { .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure `from_theta` rejects wrong lengths and non-finite entries
    // before touching the domain checks.
    //
    // Given
    // -----
    // - A length-3 vector and a vector with a NaN component.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 2, actual: 3 }` and
    //   `NonFiniteTheta { index: 1, .. }` respectively.
    fn from_theta_validates_shape_and_finiteness() {
        let too_long = array![1.0, 2.0, 3.0];
        assert_eq!(
            DispersalParams::from_theta(too_long.view()).unwrap_err(),
            ParamError::ThetaLengthMismatch { expected: 2, actual: 3 }
        );

        let with_nan = array![1.0, f64::NAN];
        assert!(matches!(
            DispersalParams::from_theta(with_nan.view()).unwrap_err(),
            ParamError::NonFiniteTheta { index: 1, .. }
        ));
    }
}
