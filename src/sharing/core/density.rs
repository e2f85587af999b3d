//! Theoretical block-sharing density kernels.
//!
//! Purpose
//! -------
//! Provide the pluggable density engine: per-cM density of true block sharing
//! at given lengths, for a pair of populations at distance `r`, under a
//! chosen demographic history. The three variants share the Bessel-decay
//! functional form of diffusion models of shared ancestry and differ in the
//! Bessel order and length adjustment:
//! - [`DispersalKernel::Constant`] — constant population size (order 2);
//! - [`DispersalKernel::Growth`] — exponential population growth, modeled as
//!   a fixed downward adjustment of the effective block length (order 2);
//! - [`DispersalKernel::Doomsday`] — pure-drift decay (order 3).
//!
//! Conventions
//! -----------
//! - Inputs are centiMorgans; lengths are converted to Morgans inside the
//!   Bessel argument and the result is rescaled to a per-cM density.
//! - Densities are non-negative and finite for positive distances and valid
//!   parameters; a length whose growth-adjusted value clips to zero
//!   contributes zero density.
//! - The modified Bessel function of the second kind comes from the external
//!   `puruspe` evaluator.
use crate::sharing::{
    core::params::DispersalParams,
    errors::{ParamError, ParamResult},
};
use ndarray::{Array1, ArrayView1};
use puruspe::Kn;

const CM_PER_MORGAN: f64 = 100.0;

/// Tagged choice of demographic history for the sharing density.
///
/// The variant (and any variant-specific configuration, such as the growth
/// adjustment) is fixed at model construction; `{scale, sigma}` remain the
/// free parameters during fitting for every variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispersalKernel {
    /// Constant population size.
    Constant,
    /// Exponential population growth: effective length `max(l − growth/2, 0)`.
    Growth {
        /// Fixed growth adjustment (cM); ≥ 0, validated by
        /// [`DispersalKernel::growth`].
        growth: f64,
    },
    /// Pure-drift ("doomsday") population decay.
    Doomsday,
}

impl DispersalKernel {
    /// Construct a validated growth kernel.
    ///
    /// # Errors
    /// - [`ParamError::InvalidGrowth`] if `growth` is non-finite or negative.
    pub fn growth(growth: f64) -> ParamResult<Self> {
        if !growth.is_finite() || growth < 0.0 {
            return Err(ParamError::InvalidGrowth { value: growth });
        }
        Ok(DispersalKernel::Growth { growth })
    }

    /// Per-cM density of true block sharing at each length in `lengths`
    /// (cM), for a pair at distance `distance`, under parameters `params`.
    ///
    /// Assumes `distance > 0` and validated parameters; both are enforced
    /// upstream (data validation and the parameter guard respectively).
    pub fn density(
        &self, lengths: ArrayView1<'_, f64>, distance: f64, params: &DispersalParams,
    ) -> Array1<f64> {
        match *self {
            DispersalKernel::Constant => {
                lengths.mapv(|l| constant_size_density(l, distance, params))
            }
            DispersalKernel::Growth { growth } => lengths
                .mapv(|l| constant_size_density((l - 0.5 * growth).max(0.0), distance, params)),
            DispersalKernel::Doomsday => lengths.mapv(|l| doomsday_density(l, distance, params)),
        }
    }
}

/// Bessel-decay density for a constant-size population:
/// `C·r² / (2·l·σ²) · K₂(√(2·l)·r/σ)` with `l` in Morgans, reported per cM.
fn constant_size_density(length_cm: f64, distance: f64, params: &DispersalParams) -> f64 {
    let length = length_cm / CM_PER_MORGAN;
    if length <= 0.0 {
        return 0.0;
    }
    let argument = (2.0 * length).sqrt() * distance / params.sigma;
    let amplitude = params.scale * distance.powi(2) / (2.0 * length * params.sigma.powi(2));
    amplitude * Kn(2, argument) / CM_PER_MORGAN
}

/// Bessel-decay density for a doomsday population:
/// `C·r³ / (4·√2·(l·σ²)^{3/2}) · K₃(√(2·l)·r/σ)` with `l` in Morgans,
/// reported per cM.
fn doomsday_density(length_cm: f64, distance: f64, params: &DispersalParams) -> f64 {
    let length = length_cm / CM_PER_MORGAN;
    if length <= 0.0 {
        return 0.0;
    }
    let argument = (2.0 * length).sqrt() * distance / params.sigma;
    let amplitude = params.scale * distance.powi(3)
        / (4.0 * 2.0_f64.sqrt() * (length * params.sigma.powi(2)).powf(1.5));
    amplitude * Kn(3, argument) / CM_PER_MORGAN
}
