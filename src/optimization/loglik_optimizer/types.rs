//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! log-likelihood optimizer. The rest of the optimization code stays agnostic
//! to `ndarray` and Argmin generics and can evolve with the backend.
//!
//! Conventions
//! -----------
//! - All optimizer vectors and matrices are `ndarray` containers over `f64`.
//! - `Cost` is always the scalar `c(θ) = −ℓ(θ)` in log-likelihood space;
//!   higher layers own the sign flips.
//! - The line-search aliases assume Argmin's three-parameter forms
//!   `(Param, Gradient, Float)`; the simplex alias assumes the two-parameter
//!   form `(Param, Float)`.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    neldermead::NelderMead,
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ` for log-likelihood optimization.
pub type Theta = Array1<f64>;

/// Gradient vector `∇ℓ(θ)` or `∇c(θ)`, matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Dense Hessian matrix; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value used by the optimizer: the cost `c(θ) = −ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver, keyed by Argmin's
/// counter names (e.g., `"cost_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

/// Nelder–Mead simplex solver specialized to this crate's numeric types.
pub type NelderMeadSimplex = NelderMead<Theta, Cost>;
