//! loglik_optimizer — trait, options, adapter, and runners for maximizing a
//! user log-likelihood with `argmin`.
//!
//! The conventional flow:
//! 1. implement [`LogLikelihood`] for your model;
//! 2. configure [`MLEOptions`] (solver choice, [`Tolerances`], optional
//!    L-BFGS memory);
//! 3. call [`maximize`] with a starting vector and your data;
//! 4. read the normalized [`OptimOutcome`].
//!
//! Internally, [`adapter::ArgMinAdapter`] exposes the minimization problem
//! `c(θ) = −ℓ(θ)`, [`builders`] construct configured solvers, and [`run`]
//! executes them. [`finite_diff`] supplies fallback derivatives.
pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use api::maximize;
pub use traits::{LogLikelihood, MLEOptions, OptimOutcome, SolverKind, Tolerances};
pub use types::{Cost, FnEvalMap, Grad, Hessian, Theta};
