//! optimization — log-likelihood maximization layer.
//!
//! Purpose
//! -------
//! Decouple the statistical core from the optimization algorithm: models
//! implement the [`loglik_optimizer::LogLikelihood`] capability and hand it
//! to [`loglik_optimizer::maximize`], which drives the external `argmin`
//! backend (Nelder–Mead simplex by default, L-BFGS variants available) and
//! returns a normalized [`loglik_optimizer::OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`loglik_optimizer`] holds the trait, option/tolerance types, the
//!   argmin adapter, solver builders, executors, and finite-difference
//!   helpers.
//! - [`numerical_stability`] centralizes the probability floor and the
//!   eigenvalue truncation threshold used across the likelihood and
//!   inference layers.
//! - [`errors`] normalizes option validation, backend, and boundary-crossing
//!   domain errors into [`errors::OptError`].
pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;
