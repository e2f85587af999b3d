//! inference — post-fit uncertainty quantification.
//!
//! Provides classical standard errors at the fitted estimate from
//! finite-difference observed-information matrices ([`hessian`]). Population
//! pairs are independent observations in this model, so no
//! autocorrelation-consistent covariance machinery is needed.
pub mod hessian;
