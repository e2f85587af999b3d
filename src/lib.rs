//! ibd_dispersal — maximum-likelihood dispersal estimation from IBD block sharing.
//!
//! Purpose
//! -------
//! Estimate demographic dispersal parameters from genetic segment-sharing data
//! between populations. Identity-by-descent (IBD) blocks shared between pairs
//! of populations are binned by length (in cM) and modeled as independent
//! Poisson point processes whose intensity follows a Bessel-type sharing
//! density; a calibrated detection-error model maps true block lengths to
//! observed ones through a fixed transition matrix plus a false-positive
//! profile.
//!
//! Key behaviors
//! -------------
//! - The [`sharing`] module holds the statistical core: bin grid, calibrated
//!   detection-error functions, transition matrix, pluggable sharing-density
//!   kernels, observation containers, and the [`sharing::DispersalModel`]
//!   that assembles the per-pair Poisson log-likelihood.
//! - The [`optimization`] module wraps the external `argmin` optimizer behind
//!   a [`optimization::loglik_optimizer::LogLikelihood`] capability and a
//!   `maximize` entry point (Nelder–Mead by default, L-BFGS variants
//!   available).
//! - The [`inference`] module turns finite-difference observed-information
//!   matrices into classical standard errors at the fitted estimate.
//!
//! Invariants & assumptions
//! ------------------------
//! - All block lengths and bin coordinates are measured in centiMorgans; the
//!   density kernels convert to Morgans internally.
//! - Grid, false-positive profile, and transition matrix are built once at
//!   model construction and are immutable afterwards; per-evaluation state is
//!   transient and local, so independent pairwise evaluations never contend.
//! - Infeasible structural parameters (≤ 0) yield a −∞ log-likelihood
//!   sentinel rather than an error, so the optimizer steers around them.
//!
//! Downstream usage
//! ----------------
//! - Construct a [`sharing::DispersalModel`] from a density kernel, starting
//!   parameters, and [`sharing::SharingOptions`]; feed it a
//!   [`sharing::SharingData`] observation set; call `fit`, then query
//!   `standard_errors` and `estimated_sharing`.
//! - Plotting/reporting layers consume the public grid, theoretical-sharing,
//!   and full-probability accessors; no such layer lives in this crate.

pub mod inference;
pub mod optimization;
pub mod sharing;
