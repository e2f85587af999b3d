//! sharing — IBD block-sharing estimation stack.
//!
//! Purpose
//! -------
//! Provide a cohesive layer for modeling pairwise IBD block sharing between
//! populations: core numerical building blocks in [`core`] (bin grid,
//! calibrated detection-error model, transition matrix, density kernels,
//! observation containers), the user-facing [`models::dispersal::DispersalModel`]
//! in [`models`], and shared error types in [`errors`].
//!
//! Key behaviors
//! -------------
//! - Derived state (grid, false-positive profile, transition matrix) is
//!   built once at model construction and read-only afterwards.
//! - Per-pair likelihood evaluations recompute only the transient
//!   theoretical-sharing and full-probability vectors.
//! - The "everyday" types are re-exported here for ergonomic imports.
//!
//! Invariants & assumptions
//! ------------------------
//! - Lengths and distances are validated once, at the data boundary; the
//!   likelihood hot path assumes clean inputs.
//! - Structural parameters are strictly positive in model space; the
//!   optimizer explores freely and is steered by the −∞ sentinel.
pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    data::{PairObservation, SharingData},
    density::DispersalKernel,
    grid::{BinGrid, GridConfig},
    options::SharingOptions,
    params::DispersalParams,
};
pub use errors::{ParamError, ParamResult, SharingError, SharingResult};
pub use models::dispersal::DispersalModel;
