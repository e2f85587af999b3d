//! Errors for the block-sharing model stack (grid/window configuration,
//! observation validation, interval queries, and parameter domains).
//!
//! This module defines the model error type, [`SharingError`], and the
//! parameter error type, [`ParamError`], used across the sharing core and the
//! model layer. Both implement `Display`/`Error` with structured payloads.
//!
//! ## Conventions
//! - Indices are 0-based.
//! - Block lengths, distances, and bin coordinates must be **finite**; blocks
//!   and distances must additionally be **strictly positive**.
//! - Structural parameters (`scale`, `sigma`) must be strictly positive at
//!   construction time; infeasible iterates *during optimization* are handled
//!   by the −∞ log-likelihood sentinel, not by these errors.

/// Result alias for sharing-core operations that may produce [`SharingError`].
pub type SharingResult<T> = Result<T, SharingError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for the block-sharing model stack.
///
/// Covers bin/window configuration, observation-data validation, interval
/// queries, and model state. Configuration errors are fatal at construction
/// time; none of these variants is raised from the likelihood hot path.
#[derive(Debug, Clone, PartialEq)]
pub enum SharingError {
    // ---- Grid / window configuration ----
    /// Bin width must be finite and > 0.
    InvalidBinWidth { value: f64 },

    /// Bin range must be finite with min_b < max_b.
    InvalidBinRange { min_b: f64, max_b: f64 },

    /// Analysis window endpoint falls outside the bin range.
    WindowOutOfRange { value: f64, min_b: f64, max_b: f64 },

    /// Analysis window must satisfy min_len < max_len.
    InvalidWindow { min_len: f64, max_len: f64 },

    // ---- Observation data ----
    /// The three aligned observation collections have mismatched lengths.
    LengthMismatch { distances: usize, comparisons: usize, pairs: usize },

    /// At least one population pair is required.
    EmptyPairSet,

    /// Pairwise distance is NaN/±inf.
    NonFiniteDistance { value: f64 },

    /// Pairwise distance is ≤ 0.
    NonPositiveDistance { value: f64 },

    /// A pair must represent at least one comparison.
    ZeroComparisons,

    /// An observed block length is non-finite or ≤ 0.
    InvalidBlockLength { index: usize, value: f64 },

    // ---- Interval query ----
    /// Interval must be finite with start < end.
    InvalidInterval { start: f64, end: f64 },

    /// Interval does not lie within the binned length range.
    IntervalOutOfRange { start: f64, end: f64, min_b: f64, max_b: f64 },

    // ---- Model state ----
    /// A fitted estimate is required but no fit has completed.
    ModelNotFitted,
}

impl std::error::Error for SharingError {}

impl std::fmt::Display for SharingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SharingError::InvalidBinWidth { value } => {
                write!(f, "Invalid bin width {value}: must be finite and > 0")
            }
            SharingError::InvalidBinRange { min_b, max_b } => {
                write!(f, "Invalid bin range [{min_b}, {max_b}): must be finite with min < max")
            }
            SharingError::WindowOutOfRange { value, min_b, max_b } => {
                write!(f, "Window endpoint {value} outside binned range [{min_b}, {max_b})")
            }
            SharingError::InvalidWindow { min_len, max_len } => {
                write!(f, "Invalid analysis window [{min_len}, {max_len}): must have min < max")
            }
            SharingError::LengthMismatch { distances, comparisons, pairs } => {
                write!(
                    f,
                    "Observation collections misaligned: {distances} distances, \
                     {comparisons} comparison counts, {pairs} block lists"
                )
            }
            SharingError::EmptyPairSet => {
                write!(f, "Observation set must contain at least one population pair")
            }
            SharingError::NonFiniteDistance { value } => {
                write!(f, "Non-finite pairwise distance: {value}")
            }
            SharingError::NonPositiveDistance { value } => {
                write!(f, "Non-positive pairwise distance: {value}")
            }
            SharingError::ZeroComparisons => {
                write!(f, "Pair-comparison count must be at least 1")
            }
            SharingError::InvalidBlockLength { index, value } => {
                write!(f, "Invalid block length at index {index}: {value}, must be finite and > 0")
            }
            SharingError::InvalidInterval { start, end } => {
                write!(f, "Invalid interval [{start}, {end}]: must be finite with start < end")
            }
            SharingError::IntervalOutOfRange { start, end, min_b, max_b } => {
                write!(f, "Interval [{start}, {end}] outside binned range [{min_b}, {max_b})")
            }
            SharingError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet")
            }
        }
    }
}

/// Error type for structural-parameter domains and the optimizer-space
/// mapping.
///
/// Raised at construction boundaries (`DispersalParams::new`,
/// `DispersalParams::from_theta`, `DispersalKernel::growth`); the likelihood
/// path never raises these.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Scale constant C must be finite and > 0.
    InvalidScale { value: f64 },

    /// Dispersal parameter σ must be finite and > 0.
    InvalidSigma { value: f64 },

    /// Growth adjustment must be finite and ≥ 0.
    InvalidGrowth { value: f64 },

    /// Optimizer-space vector has the wrong length.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Optimizer-space vector entries must be finite.
    NonFiniteTheta { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::InvalidScale { value } => {
                write!(f, "Invalid scale constant {value}: must be finite and > 0")
            }
            ParamError::InvalidSigma { value } => {
                write!(f, "Invalid dispersal parameter {value}: must be finite and > 0")
            }
            ParamError::InvalidGrowth { value } => {
                write!(f, "Invalid growth adjustment {value}: must be finite and >= 0")
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            ParamError::NonFiniteTheta { index, value } => {
                write!(f, "Non-finite theta entry at index {index}: {value}")
            }
        }
    }
}
