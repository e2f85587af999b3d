//! Errors for the log-likelihood optimization layer.
//!
//! [`OptError`] normalizes three error sources behind one surface: option and
//! derivative validation inside this crate, runtime failures surfaced by the
//! `argmin` backend, and domain errors from the sharing model that cross the
//! optimization boundary (parameter mapping, model state).
use argmin::core::{ArgminError, Error};

use crate::sharing::errors::{ParamError, SharingError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// No analytic gradient; finite differences should be used.
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    /// A named tolerance needs to be positive and finite.
    InvalidTolerance { name: &'static str, tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Unknown solver name.
    InvalidSolver { name: String, reason: &'static str },

    /// lbfgs_mem needs to be at least 1.
    InvalidLbfgsMemory { mem: usize, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned NaN.
    NonFiniteCost { value: f64 },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// No best parameter vector was produced.
    MissingThetaHat,

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter.
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented.
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized.
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated.
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckpointNotFound.
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug.
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError.
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types.
    BackendError { text: String },

    // ---- Finite differences ----
    /// Hessian matrix dimensions do not match parameter dimensions.
    HessianDimMismatch { expected: usize, found: (usize, usize) },

    /// Hessian values need to be finite.
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- Sharing-model boundary ----
    /// Scale constant C must be finite and > 0.
    InvalidScale { value: f64 },
    /// Dispersal parameter σ must be finite and > 0.
    InvalidSigma { value: f64 },
    /// Growth adjustment must be finite and ≥ 0.
    InvalidGrowth { value: f64 },
    /// Theta length mismatch for the dispersal parameterization.
    ThetaLengthMismatch { expected: usize, actual: usize },
    /// Theta entries must be finite.
    NonFiniteTheta { index: usize, value: f64 },
    /// A fitted estimate is required but no fit has completed.
    ModelNotFitted,
    /// Other sharing-model error crossing the optimization boundary.
    ModelError { text: String },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }
            OptError::InvalidTolerance { name, tol, reason } => {
                write!(f, "Invalid {name} tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidSolver { name, reason } => {
                write!(f, "Invalid solver '{name}': {reason}")
            }
            OptError::InvalidLbfgsMemory { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Invalid Hessian at ({row}, {col}): {value}, must be finite")
            }
            OptError::InvalidScale { value } => {
                write!(f, "Invalid scale constant {value}: must be finite and > 0")
            }
            OptError::InvalidSigma { value } => {
                write!(f, "Invalid dispersal parameter {value}: must be finite and > 0")
            }
            OptError::InvalidGrowth { value } => {
                write!(f, "Invalid growth adjustment {value}: must be finite and >= 0")
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::NonFiniteTheta { index, value } => {
                write!(f, "Non-finite theta entry at index {index}: {value}")
            }
            OptError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet")
            }
            OptError::ModelError { text } => {
                write!(f, "Sharing model error: {text}")
            }
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::InvalidScale { value } => OptError::InvalidScale { value },
            ParamError::InvalidSigma { value } => OptError::InvalidSigma { value },
            ParamError::InvalidGrowth { value } => OptError::InvalidGrowth { value },
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::NonFiniteTheta { index, value } => {
                OptError::NonFiniteTheta { index, value }
            }
        }
    }
}

impl From<SharingError> for OptError {
    fn from(err: SharingError) -> Self {
        match err {
            SharingError::ModelNotFitted => OptError::ModelNotFitted,
            other => OptError::ModelError { text: other.to_string() },
        }
    }
}
