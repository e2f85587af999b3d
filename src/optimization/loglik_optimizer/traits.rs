//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait models implement for their objective.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`SolverKind`]: choice of maximization backend.
//! - [`OptimOutcome`]: normalized result returned by the high-level
//!   `maximize` API.
//!
//! Convention: we *maximize* a log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = −ℓ(θ)`. An analytic gradient, if provided, is the gradient of the
//! log-likelihood (`∇ℓ(θ)`); the adapter flips the sign as needed.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tolerance},
    },
};
use argmin::core::TerminationStatus;
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = −ℓ(θ)`.
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`. A −∞ return
///   marks an infeasible iterate the optimizer should retreat from; it is
///   not an error.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook rejecting
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇ℓ(θ)`.
///   If not implemented, robust finite differences are used automatically on
///   the gradient-based solver paths.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of maximization backend.
///
/// Variants:
/// - `NelderMead`: derivative-free simplex search. The default — it pairs
///   naturally with the −∞ infeasibility sentinel, which gradient-based
///   solvers cannot differentiate through.
/// - `LbfgsMoreThuente` / `LbfgsHagerZhang`: L-BFGS with the named line
///   search, for smooth objectives with analytic or finite-difference
///   gradients.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"NelderMead"`, `"LbfgsMoreThuente"`, `"LbfgsHagerZhang"`). Unknown
/// names return [`OptError::InvalidSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    NelderMead,
    LbfgsMoreThuente,
    LbfgsHagerZhang,
}

impl FromStr for SolverKind {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neldermead" | "nelder-mead" => Ok(SolverKind::NelderMead),
            "lbfgsmorethuente" | "morethuente" => Ok(SolverKind::LbfgsMoreThuente),
            "lbfgshagerzhang" | "hagerzhang" => Ok(SolverKind::LbfgsHagerZhang),
            _ => Err(OptError::InvalidSolver {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'NelderMead', \
                         'LbfgsMoreThuente' or 'LbfgsHagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `solver: SolverKind` — maximization backend.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size; `None` uses the
///   default of 7. Ignored by the Nelder–Mead path.
///
/// Default:
/// - `tols`: `tol_grad = None`, `tol_cost = 1e-8`, `max_iter = 10 000`
/// - `solver`: `NelderMead`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub solver: SolverKind,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// Numeric validation of the tolerances happens in [`Tolerances::new`];
    /// this constructor only rejects a zero L-BFGS memory.
    pub fn new(tols: Tolerances, solver: SolverKind, lbfgs_mem: Option<usize>) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLbfgsMemory {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, solver, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::new(None, Some(1e-8), Some(10_000)).unwrap(),
            solver: SolverKind::NelderMead,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold
///   (L-BFGS paths only).
/// - `tol_cost`: terminate when the change in cost falls below this
///   threshold; on the Nelder–Mead path this doubles as the simplex
///   standard-deviation tolerance.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be
/// provided (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolerance`] for non-finite or non-positive
    ///   tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tolerance(tol_grad, "gradient")?;
        verify_tolerance(tol_cost, "cost change")?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ̂)` (not the cost).
/// - `converged`: `true` if the solver reported a terminating status other
///   than `NotTerminated`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last available gradient, if any (absent on the
///   simplex path).
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let status: String;
        let converged = match termination {
            TerminationStatus::NotTerminated => {
                status = "Not terminated".to_string();
                false
            }
            _ => {
                status = format!("{termination:?}");
                true
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmin::core::TerminationReason;
    use ndarray::array;
    use std::collections::HashMap;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Solver-name parsing, including the case-insensitive aliases.
    // - Tolerance validation rules (at least one, positivity, finiteness).
    // - `OptimOutcome::new` mapping of termination status and validation of
    //   the estimate.
    //
    // They intentionally DO NOT cover:
    // - Actual solver runs (runner/api tests) or option plumbing into argmin
    //   (builder tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify solver-name parsing for all variants and the failure path.
    //
    // Given
    // -----
    // - Mixed-case names and one unknown name.
    //
    // Expect
    // ------
    // - Correct variants; `InvalidSolver` for the unknown name.
    fn solverkind_parses_case_insensitively() {
        assert_eq!("neldermead".parse::<SolverKind>().unwrap(), SolverKind::NelderMead);
        assert_eq!("Nelder-Mead".parse::<SolverKind>().unwrap(), SolverKind::NelderMead);
        assert_eq!("MoreThuente".parse::<SolverKind>().unwrap(), SolverKind::LbfgsMoreThuente);
        assert_eq!("LBFGSHAGERZHANG".parse::<SolverKind>().unwrap(), SolverKind::LbfgsHagerZhang);
        assert!(matches!(
            "newton".parse::<SolverKind>().unwrap_err(),
            OptError::InvalidSolver { .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Exercise the tolerance validation rules.
    //
    // Given
    // -----
    // - All-None tolerances, a negative cost tolerance, a zero iteration
    //   cap, and a valid combination.
    //
    // Expect
    // ------
    // - `NoTolerancesProvided`, `InvalidTolerance`, `InvalidMaxIter`, and
    //   success respectively.
    fn tolerances_enforce_their_rules() {
        assert!(matches!(
            Tolerances::new(None, None, None).unwrap_err(),
            OptError::NoTolerancesProvided
        ));
        assert!(matches!(
            Tolerances::new(None, Some(-1.0), Some(10)).unwrap_err(),
            OptError::InvalidTolerance { name: "cost change", .. }
        ));
        assert!(matches!(
            Tolerances::new(Some(1e-6), None, Some(0)).unwrap_err(),
            OptError::InvalidMaxIter { .. }
        ));
        let tols = Tolerances::new(Some(1e-6), Some(1e-8), Some(100)).unwrap();
        assert_eq!(tols.max_iter, Some(100));
    }

    #[test]
    // Purpose
    // -------
    // Ensure `MLEOptions::new` rejects a zero L-BFGS memory and that the
    // default bundle matches its documentation.
    //
    // Given
    // -----
    // - `lbfgs_mem = Some(0)` and the `Default` impl.
    //
    // Expect
    // ------
    // - `InvalidLbfgsMemory` for zero; defaults use Nelder–Mead with a
    //   10 000-iteration cap.
    fn mleoptions_validate_memory_and_document_defaults() {
        let tols = Tolerances::new(None, Some(1e-8), Some(50)).unwrap();
        assert!(matches!(
            MLEOptions::new(tols, SolverKind::LbfgsMoreThuente, Some(0)).unwrap_err(),
            OptError::InvalidLbfgsMemory { .. }
        ));

        let defaults = MLEOptions::default();
        assert_eq!(defaults.solver, SolverKind::NelderMead);
        assert_eq!(defaults.tols.max_iter, Some(10_000));
        assert_eq!(defaults.lbfgs_mem, None);
    }

    #[test]
    // Purpose
    // -------
    // Verify `OptimOutcome::new` maps a terminated status to
    // `converged = true`, keeps the log-likelihood sign, and rejects a
    // missing estimate.
    //
    // Given
    // -----
    // - A finite estimate with a `SolverConverged` termination, then a
    //   `None` estimate.
    //
    // Expect
    // ------
    // - Outcome fields populated as documented; `MissingThetaHat` for the
    //   absent estimate.
    fn optimoutcome_maps_termination_and_validates_estimate() {
        let outcome = OptimOutcome::new(
            Some(array![0.01, 50.0]),
            -123.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            42,
            HashMap::new(),
            None,
        )
        .unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 42);
        assert_eq!(outcome.value, -123.5);
        assert_eq!(outcome.grad_norm, None);

        let missing = OptimOutcome::new(
            None,
            -1.0,
            TerminationStatus::NotTerminated,
            0,
            HashMap::new(),
            None,
        );
        assert!(matches!(missing.unwrap_err(), OptError::MissingThetaHat));
    }
}
