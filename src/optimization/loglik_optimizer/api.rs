//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! Selects the configured solver (Nelder–Mead simplex or L-BFGS with a
//! Hager–Zhang/More–Thuente line search), wraps the model in an
//! `ArgMinAdapter` (which *minimizes* `−ℓ(θ)`), and delegates the run to the
//! matching executor.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_lbfgs_hager_zhang, build_lbfgs_more_thuente, build_nelder_mead},
        run::{run_lbfgs, run_nelder_mead},
        traits::{LogLikelihood, MLEOptions, SolverKind},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` with the configured solver.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` exposing the minimization
///   problem `c(θ) = −ℓ(θ)` to `argmin`.
/// - Builds the solver selected by `opts.solver` and runs it; for
///   Nelder–Mead the initial simplex is seeded from `theta0`, for L-BFGS
///   `theta0` is set on the executor state.
///
/// # Errors
/// - Propagates any error from `f.check`, the solver builders, or the
///   runners (e.g., line-search failures, an all-infeasible simplex).
///
/// # Returns
/// An [`OptimOutcome`] with `theta_hat`, the best value `ℓ(θ̂)`, termination
/// status, iteration and function-evaluation counts, and optionally the
/// gradient norm.
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.solver {
        SolverKind::NelderMead => {
            let solver = build_nelder_mead(&theta0, opts)?;
            run_nelder_mead(opts, problem, solver)
        }
        SolverKind::LbfgsMoreThuente => {
            let solver = build_lbfgs_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        SolverKind::LbfgsHagerZhang => {
            let solver = build_lbfgs_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
