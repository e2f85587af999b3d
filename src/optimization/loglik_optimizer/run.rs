//! Execution helpers that run an `argmin` solver on a log-likelihood problem
//! and return a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
        types::NelderMeadSimplex,
    },
};
use argmin::core::{Executor, State};

/// Run a gradient-based `argmin` solver (L-BFGS with either line search).
///
/// Wires up the user model via [`ArgMinAdapter`], sets the initial parameter
/// (`theta0` is consumed) and the optional iteration cap, executes the
/// solver, and converts the terminal state into an [`OptimOutcome`] —
/// including the last available gradient's norm.
///
/// # Errors
/// - Propagates any `argmin` runtime error (solver or line-search failures)
///   via the crate's `From<argmin::core::Error>` conversion.
/// - Propagates validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

/// Run the Nelder–Mead simplex solver.
///
/// The solver already carries its starting simplex (see
/// [`build_nelder_mead`](crate::optimization::loglik_optimizer::builders::build_nelder_mead)),
/// so only the iteration cap is configured here. No gradient is available on
/// this path; `grad_norm` is absent from the outcome.
///
/// # Errors
/// - Propagates any `argmin` runtime error via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates validation errors from [`OptimOutcome::new`] — in
///   particular, a best value that never became finite (the whole simplex
///   stayed infeasible) surfaces as an error here.
pub fn run_nelder_mead<'a, F>(
    opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: NelderMeadSimplex,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
{
    let mut optimizer = Executor::new(problem, solver);
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        None,
    )
}
