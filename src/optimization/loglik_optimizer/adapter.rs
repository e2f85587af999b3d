//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a
//! *minimization* problem by defining the cost as `c(θ) = −ℓ(θ)`. Analytic
//! gradients (if provided by the user) are negated accordingly. If a gradient
//! is not provided, we finite-difference the **cost** closure, so no sign
//! flip is needed in that branch.
//!
//! Infeasibility convention: a model reporting `ℓ(θ) = −∞` marks θ as
//! infeasible; the adapter maps it to a `+∞` cost so ranking-based solvers
//! (Nelder–Mead) retreat from the region. Only NaN is treated as a hard
//! error.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and
/// `Gradient`.
///
/// - `CostFunction::cost` returns `−ℓ(θ)` (negative log-likelihood); `+∞`
///   for infeasible θ, an error only for NaN.
/// - `Gradient::gradient` returns:
///   - `−∇ℓ(θ)` if the user provides an analytic gradient, or
///   - a finite-difference gradient of the cost (no sign flip needed).
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = −ℓ(θ)`.
    ///
    /// A −∞ log-likelihood (infeasible θ) becomes a +∞ cost, which ranks
    /// worse than every feasible candidate without aborting the solver.
    ///
    /// # Errors
    /// - [`OptError::NonFiniteCost`] when the model reports NaN.
    /// - Propagates any `OptError` from the user's `value` via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if output.is_nan() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the user implements `grad(θ, data)`, we validate it and return
    ///   `−grad` (because the cost is `−ℓ`).
    /// - Otherwise, we compute a finite-difference gradient of the **cost**:
    ///   - central differences first;
    ///   - if any cost evaluation failed (captured via `closure_err`) or the
    ///     central gradient fails validation, retry once with forward
    ///     differences and validate again.
    ///
    /// The FD closure must return `f64`, so errors cannot propagate with
    /// `?` inside it; the first error is captured in `closure_err` and the
    /// closure returns NaN, which the retry path turns back into a real
    /// error.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (other than
    ///   `GradientNotImplemented`).
    /// - Propagates errors raised by cost evaluations performed during FD.
    /// - Returns validation errors for wrong dimension or non-finite
    ///   entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(e) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                match e {
                    OptError::GradientNotImplemented => {
                        let cost_func = |theta: &Theta| -> f64 {
                            match self.cost(theta) {
                                Ok(val) => val,
                                Err(e) => {
                                    let mut slot = closure_err.borrow_mut();
                                    if slot.is_none() {
                                        *slot = Some(e);
                                    }
                                    f64::NAN
                                }
                            }
                        };
                        let mut fd_grad = theta.central_diff(&cost_func);
                        if closure_err.borrow().is_some() {
                            fd_grad = run_fd_diff(theta, &cost_func, &closure_err)?;
                            return Ok(fd_grad);
                        }
                        match validate_grad(&fd_grad, dim) {
                            Ok(()) => Ok(fd_grad),
                            Err(_) => {
                                fd_grad = run_fd_diff(theta, &cost_func, &closure_err)?;
                                Ok(fd_grad)
                            }
                        }
                    }
                    _ => Err(e.into()),
                }
            }
        }
    }
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}
