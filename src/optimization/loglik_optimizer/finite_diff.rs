//! loglik_optimizer::finite_diff — finite-difference gradient and Hessian
//! helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference derivative approximations with validation and
//! symmetry cleanup, so the rest of the optimizer and the inference layer can
//! request derivatives without depending directly on the `finitediff` API.
//!
//! Conventions
//! -----------
//! - Central differences are preferred; forward differences are the fallback
//!   when the central approximation fails validation.
//! - Any error raised by the objective during differencing is routed through
//!   the shared `closure_err` cell (the FD closures return `f64`, so `?`
//!   cannot propagate) and re-raised afterwards.
//! - Gradients and Hessians returned from this module satisfy
//!   [`validate_grad`] / [`validate_hessian`] on the successful path.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient with error capture and validation.
///
/// Clears `closure_err`, runs `forward_diff`, re-raises any captured
/// evaluation error, and validates the result.
///
/// # Errors
/// - The captured objective error, converted to `OptError`.
/// - [`crate::optimization::errors::OptError::GradientDimMismatch`] /
///   [`crate::optimization::errors::OptError::InvalidGradient`] from
///   validation.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of a gradient map, validated and symmetrized.
///
/// Tries a central-difference Hessian first; on validation failure retries
/// with forward differences, surfacing only the forward-path validation
/// error. Symmetrization happens after validation so diagnostics reference
/// the raw approximation.
///
/// # Errors
/// - [`crate::optimization::errors::OptError::HessianDimMismatch`] /
///   [`crate::optimization::errors::OptError::InvalidHessian`] when both
///   paths fail validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    match validate_hessian(&cent_hess, dim) {
        Ok(_) => {
            symmetrize_hess(&mut cent_hess);
            Ok(cent_hess)
        }
        Err(_) => {
            let mut forward_hess = theta.forward_hessian(f);
            validate_hessian(&forward_hess, dim)?;
            symmetrize_hess(&mut forward_hess);
            Ok(forward_hess)
        }
    }
}

// ---- Helper methods ----

/// Enforce symmetry in-place by averaging each off-diagonal pair; the
/// diagonal is left untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradients with and without captured closure
    //   errors, and the non-finite rejection path.
    // - Hessian construction, symmetry, and validation failure.
    // - In-place symmetrization.
    //
    // They intentionally DO NOT cover:
    // - End-to-end optimizer behavior (runner/api tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify `run_fd_diff` produces a finite, correctly sized gradient for a
    // quadratic objective.
    //
    // Given
    // -----
    // - f(θ) = θ·θ at θ = (0, 1), no error side channel.
    //
    // Expect
    // ------
    // - `Ok(grad)` with matching length and finite entries ≈ (0, 2).
    fn run_fd_diff_quadratic_returns_valid_gradient() {
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        let grad = run_fd_diff(&theta, &f, &closure_err)
            .expect("Gradient for quadratic should be computed successfully");

        assert_eq!(grad.len(), theta.len());
        assert!(grad.iter().all(|v| v.is_finite()));
        assert!((grad[1] - 2.0).abs() < 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a captured closure error is re-raised as an `OptError` instead
    // of silently producing a NaN gradient.
    //
    // Given
    // -----
    // - A closure that stores an `ArgminError` and returns NaN.
    //
    // Expect
    // ------
    // - `run_fd_diff` returns the mapped error.
    fn run_fd_diff_closure_error_is_propagated() {
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            let argmin_err = ArgminError::NotImplemented { text: "fd test".to_string() };
            closure_err.replace(Some(argmin_err.into()));
            f64::NAN
        };

        let err = run_fd_diff(&theta, &f, &closure_err)
            .expect_err("Error in closure should cause run_fd_diff to fail");

        match err {
            OptError::NotImplemented { .. } | OptError::BackendError { .. } => {}
            other => panic!("Unexpected OptError variant from closure error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm a silently non-finite objective yields `InvalidGradient`.
    //
    // Given
    // -----
    // - f ≡ NaN with an empty error cell.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidGradient { .. })`.
    fn run_fd_diff_non_finite_gradient_yields_invalidgradient_error() {
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_x: &Theta| f64::NAN;

        let err = run_fd_diff(&theta, &f, &closure_err)
            .expect_err("Non-finite gradient should cause an error");

        match err {
            OptError::InvalidGradient { .. } => {}
            other => panic!("Expected InvalidGradient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify `compute_hessian` returns a finite, symmetric matrix for a
    // linear gradient map.
    //
    // Given
    // -----
    // - g(θ) = 2θ (the gradient of ||θ||²) at θ = (1, 2).
    //
    // Expect
    // ------
    // - Shape (2, 2), symmetric, finite, with diagonal ≈ 2.
    fn compute_hessian_quadratic_returns_symmetric_matrix() {
        let theta: Theta = Array1::from(vec![1.0_f64, 2.0]);
        let grad_fn = |theta: &Theta| theta.mapv(|x| 2.0 * x);

        let hess = compute_hessian(&grad_fn, &theta)
            .expect("Hessian for quadratic gradient should be computed successfully");

        assert_eq!(hess.shape(), &[2, 2]);
        assert!((hess[[0, 1]] - hess[[1, 0]]).abs() < 1e-10);
        assert!(hess.iter().all(|v| v.is_finite()));
        assert!((hess[[0, 0]] - 2.0).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `compute_hessian` surfaces a validation error when both FD
    // schemes produce non-finite entries.
    //
    // Given
    // -----
    // - A gradient map returning NaN.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidHessian { .. })`.
    fn compute_hessian_non_finite_entries_yield_invalidhessian_error() {
        let theta: Theta = Array1::from(vec![0.0_f64]);
        let grad_fn = |_theta: &Theta| Array1::from(vec![f64::NAN]);

        let err = compute_hessian(&grad_fn, &theta)
            .expect_err("Non-finite Hessian entries should cause an error");

        match err {
            OptError::InvalidHessian { .. } => {}
            other => panic!("Expected InvalidHessian, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify `symmetrize_hess` averages off-diagonal pairs and leaves the
    // diagonal unchanged.
    //
    // Given
    // -----
    // - A 2×2 matrix with unequal off-diagonal entries.
    //
    // Expect
    // ------
    // - Off-diagonals equal their average; diagonal untouched.
    fn symmetrize_hess_makes_matrix_symmetric() {
        let mut h: Hessian = Array2::from_shape_vec((2, 2), vec![1.0_f64, 2.0, 0.0, 3.0]).unwrap();
        let before_diag = (h[[0, 0]], h[[1, 1]]);
        let expected_avg = 0.5 * (h[[0, 1]] + h[[1, 0]]);

        super::symmetrize_hess(&mut h);

        assert_eq!(h[[0, 0]], before_diag.0);
        assert_eq!(h[[1, 1]], before_diag.1);
        assert!((h[[0, 1]] - expected_avg).abs() < 1e-12);
        assert_eq!(h[[0, 1]], h[[1, 0]]);
    }
}
