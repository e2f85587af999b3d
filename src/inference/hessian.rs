//! inference::hessian — standard errors from observed information.
//!
//! Purpose
//! -------
//! Convert finite-difference Hessians of a log-likelihood into numerically
//! stable classical standard errors. The observed information `J(θ̂)` is
//! built by differencing a gradient map, copied into a `nalgebra` matrix,
//! and pseudo-inverted through a symmetric eigendecomposition with
//! eigenvalue truncation — no explicit matrix inverse is ever formed.
//!
//! Conventions
//! -----------
//! - `f` is a gradient map of the **negative** log-likelihood (or any map
//!   whose FD Hessian is the observed information); the resulting SEs are
//!   the square roots of the diagonal of the Moore–Penrose pseudoinverse
//!   `J⁺`.
//! - Eigenvalues at or below [`EIGEN_EPS`] are treated as zero and excluded,
//!   which inflates SEs along weakly identified directions instead of
//!   dividing by numerical noise.
//! - Symmetry is enforced upstream by `compute_hessian`; this module does
//!   not re-symmetrize.
use crate::optimization::{
    errors::OptResult, loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Classical standard errors at `theta_hat` from the observed information.
///
/// Differences the gradient map `f` at `theta_hat` to obtain `J(θ̂)`, then
/// returns `sqrt(diag(J⁺))` with the pseudoinverse built from a symmetric
/// eigendecomposition.
///
/// # Errors
/// - Propagates any error from
///   [`compute_hessian`] (dimension mismatch, non-finite entries).
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>,
) -> OptResult<Array1<f64>> {
    let n = theta_hat.len();
    let obs_info = compute_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(obs_info.nrows(), obs_info.ncols());
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    Ok(solve_for_se(obs_info_nalg, n))
}

// ---- Helper methods ----

/// Copy a square `ndarray` observed-information matrix into a preallocated
/// `DMatrix`, column by column (matching `DMatrix`'s column-major storage).
/// Does not alter symmetry.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let n = obs_info.ncols();
    for j in 0..n {
        for i in j..n {
            if j == i {
                obs_info_nalg[(i, i)] = obs_info[[i, i]];
            } else {
                obs_info_nalg[(i, j)] = obs_info[[i, j]];
                obs_info_nalg[(j, i)] = obs_info[[j, i]];
            }
        }
    }
}

/// Classical SEs from a symmetric observed-information matrix.
///
/// With `J = Q Λ Qᵀ`, computes
/// `Var(θ̂_i) = Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k` and returns the square
/// roots.
fn solve_for_se(obs_info_nalg: DMatrix<f64>, n: usize) -> Array1<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let mut se = Array1::<f64>::zeros(n);
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    for i in 0..n {
        se[i] = eigenvals
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum();
        se[i] = se[i].sqrt();
    }
    se
}
