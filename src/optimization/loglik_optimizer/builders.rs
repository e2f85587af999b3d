//! loglik_optimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the supported solvers. These helpers
//! hide Argmin's generic wiring and apply crate-level options (tolerances,
//! memory size, simplex seeding) so higher-level code can request a
//! configured solver without touching Argmin-specific types.
//!
//! Conventions
//! -----------
//! - The L-BFGS builders do **not** set an initial parameter vector or
//!   `max_iters`; those are runtime concerns applied by the runner.
//! - The Nelder–Mead builder *does* consume `theta0`: the initial simplex is
//!   the solver's starting state. Each coordinate is perturbed by 5%
//!   (or by a small absolute step at zero), the standard derivative-free
//!   seeding.
//! - Errors are always reported via [`OptResult`]; `argmin::core::Error`
//!   never leaks across module boundaries.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, NelderMeadSimplex, Theta,
        },
    },
};

/// Relative perturbation applied to nonzero coordinates when seeding the
/// simplex.
const SIMPLEX_RELATIVE_STEP: f64 = 0.05;
/// Absolute perturbation applied to zero coordinates when seeding the
/// simplex.
const SIMPLEX_ZERO_STEP: f64 = 2.5e-4;

/// Construct a Nelder–Mead solver seeded around `theta0`.
///
/// The simplex has `theta0.len() + 1` vertices: `theta0` itself plus one
/// vertex per coordinate with that coordinate perturbed. If
/// `opts.tols.tol_cost` is present it is applied as the simplex
/// standard-deviation tolerance.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects the
///   tolerance.
pub fn build_nelder_mead(theta0: &Theta, opts: &MLEOptions) -> OptResult<NelderMeadSimplex> {
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut vertex = theta0.clone();
        if vertex[i] != 0.0 {
            vertex[i] *= 1.0 + SIMPLEX_RELATIVE_STEP;
        } else {
            vertex[i] = SIMPLEX_ZERO_STEP;
        }
        vertices.push(vertex);
    }
    let mut solver = NelderMeadSimplex::new(vertices);
    if let Some(tol) = opts.tols.tol_cost {
        solver = solver.with_sd_tolerance(tol)?;
    }
    Ok(solver)
}

/// Construct L-BFGS with the Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (defaulting to [`DEFAULT_LBFGS_MEM`]) and wires
/// the optional gradient/cost tolerances; initial parameters and iteration
/// limits are left to the runner.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects a
///   tolerance.
pub fn build_lbfgs_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with the More–Thuente line search.
///
/// Same contract as [`build_lbfgs_hager_zhang`] with the other line search.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects a
///   tolerance.
pub fn build_lbfgs_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional gradient/cost tolerances to an L-BFGS solver, independent
/// of the line-search type. Absent tolerances leave Argmin's defaults in
/// effect.
///
/// # Errors
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects a
///   tolerance.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
