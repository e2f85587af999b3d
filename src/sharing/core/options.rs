//! Model-level configuration for block-sharing estimation.
//!
//! Purpose
//! -------
//! Collect the configuration knobs for a dispersal fit in one place: the
//! bin/window layout, whether the detection-error model is applied, and the
//! optimizer options handed to the maximization backend. Call sites pass one
//! explicit, validated bundle instead of loose flags.
//!
//! Invariants & assumptions
//! ------------------------
//! - `grid` is validated by `BinGrid::new` at model construction, not here.
//! - `mle_opts` is assumed to come from its own validated builder or
//!   default.
//! - With `error_model == false`, the transition matrix is never built and
//!   observed probabilities equal the theoretical ones; the false-positive
//!   profile is still computed (it is cheap) but unused.
use crate::{optimization::loglik_optimizer::MLEOptions, sharing::core::grid::GridConfig};

/// Estimation-time configuration for a [`DispersalModel`].
///
/// [`DispersalModel`]: crate::sharing::models::dispersal::DispersalModel
#[derive(Debug, Clone, PartialEq)]
pub struct SharingOptions {
    /// Bin range/width and analysis window.
    pub grid: GridConfig,
    /// Whether to apply the detection-error model (transition matrix +
    /// false positives).
    pub error_model: bool,
    /// Maximum-likelihood optimizer options.
    pub mle_opts: MLEOptions,
}

impl SharingOptions {
    /// Bundle already-validated components; no cross-field checks are
    /// performed here.
    pub fn new(grid: GridConfig, error_model: bool, mle_opts: MLEOptions) -> SharingOptions {
        SharingOptions { grid, error_model, mle_opts }
    }
}

impl Default for SharingOptions {
    /// Calibrated POPRES grid, error model enabled, default optimizer
    /// (Nelder–Mead, 10 000-iteration cap).
    fn default() -> Self {
        SharingOptions {
            grid: GridConfig::default(),
            error_model: true,
            mle_opts: MLEOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::SolverKind;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Field preservation by the constructor and the documented defaults.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `SharingOptions::new` preserves its inputs and that the
    // default configuration matches its documentation.
    //
    // Given
    // -----
    // - A custom grid with the error model disabled, and the default bundle.
    //
    // Expect
    // ------
    // - Fields round-trip unchanged; defaults use the POPRES grid, enabled
    //   error model, and the Nelder–Mead solver.
    fn options_preserve_fields_and_defaults_are_documented() {
        let grid = GridConfig::new(0.0, 10.0, 0.5, 1.0, 8.0);
        let opts = SharingOptions::new(grid, false, MLEOptions::default());
        assert_eq!(opts.grid, grid);
        assert!(!opts.error_model);

        let defaults = SharingOptions::default();
        assert_eq!(defaults.grid, GridConfig::default());
        assert!(defaults.error_model);
        assert_eq!(defaults.mle_opts.solver, SolverKind::NelderMead);
        assert_eq!(defaults.mle_opts.tols.max_iter, Some(10_000));
    }
}
