//! sharing::models — user-facing estimation models.
//!
//! Currently the single [`dispersal::DispersalModel`], which assembles the
//! core building blocks into a fittable Poisson point-process likelihood.
pub mod dispersal;
