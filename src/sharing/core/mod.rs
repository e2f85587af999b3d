//! sharing::core — building blocks of the block-sharing model.
//!
//! Leaf-first: [`grid`] discretizes the length axis, [`detection`] holds the
//! calibrated error functions and false-positive profile, [`transition`]
//! freezes the error model into a kernel over the grid, [`density`] supplies
//! the theoretical sharing kernels, [`params`] the structural parameters,
//! [`data`] the validated observations, and [`options`] the configuration
//! bundle. Everything here is deterministic and free of optimizer concerns.
pub mod data;
pub mod density;
pub mod detection;
pub mod grid;
pub mod options;
pub mod params;
pub mod transition;
