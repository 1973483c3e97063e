//! Error types for the fluid solver.

use thiserror::Error;

use crate::math::Real;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: Real },

    #[error("grid of {n_grid} cells is too small for a {bound}-cell wall")]
    GridTooSmall { n_grid: usize, bound: usize },

    #[error("spawn region is empty")]
    EmptySpawnRegion,

    #[error("spawn region lies outside the walled domain")]
    SpawnOutsideDomain,

    #[error("particle {index} has a non-finite position, velocity or affine field")]
    NonFiniteParticle { index: usize },

    #[error("particle {index} has a degenerate volume ratio {value}")]
    DegenerateVolumeRatio { index: usize, value: Real },
}

pub type Result<T> = std::result::Result<T, SolverError>;
