//! 2D weakly-compressible fluid on the Material Point Method with APIC transfers.

pub mod config;
pub mod core;
pub mod error;
pub mod materials;
pub mod math;
pub mod plugin;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::{GRAVITY, SolverParams};
pub use crate::core::{BoundaryHandling, Grid, GridNode, Interaction, MpmState, ParticleSet, VolumeStats};
pub use crate::error::{Result, SolverError};
pub use crate::materials::WeaklyCompressible;
pub use crate::plugin::MpmPlugin;
