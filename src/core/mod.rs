pub mod grid;
pub mod interaction;
pub mod kernel;
pub mod mpm_state;
pub mod particle_set;

pub use grid::{
    BoundaryHandling, Grid, GridNode, KERNEL_SIZE, NEIGHBOR_COUNT, apply_boundary_conditions,
    normalize_momentum,
};
pub use interaction::Interaction;
pub use kernel::{GridInterpolation, inv_d};
pub use mpm_state::{MpmState, VolumeStats};
pub use particle_set::{ParticleSet, ParticlesMut};
