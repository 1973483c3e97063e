//! Particle-to-Grid (P2G) transfer operations
//!
//! Scatters mass and APIC momentum, including the pressure stress term,
//! from every particle onto its 3x3 stencil of grid nodes.

use crate::config::SolverParams;
use crate::core::{Grid, GridInterpolation, ParticleSet};
use crate::materials::WeaklyCompressible;

/// Sequential scatter; accumulates into `grid` without clearing it first.
pub fn particle_to_grid(
    params: &SolverParams,
    material: &WeaklyCompressible,
    particles: &ParticleSet,
    grid: &mut Grid,
) {
    let cell_width = params.cell_width();
    let inv_cell_width = params.inv_cell_width();
    let particle_mass = params.particle_mass();

    let attributes = particles
        .positions()
        .iter()
        .zip(particles.velocities())
        .zip(particles.affine_velocities())
        .zip(particles.volume_ratios());

    for (((&position, &velocity), affine_velocity), &volume_ratio) in attributes {
        let interpolation = GridInterpolation::compute_for_particle(position, inv_cell_width);
        let affine = material.affine_momentum(volume_ratio, affine_velocity, params);
        let momentum = velocity * particle_mass;

        for (coord, weight, cell_offset) in interpolation.iter_neighbors() {
            let dpos = cell_offset * cell_width;
            let node = grid.get_mut(coord);
            node.mass += weight * particle_mass;
            node.velocity += weight * (momentum + affine * dpos);
        }
    }
}
