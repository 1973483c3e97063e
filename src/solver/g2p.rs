//! Grid-to-Particle (G2P) transfer operations
//!
//! Gathers velocities and the APIC affine field back onto particles, applies
//! pointer forcing, advects, clamps to the walls and updates volume ratios.

use crate::config::SolverParams;
use crate::core::{Grid, GridInterpolation, Interaction, ParticleSet, kernel::inv_d};
use crate::materials::water;
use crate::math::{Vector, outer_product, zero_matrix};

pub fn grid_to_particle(
    params: &SolverParams,
    interaction: &Interaction,
    grid: &Grid,
    particles: &mut ParticleSet,
) {
    let dt = params.dt;
    let inv_cell_width = params.inv_cell_width();
    let inv_d = inv_d(inv_cell_width);
    let wall_min = Vector::splat(params.wall_min());
    let wall_max = Vector::splat(params.wall_max());

    let particles = particles.split_mut();
    let attributes = particles
        .positions
        .iter_mut()
        .zip(particles.velocities.iter_mut())
        .zip(particles.affine_velocities.iter_mut())
        .zip(particles.volume_ratios.iter_mut());

    for (((position, velocity), affine_velocity), volume_ratio) in attributes {
        let interpolation = GridInterpolation::compute_for_particle(*position, inv_cell_width);

        let mut new_velocity = Vector::ZERO;
        let mut velocity_gradient = zero_matrix();
        for (coord, weight, cell_offset) in interpolation.iter_neighbors() {
            let weighted_velocity = grid.get(coord).velocity * weight;
            new_velocity += weighted_velocity;
            velocity_gradient += outer_product(weighted_velocity, cell_offset) * inv_d;
        }

        *affine_velocity = velocity_gradient;
        *velocity = new_velocity + interaction.impulse(*position);

        // Prevent particles from leaving the walled domain; this keeps the
        // next step's stencil on the grid.
        *position = (*position + *velocity * dt).clamp(wall_min, wall_max);

        water::update_volume_ratio(volume_ratio, affine_velocity, dt);
        if let Some(floor) = params.volume_ratio_floor {
            *volume_ratio = (*volume_ratio).max(floor);
        }
        debug_assert!(
            position.is_finite() && volume_ratio.is_finite(),
            "particle state became non-finite"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridNode;
    use crate::math::Real;
    use approx::assert_relative_eq;

    fn uniform_grid(params: &SolverParams, velocity: impl Fn(Vector) -> Vector) -> Grid {
        let mut grid = Grid::new(params.n_grid);
        let dx = params.cell_width();
        for (coord, node) in grid.iter_nodes_mut() {
            *node = GridNode {
                velocity: velocity(coord.as_vec2() * dx),
                mass: 1.0,
            };
        }
        grid
    }

    fn one_particle(position: Vector) -> ParticleSet {
        let mut particles = ParticleSet::new();
        particles.push(position, Vector::ZERO);
        particles
    }

    #[test]
    fn gathers_uniform_velocity_and_advects() {
        let params = SolverParams::default();
        let grid = uniform_grid(&params, |_| Vector::new(1.0, -0.5));
        let mut particles = one_particle(Vector::new(0.5, 0.5));

        grid_to_particle(&params, &Interaction::new(0.05, 200.0), &grid, &mut particles);

        let velocity = particles.velocities()[0];
        assert_relative_eq!(velocity.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(velocity.y, -0.5, epsilon = 1e-5);
        assert_relative_eq!(particles.positions()[0].x, 0.5 + params.dt, epsilon = 1e-6);
        assert!(particles.affine_velocities()[0].abs_diff_eq(zero_matrix(), 1e-3));
        assert_relative_eq!(particles.volume_ratios()[0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn reconstructs_linear_velocity_gradient() {
        let params = SolverParams::default();
        // v = (2x, -y): divergence 1.
        let grid = uniform_grid(&params, |x| Vector::new(2.0 * x.x, -x.y));
        let mut particles = one_particle(Vector::new(0.4, 0.6));

        grid_to_particle(&params, &Interaction::new(0.05, 200.0), &grid, &mut particles);

        let c = particles.affine_velocities()[0];
        assert_relative_eq!(c.x_axis.x, 2.0, epsilon = 1e-3);
        assert_relative_eq!(c.y_axis.y, -1.0, epsilon = 1e-3);
        assert_relative_eq!(c.y_axis.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(c.x_axis.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(particles.volume_ratios()[0], 1.0 + params.dt, epsilon = 1e-6);
    }

    #[test]
    fn clamps_positions_to_walls() {
        let params = SolverParams::default();
        let grid = uniform_grid(&params, |_| Vector::new(-1000.0, 1000.0));
        let mut particles = one_particle(Vector::new(0.05, 0.95));

        grid_to_particle(&params, &Interaction::new(0.05, 200.0), &grid, &mut particles);

        let position = particles.positions()[0];
        assert_eq!(position.x, params.wall_min());
        assert_eq!(position.y, params.wall_max());
    }

    #[test]
    fn interaction_pushes_nearby_particle_away() {
        let params = SolverParams::default();
        let grid = uniform_grid(&params, |_| Vector::ZERO);
        let mut particles = one_particle(Vector::new(0.52, 0.5));
        let interaction = Interaction {
            target: Vector::new(0.5, 0.5),
            active: true,
            ..Interaction::new(0.05, 200.0)
        };

        grid_to_particle(&params, &interaction, &grid, &mut particles);

        let velocity = particles.velocities()[0];
        assert!(velocity.x > 0.0);
        assert_relative_eq!(velocity.x, (0.05 - 0.02) * 200.0, epsilon = 1e-3);
        assert_relative_eq!(velocity.y, 0.0 as Real, epsilon = 1e-6);
    }

    #[test]
    fn volume_ratio_floor_is_applied_when_configured() {
        let params = SolverParams::default().with_volume_ratio_floor(0.9);
        // Strongly converging field: tr(C) = -2000.
        let grid = uniform_grid(&params, |x| (Vector::splat(0.5) - x) * 1000.0);
        let mut particles = one_particle(Vector::new(0.5, 0.5));

        grid_to_particle(&params, &Interaction::new(0.05, 200.0), &grid, &mut particles);

        assert_eq!(particles.volume_ratios()[0], 0.9);
    }
}
