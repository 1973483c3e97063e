use crate::config::SolverParams;
use crate::core::{Grid, apply_boundary_conditions, normalize_momentum};

/// Grid update stage (divides momentum by mass, applies gravity, clamps boundaries).
pub fn update_grid(params: &SolverParams, grid: &mut Grid) {
    let gravity_step = params.gravity * params.dt;
    let resolution = grid.resolution();

    for (coord, node) in grid.iter_nodes_mut() {
        if normalize_momentum(node) {
            node.velocity += gravity_step;
            apply_boundary_conditions(node, coord, resolution, params.bound, params.boundary);
        }
    }
}
