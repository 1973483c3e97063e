//! Background grid for MPM simulation
//!
//! Dense `n × n` lattice over the unit square, rebuilt from scratch every step.

use crate::materials::utils;
use crate::math::{Coord, Real, Vector};

/// Number of neighbors in 3x3 kernel
pub const NEIGHBOR_COUNT: usize = 9;
/// MPM kernel size (3x3 B-spline)
pub const KERNEL_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridNode {
    /// Momentum while particles scatter, velocity after the grid update.
    pub velocity: Vector,
    pub mass: Real,
}

impl GridNode {
    #[inline(always)]
    pub fn zeroed() -> Self {
        Self {
            velocity: Vector::ZERO,
            mass: 0.0,
        }
    }

    #[inline(always)]
    pub fn zero(&mut self) {
        self.velocity = Vector::ZERO;
        self.mass = 0.0;
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    resolution: usize,
    cell_width: Real,
    nodes: Vec<GridNode>,
}

impl Grid {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            cell_width: 1.0 / resolution as Real,
            nodes: vec![GridNode::zeroed(); resolution * resolution],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn cell_width(&self) -> Real {
        self.cell_width
    }

    #[inline(always)]
    pub fn index(&self, coord: Coord) -> usize {
        coord.x as usize + coord.y as usize * self.resolution
    }

    #[inline(always)]
    pub fn contains(&self, coord: Coord) -> bool {
        (coord.x as usize) < self.resolution && (coord.y as usize) < self.resolution
    }

    /// Node at `(x, y)`, or `None` outside the lattice.
    pub fn node(&self, x: usize, y: usize) -> Option<&GridNode> {
        if x < self.resolution && y < self.resolution {
            self.nodes.get(x + y * self.resolution)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn get(&self, coord: Coord) -> &GridNode {
        debug_assert!(self.contains(coord), "stencil node {coord} outside grid");
        &self.nodes[self.index(coord)]
    }

    #[inline(always)]
    pub fn get_mut(&mut self, coord: Coord) -> &mut GridNode {
        debug_assert!(self.contains(coord), "stencil node {coord} outside grid");
        let index = self.index(coord);
        &mut self.nodes[index]
    }

    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    /// Iterator over `(coord, node)` pairs, x fastest.
    pub fn iter_nodes_mut(&mut self) -> impl Iterator<Item = (Coord, &mut GridNode)> {
        let resolution = self.resolution;
        self.nodes.iter_mut().enumerate().map(move |(index, node)| {
            let coord = Coord::new((index % resolution) as u32, (index / resolution) as u32);
            (coord, node)
        })
    }

    pub fn zero(&mut self) {
        self.nodes.iter_mut().for_each(GridNode::zero);
    }

    pub fn total_mass(&self) -> Real {
        self.nodes.iter().map(|node| node.mass).sum()
    }

    /// Sum of the per-node momentum accumulators. Only meaningful between
    /// particle-to-grid and the grid update, before momentum becomes velocity.
    pub fn total_momentum(&self) -> Vector {
        self.nodes.iter().map(|node| node.velocity).sum()
    }

    pub fn active_node_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.mass > 0.0).count()
    }
}

/// How grid velocities are constrained near the domain walls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryHandling {
    /// Zero only velocity components heading into a wall; fluid may leave it.
    #[default]
    Separate,
    /// Zero the wall-normal component regardless of direction.
    Slip,
    /// No velocity constraint; positions are still clamped.
    None,
}

/// Divide momentum by mass in place. Returns `false` for empty nodes, which are left untouched.
#[inline(always)]
pub fn normalize_momentum(node: &mut GridNode) -> bool {
    if node.mass > 0.0 {
        node.velocity *= utils::inv_exact(node.mass);
        true
    } else {
        false
    }
}

/// Apply wall constraints to a node of a `resolution`-wide grid with `bound`-cell walls.
///
/// The upper wall covers nodes strictly above `resolution - bound`, which mirrors
/// the lower wall about the domain centre (node `n` would sit at `1.0`).
#[inline(always)]
pub fn apply_boundary_conditions(
    node: &mut GridNode,
    coord: Coord,
    resolution: usize,
    bound: usize,
    boundary_type: BoundaryHandling,
) {
    let (x, y) = (coord.x as usize, coord.y as usize);
    let upper = resolution.saturating_sub(bound);

    match boundary_type {
        BoundaryHandling::Separate => {
            if x < bound && node.velocity.x < 0.0 {
                node.velocity.x = 0.0;
            }
            if x > upper && node.velocity.x > 0.0 {
                node.velocity.x = 0.0;
            }
            if y < bound && node.velocity.y < 0.0 {
                node.velocity.y = 0.0;
            }
            if y > upper && node.velocity.y > 0.0 {
                node.velocity.y = 0.0;
            }
        }
        BoundaryHandling::Slip => {
            if x < bound || x > upper {
                node.velocity.x = 0.0; // Allow Y sliding
            }
            if y < bound || y > upper {
                node.velocity.y = 0.0; // Allow X sliding
            }
        }
        BoundaryHandling::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_with_velocity(velocity: Vector) -> GridNode {
        GridNode {
            velocity,
            mass: 1.0,
        }
    }

    #[test]
    fn indexing_is_x_fastest() {
        let mut grid = Grid::new(4);
        grid.get_mut(Coord::new(1, 2)).mass = 3.0;
        assert_eq!(grid.nodes()[1 + 2 * 4].mass, 3.0);
        assert_eq!(grid.node(1, 2).map(|n| n.mass), Some(3.0));
        assert!(grid.node(4, 0).is_none());
    }

    #[test]
    fn zero_clears_every_node() {
        let mut grid = Grid::new(4);
        for (_, node) in grid.iter_nodes_mut() {
            node.mass = 1.0;
            node.velocity = Vector::ONE;
        }
        assert_eq!(grid.active_node_count(), 16);
        grid.zero();
        assert_eq!(grid.total_mass(), 0.0);
        assert_eq!(grid.total_momentum(), Vector::ZERO);
        assert_eq!(grid.active_node_count(), 0);
    }

    #[test]
    fn empty_nodes_are_not_normalized() {
        let mut node = GridNode::zeroed();
        assert!(!normalize_momentum(&mut node));
        assert_eq!(node.velocity, Vector::ZERO);

        let mut node = GridNode {
            velocity: Vector::new(2.0, -4.0),
            mass: 2.0,
        };
        assert!(normalize_momentum(&mut node));
        assert_eq!(node.velocity, Vector::new(1.0, -2.0));
    }

    #[test]
    fn separating_walls_only_stop_inward_motion() {
        let lower = Coord::new(2, 2);
        let upper = Coord::new(62, 62);

        let mut node = node_with_velocity(Vector::new(-1.0, -1.0));
        apply_boundary_conditions(&mut node, lower, 64, 3, BoundaryHandling::Separate);
        assert_eq!(node.velocity, Vector::ZERO);

        let mut node = node_with_velocity(Vector::new(1.0, 1.0));
        apply_boundary_conditions(&mut node, lower, 64, 3, BoundaryHandling::Separate);
        assert_eq!(node.velocity, Vector::new(1.0, 1.0));

        let mut node = node_with_velocity(Vector::new(1.0, 1.0));
        apply_boundary_conditions(&mut node, upper, 64, 3, BoundaryHandling::Separate);
        assert_eq!(node.velocity, Vector::ZERO);

        let mut node = node_with_velocity(Vector::new(-1.0, -1.0));
        apply_boundary_conditions(&mut node, upper, 64, 3, BoundaryHandling::Separate);
        assert_eq!(node.velocity, Vector::new(-1.0, -1.0));
    }

    #[test]
    fn upper_wall_starts_past_resolution_minus_bound() {
        let mut node = node_with_velocity(Vector::new(1.0, 0.0));
        apply_boundary_conditions(&mut node, Coord::new(61, 30), 64, 3, BoundaryHandling::Separate);
        assert_eq!(node.velocity.x, 1.0);
    }

    #[test]
    fn slip_and_open_walls() {
        let mut node = node_with_velocity(Vector::new(1.0, 1.0));
        apply_boundary_conditions(&mut node, Coord::new(0, 30), 64, 3, BoundaryHandling::Slip);
        assert_eq!(node.velocity, Vector::new(0.0, 1.0));

        let mut node = node_with_velocity(Vector::new(-1.0, -1.0));
        apply_boundary_conditions(&mut node, Coord::new(0, 0), 64, 3, BoundaryHandling::None);
        assert_eq!(node.velocity, Vector::new(-1.0, -1.0));
    }
}
