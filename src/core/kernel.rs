use crate::math::{Coord, Real, Vector};

use super::grid::{KERNEL_SIZE, NEIGHBOR_COUNT};

/// APIC scale `4 / Δx²` applied to the gathered affine field.
///
/// Written here as `4 · inv_dx` because the stencil offsets handed to G2P are
/// in cell units, which already absorbs one factor of `inv_dx`.
#[inline]
pub fn inv_d(inv_cell_width: Real) -> Real {
    4.0 * inv_cell_width
}

// Quadratic B-spline weights for offsets 0, 1, 2 given the fractional
// position `f` of the particle relative to the base node, `f ∈ [0.5, 1.5)`.
#[inline(always)]
fn quadratic_bspline_weights(f: Real) -> [Real; KERNEL_SIZE] {
    let d0 = 1.5 - f;
    let d1 = f - 1.0;
    let d2 = f - 0.5;
    [0.5 * d0 * d0, 0.75 - d1 * d1, 0.5 * d2 * d2]
}

/// 3x3 stencil of a particle: base node, per-axis weights and fractional offset.
#[derive(Clone, Copy, Debug)]
pub struct GridInterpolation {
    pub base_cell: Coord,
    /// Per-axis weights, `weights[i] = (w_x(i), w_y(i))`.
    pub weights: [Vector; KERNEL_SIZE],
    /// Particle position relative to the base node, in cell units.
    pub fraction: Vector,
}

impl GridInterpolation {
    /// Stencil for a particle at `position` in domain space.
    ///
    /// The caller guarantees `position * inv_cell_width >= 0.5` on both axes;
    /// clamped particles always satisfy this.
    #[inline(always)]
    pub fn compute_for_particle(position: Vector, inv_cell_width: Real) -> Self {
        let cell = position * inv_cell_width;
        let base = (cell - 0.5).floor();
        debug_assert!(base.cmpge(Vector::ZERO).all(), "particle {position} below grid origin");

        let fraction = cell - base;
        let x_weights = quadratic_bspline_weights(fraction.x);
        let y_weights = quadratic_bspline_weights(fraction.y);

        Self {
            base_cell: base.as_uvec2(),
            weights: [
                Vector::new(x_weights[0], y_weights[0]),
                Vector::new(x_weights[1], y_weights[1]),
                Vector::new(x_weights[2], y_weights[2]),
            ],
            fraction,
        }
    }

    #[inline(always)]
    pub fn weight_for_neighbor(&self, neighbor_idx: usize) -> Real {
        let gx = neighbor_idx % KERNEL_SIZE;
        let gy = neighbor_idx / KERNEL_SIZE;
        self.weights[gx].x * self.weights[gy].y
    }

    /// `(node coord, weight, node offset from particle in cell units)` for all nine nodes.
    #[inline(always)]
    pub fn iter_neighbors(&self) -> impl Iterator<Item = (Coord, Real, Vector)> + '_ {
        (0..NEIGHBOR_COUNT).map(move |idx| {
            let shift = Coord::new((idx % KERNEL_SIZE) as u32, (idx / KERNEL_SIZE) as u32);
            (
                self.base_cell + shift,
                self.weight_for_neighbor(idx),
                shift.as_vec2() - self.fraction,
            )
        })
    }
}
