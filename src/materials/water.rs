//! Water fluid material
//!
//! Tension-limited linear equation of state on the volume ratio `J`:
//! compression is resisted without bound, expansion only up to a small cap.

use crate::config::SolverParams;
use crate::math::{Matrix, Real, diagonal_from_value, matrix_trace};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaklyCompressible {
    pub bulk_modulus: Real,
    pub tension_limit: Real,
}

impl WeaklyCompressible {
    pub fn new(bulk_modulus: Real, tension_limit: Real) -> Self {
        Self {
            bulk_modulus,
            tension_limit,
        }
    }

    pub fn from_params(params: &SolverParams) -> Self {
        Self::new(params.bulk_modulus, params.tension_limit)
    }

    /// `min(tension_limit, K (J - 1))`.
    #[inline(always)]
    pub fn pressure(&self, volume_ratio: Real) -> Real {
        Real::min(self.tension_limit, self.bulk_modulus * (volume_ratio - 1.0))
    }

    /// Isotropic stress contribution folded into the P2G affine momentum,
    /// `-p · 4 · Δt · inv_dx² · V₀`.
    #[inline(always)]
    pub fn stress_term(&self, volume_ratio: Real, params: &SolverParams) -> Real {
        let inv_dx = params.inv_cell_width();
        -self.pressure(volume_ratio) * 4.0 * params.dt * inv_dx * inv_dx * params.rest_volume()
    }

    /// Affine momentum matrix scattered by a particle: stress on the diagonal
    /// plus the particle's APIC field scaled by its mass.
    #[inline(always)]
    pub fn affine_momentum(
        &self,
        volume_ratio: Real,
        affine_velocity: &Matrix,
        params: &SolverParams,
    ) -> Matrix {
        diagonal_from_value(self.stress_term(volume_ratio, params))
            + *affine_velocity * params.particle_mass()
    }
}

/// Advance the volume ratio by the divergence estimate `tr(C)`: `J *= 1 + Δt tr(C)`.
#[inline(always)]
pub fn update_volume_ratio(volume_ratio: &mut Real, affine_velocity: &Matrix, dt: Real) {
    *volume_ratio *= 1.0 + dt * matrix_trace(affine_velocity);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::zero_matrix;
    use approx::assert_relative_eq;

    #[test]
    fn pressure_is_capped_in_tension_only() {
        let water = WeaklyCompressible::new(1000.0, 0.1);
        assert_relative_eq!(water.pressure(1.0), 0.0);
        assert_relative_eq!(water.pressure(0.5), -500.0);
        assert_relative_eq!(water.pressure(2.0), 0.1);
        assert_relative_eq!(water.pressure(1.00005), 0.05, epsilon = 1e-3);
    }

    #[test]
    fn stress_term_matches_reference_scaling() {
        let params = SolverParams::default();
        let water = WeaklyCompressible::from_params(&params);
        // 500 · 4 · 2e-4 · 64² · (1/128)² = 0.1
        assert_relative_eq!(water.stress_term(0.5, &params), 0.1, epsilon = 1e-6);
        assert_relative_eq!(water.stress_term(2.0, &params), -2e-5, epsilon = 1e-9);
    }

    #[test]
    fn affine_momentum_combines_stress_and_apic_field() {
        let params = SolverParams::default();
        let water = WeaklyCompressible::from_params(&params);
        let c = Matrix::from_cols_array(&[1.0, 2.0, 3.0, 4.0]);
        let m = water.affine_momentum(1.0, &c, &params);
        assert_eq!(m, c * params.particle_mass());

        let m = water.affine_momentum(0.5, &zero_matrix(), &params);
        assert_relative_eq!(m.x_axis.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(m.y_axis.y, 0.1, epsilon = 1e-6);
        assert_eq!(m.x_axis.y, 0.0);
    }

    #[test]
    fn volume_ratio_follows_divergence() {
        let mut j = 1.0;
        let expanding = diagonal_from_value(5.0);
        update_volume_ratio(&mut j, &expanding, 0.01);
        assert_relative_eq!(j, 1.1);

        let shear = Matrix::from_cols_array(&[0.0, 3.0, -3.0, 0.0]);
        update_volume_ratio(&mut j, &shear, 0.01);
        assert_relative_eq!(j, 1.1);
    }
}
