//! Particle store
//!
//! Structure-of-arrays storage: every attribute lives in its own dense array,
//! indexed by a stable particle index.

use rand::Rng;

use crate::math::{Matrix, Real, Vector, matrix_is_finite, zero_matrix};

#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    positions: Vec<Vector>,
    velocities: Vec<Vector>,
    // APIC affine velocity field (C matrix)
    affine_velocities: Vec<Matrix>,
    volume_ratios: Vec<Real>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            velocities: Vec::with_capacity(capacity),
            affine_velocities: Vec::with_capacity(capacity),
            volume_ratios: Vec::with_capacity(capacity),
        }
    }

    /// Fill with `count` resting particles drawn uniformly from the box `[min, max)`.
    pub fn spawn_uniform<R: Rng + ?Sized>(
        count: usize,
        min: Vector,
        max: Vector,
        rng: &mut R,
    ) -> Self {
        let mut set = Self::with_capacity(count);
        let extent = max - min;
        for _ in 0..count {
            let position = Vector::new(
                min.x + rng.random::<Real>() * extent.x,
                min.y + rng.random::<Real>() * extent.y,
            );
            set.push(position, Vector::ZERO);
        }
        set
    }

    /// Append an undeformed particle and return its index.
    pub fn push(&mut self, position: Vector, velocity: Vector) -> usize {
        let index = self.positions.len();
        self.positions.push(position);
        self.velocities.push(velocity);
        self.affine_velocities.push(zero_matrix());
        self.volume_ratios.push(1.0);
        index
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.velocities.clear();
        self.affine_velocities.clear();
        self.volume_ratios.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vector] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vector] {
        &self.velocities
    }

    pub fn affine_velocities(&self) -> &[Matrix] {
        &self.affine_velocities
    }

    pub fn volume_ratios(&self) -> &[Real] {
        &self.volume_ratios
    }

    pub fn positions_mut(&mut self) -> &mut [Vector] {
        &mut self.positions
    }

    pub fn velocities_mut(&mut self) -> &mut [Vector] {
        &mut self.velocities
    }

    pub fn affine_velocities_mut(&mut self) -> &mut [Matrix] {
        &mut self.affine_velocities
    }

    pub fn volume_ratios_mut(&mut self) -> &mut [Real] {
        &mut self.volume_ratios
    }

    /// Every attribute array, mutably, for stages that rewrite particles in one sweep.
    pub fn split_mut(&mut self) -> ParticlesMut<'_> {
        ParticlesMut {
            positions: &mut self.positions,
            velocities: &mut self.velocities,
            affine_velocities: &mut self.affine_velocities,
            volume_ratios: &mut self.volume_ratios,
        }
    }

    /// Clamp every position into `[lo, hi]` on both axes.
    pub fn clamp_positions(&mut self, lo: Real, hi: Real) {
        let (lo, hi) = (Vector::splat(lo), Vector::splat(hi));
        for position in &mut self.positions {
            *position = position.clamp(lo, hi);
        }
    }

    /// Index of the first particle whose state is non-finite, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        (0..self.len()).find(|&idx| {
            !self.positions[idx].is_finite()
                || !self.velocities[idx].is_finite()
                || !matrix_is_finite(&self.affine_velocities[idx])
        })
    }
}

/// Disjoint mutable borrows of a [`ParticleSet`]'s arrays.
pub struct ParticlesMut<'a> {
    pub positions: &'a mut [Vector],
    pub velocities: &'a mut [Vector],
    pub affine_velocities: &'a mut [Matrix],
    pub volume_ratios: &'a mut [Real],
}
