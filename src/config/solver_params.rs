use bevy::prelude::*;

use crate::core::BoundaryHandling;
use crate::error::{Result, SolverError};
use crate::math::{Real, Vector};

use super::constants::*;

/// Solver parameters, fixed once the simulation is constructed.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SolverParams {
    /// Nodes per axis of the background grid spanning `[0, 1]²`.
    pub n_grid: usize,
    pub num_particles: usize,
    /// Time increment of a single `step()`.
    pub dt: Real,
    pub gravity: Vector,
    /// Wall thickness, in grid cells.
    pub bound: usize,
    pub boundary: BoundaryHandling,

    pub rest_density: Real,
    /// Stiffness relating `J - 1` to pressure.
    pub bulk_modulus: Real,
    /// Upper clamp on the pressure term; bounds how hard an expanded particle pulls.
    pub tension_limit: Real,
    /// Optional lower floor for the volume ratio. `None` leaves `J` unclamped.
    pub volume_ratio_floor: Option<Real>,

    pub interaction_radius: Real,
    pub interaction_strength: Real,

    pub spawn_min: Vector,
    pub spawn_max: Vector,

    /// Number of `step()` calls the plugin runs per fixed tick.
    pub substeps_per_frame: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            n_grid: N_GRID,
            num_particles: NUM_PARTICLES,
            dt: DT,
            gravity: GRAVITY,
            bound: BOUND,
            boundary: BoundaryHandling::Separate,
            rest_density: REST_DENSITY,
            bulk_modulus: BULK_MODULUS,
            tension_limit: TENSION_LIMIT,
            volume_ratio_floor: None,
            interaction_radius: INTERACTION_RADIUS,
            interaction_strength: INTERACTION_STRENGTH,
            spawn_min: Vector::splat(SPAWN_MIN),
            spawn_max: Vector::splat(SPAWN_MAX),
            substeps_per_frame: SUBSTEPS_PER_FRAME,
        }
    }
}

impl SolverParams {
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.num_particles = count;
        self
    }

    pub fn with_grid_resolution(mut self, n_grid: usize) -> Self {
        self.n_grid = n_grid;
        self
    }

    pub fn with_gravity(mut self, gravity: Vector) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn without_gravity(self) -> Self {
        self.with_gravity(Vector::ZERO)
    }

    pub fn with_boundary(mut self, boundary: BoundaryHandling) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_bulk_modulus(mut self, bulk_modulus: Real) -> Self {
        self.bulk_modulus = bulk_modulus;
        self
    }

    /// Clamp `J` to at least `floor` after every update.
    pub fn with_volume_ratio_floor(mut self, floor: Real) -> Self {
        self.volume_ratio_floor = Some(floor);
        self
    }

    pub fn with_spawn_region(mut self, min: Vector, max: Vector) -> Self {
        self.spawn_min = min;
        self.spawn_max = max;
        self
    }

    pub fn with_substeps(mut self, substeps: usize) -> Self {
        self.substeps_per_frame = substeps;
        self
    }

    #[inline]
    pub fn cell_width(&self) -> Real {
        1.0 / self.n_grid as Real
    }

    #[inline]
    pub fn inv_cell_width(&self) -> Real {
        self.n_grid as Real
    }

    /// Rest area of one particle: a quarter cell per axis.
    #[inline]
    pub fn rest_volume(&self) -> Real {
        let half = self.cell_width() * 0.5;
        half * half
    }

    #[inline]
    pub fn particle_mass(&self) -> Real {
        self.rest_volume() * self.rest_density
    }

    /// Lowest admissible particle coordinate on either axis.
    #[inline]
    pub fn wall_min(&self) -> Real {
        self.bound as Real * self.cell_width()
    }

    /// Highest admissible particle coordinate on either axis.
    #[inline]
    pub fn wall_max(&self) -> Real {
        1.0 - self.wall_min()
    }

    /// Reject parameter sets that would let the transfer stencil leave the grid
    /// or that describe no physical material.
    pub fn validate(&self) -> Result<()> {
        // Clamped particles sit at cell coordinates [bound, n - bound], so
        // their stencil spans nodes [bound - 1, n - bound + 1]. Staying below
        // node n needs bound >= 2.
        if self.bound < 2 || self.n_grid < 2 * self.bound + 3 {
            return Err(SolverError::GridTooSmall {
                n_grid: self.n_grid,
                bound: self.bound,
            });
        }
        if self.num_particles == 0 {
            return Err(SolverError::InvalidParameter {
                name: "num_particles",
                value: 0.0,
            });
        }
        positive("dt", self.dt)?;
        positive("rest_density", self.rest_density)?;
        positive("bulk_modulus", self.bulk_modulus)?;
        positive("interaction_radius", self.interaction_radius)?;
        if !(self.tension_limit >= 0.0 && self.tension_limit.is_finite()) {
            return Err(SolverError::InvalidParameter {
                name: "tension_limit",
                value: self.tension_limit,
            });
        }
        if !self.interaction_strength.is_finite() {
            return Err(SolverError::InvalidParameter {
                name: "interaction_strength",
                value: self.interaction_strength,
            });
        }
        if !self.gravity.is_finite() {
            return Err(SolverError::InvalidParameter {
                name: "gravity",
                value: self.gravity.length(),
            });
        }
        if let Some(floor) = self.volume_ratio_floor {
            positive("volume_ratio_floor", floor)?;
        }

        if !(self.spawn_min.cmplt(self.spawn_max).all()) {
            return Err(SolverError::EmptySpawnRegion);
        }
        let (lo, hi) = (self.wall_min(), self.wall_max());
        if self.spawn_min.min_element() < lo || self.spawn_max.max_element() > hi {
            return Err(SolverError::SpawnOutsideDomain);
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: Real) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SolverError::InvalidParameter { name, value })
    }
}
