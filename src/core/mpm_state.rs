use bevy::prelude::*;
use rand::Rng;

use crate::config::SolverParams;
use crate::error::{Result, SolverError};
use crate::materials::{WeaklyCompressible, utils};
use crate::math::{Real, Vector};
use crate::solver;

use super::grid::Grid;
use super::interaction::Interaction;
use super::particle_set::ParticleSet;

/// Summary of the particle volume ratios.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeStats {
    pub min: Real,
    pub max: Real,
    pub mean: Real,
}

/// Aggregate simulation state for the solver.
///
/// Owns the particle arrays (the only state that survives a step), the
/// transient grid and the pointer interaction.
#[derive(Resource, Clone, Debug)]
pub struct MpmState {
    particle_set: ParticleSet,
    grid: Grid,
    solver_params: SolverParams,
    material: WeaklyCompressible,
    interaction: Interaction,
}

impl MpmState {
    /// Validate `solver_params` and spawn the initial block of fluid with the thread RNG.
    pub fn new(solver_params: SolverParams) -> Result<Self> {
        Self::with_rng(solver_params, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(solver_params: SolverParams, rng: &mut R) -> Result<Self> {
        solver_params.validate()?;

        let particle_set = ParticleSet::spawn_uniform(
            solver_params.num_particles,
            solver_params.spawn_min,
            solver_params.spawn_max,
            rng,
        );
        info!(
            "MPM fluid: {} particles on a {}x{} grid, dt = {}",
            particle_set.len(),
            solver_params.n_grid,
            solver_params.n_grid,
            solver_params.dt
        );

        Ok(Self::from_parts(solver_params, particle_set))
    }

    /// Build a solver around an explicit particle set. Positions must already
    /// lie inside the walls.
    pub fn with_particles(solver_params: SolverParams, particle_set: ParticleSet) -> Result<Self> {
        solver_params.validate()?;
        let (lo, hi) = (solver_params.wall_min(), solver_params.wall_max());
        if particle_set
            .positions()
            .iter()
            .any(|p| p.min_element() < lo || p.max_element() > hi)
        {
            return Err(SolverError::SpawnOutsideDomain);
        }
        Ok(Self::from_parts(solver_params, particle_set))
    }

    fn from_parts(solver_params: SolverParams, particle_set: ParticleSet) -> Self {
        Self {
            grid: Grid::new(solver_params.n_grid),
            material: WeaklyCompressible::from_params(&solver_params),
            interaction: Interaction::new(
                solver_params.interaction_radius,
                solver_params.interaction_strength,
            ),
            particle_set,
            solver_params,
        }
    }

    /// Advance the simulation by one time increment.
    pub fn step(&mut self) {
        self.zero_grid();
        self.particle_to_grid();
        self.update_grid();
        self.grid_to_particle();
    }

    pub fn step_n(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    pub fn zero_grid(&mut self) {
        self.grid.zero();
    }

    /// Scatter particles onto the grid. Positions edited through
    /// [`Self::particle_set_mut`] are pulled back inside the walls first so
    /// every stencil stays on the grid.
    pub fn particle_to_grid(&mut self) {
        self.particle_set
            .clamp_positions(self.solver_params.wall_min(), self.solver_params.wall_max());
        solver::particle_to_grid(
            &self.solver_params,
            &self.material,
            &self.particle_set,
            &mut self.grid,
        );
    }

    pub fn update_grid(&mut self) {
        solver::update_grid(&self.solver_params, &mut self.grid);
    }

    pub fn grid_to_particle(&mut self) {
        solver::grid_to_particle(
            &self.solver_params,
            &self.interaction,
            &self.grid,
            &mut self.particle_set,
        );
    }

    pub fn particle_set(&self) -> &ParticleSet {
        &self.particle_set
    }

    /// Direct particle access for scene setup between steps. Positions
    /// outside `[wall_min, wall_max]` are clamped back at the next scatter.
    pub fn particle_set_mut(&mut self) -> &mut ParticleSet {
        &mut self.particle_set
    }

    pub fn particle_count(&self) -> usize {
        self.particle_set.len()
    }

    pub fn positions(&self) -> &[Vector] {
        self.particle_set.positions()
    }

    pub fn volume_ratios(&self) -> &[Real] {
        self.particle_set.volume_ratios()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn solver_params(&self) -> &SolverParams {
        &self.solver_params
    }

    pub fn material(&self) -> &WeaklyCompressible {
        &self.material
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn set_interaction_target(&mut self, target: Vector) {
        self.interaction.target = target;
    }

    pub fn set_interaction_active(&mut self, active: bool) {
        self.interaction.active = active;
    }

    pub fn clear_interaction(&mut self) {
        self.interaction.active = false;
    }

    pub fn total_particle_mass(&self) -> Real {
        self.particle_set.len() as Real * self.solver_params.particle_mass()
    }

    pub fn total_particle_momentum(&self) -> Vector {
        self.particle_set.velocities().iter().sum::<Vector>() * self.solver_params.particle_mass()
    }

    pub fn volume_ratio_stats(&self) -> Option<VolumeStats> {
        let ratios = self.particle_set.volume_ratios();
        if ratios.is_empty() {
            return None;
        }

        let (min, max, sum) = ratios.iter().fold(
            (Real::INFINITY, Real::NEG_INFINITY, 0.0),
            |(min, max, sum), &j| (min.min(j), max.max(j), sum + j),
        );
        Some(VolumeStats {
            min,
            max,
            mean: sum / ratios.len() as Real,
        })
    }

    /// First violated particle invariant, if any: non-finite state or a
    /// volume ratio that is no longer positive.
    pub fn check_health(&self) -> Result<()> {
        if let Some(index) = self.particle_set.first_non_finite() {
            return Err(SolverError::NonFiniteParticle { index });
        }
        if let Some((index, &value)) = self
            .particle_set
            .volume_ratios()
            .iter()
            .enumerate()
            .find(|&(_, &j)| !utils::volume_ratio_ok(j))
        {
            return Err(SolverError::DegenerateVolumeRatio { index, value });
        }
        Ok(())
    }
}
