// Reference constants for the weakly-compressible water scene.
use crate::math::{Real, Vector};

// Domain discretisation
pub const N_GRID: usize = 64;
pub const NUM_PARTICLES: usize = 12_000;
pub const DT: Real = 2e-4;
pub const BOUND: usize = 3;

// Global physics
pub const GRAVITY: Vector = Vector::new(0.0, -9.8);

// Fluid material constants
pub const REST_DENSITY: Real = 1.0;
pub const BULK_MODULUS: Real = 1000.0;
pub const TENSION_LIMIT: Real = 0.1;

// Pointer interaction
pub const INTERACTION_RADIUS: Real = 0.05;
pub const INTERACTION_STRENGTH: Real = 200.0;
pub const INTERACTION_MIN_DISTANCE_SQ: Real = 1e-6;

// Initial block of fluid, per axis
pub const SPAWN_MIN: Real = 0.15;
pub const SPAWN_MAX: Real = 0.85;

// Steps per rendered frame
pub const SUBSTEPS_PER_FRAME: usize = 25;
