use crate::config::INTERACTION_MIN_DISTANCE_SQ;
use crate::math::{Real, Vector};

/// Short-range repulsive point force driven by an external pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interaction {
    /// Pointer location in domain space.
    pub target: Vector,
    pub active: bool,
    pub radius: Real,
    pub strength: Real,
}

impl Interaction {
    pub fn new(radius: Real, strength: Real) -> Self {
        Self {
            target: Vector::splat(-1.0),
            active: false,
            radius,
            strength,
        }
    }

    /// Velocity impulse for a particle at `position`: pushes it away from the
    /// target, linearly stronger towards the centre, zero outside `radius`.
    #[inline]
    pub fn impulse(&self, position: Vector) -> Vector {
        if !self.active {
            return Vector::ZERO;
        }

        let offset = position - self.target;
        let distance_sq = offset.length_squared();
        if distance_sq >= self.radius * self.radius || distance_sq <= INTERACTION_MIN_DISTANCE_SQ {
            return Vector::ZERO;
        }

        let distance = distance_sq.sqrt();
        offset / distance * ((self.radius - distance) * self.strength)
    }
}
