//! Recorded particle states

use crate::physics::math::{Scalar, Vector, magnitude, transverse_squared};

/// One recorded state of the particle along its trajectory
///
/// All derived quantities assume unit mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    position: Vector,
    velocity: Vector,
    pub time: Scalar,
    /// Field magnitude seen by the step that produced this sample
    pub field_magnitude: Scalar,
}

impl Sample {
    pub fn new(position: Vector, velocity: Vector, time: Scalar, field_magnitude: Scalar) -> Self {
        Self {
            position,
            velocity,
            time,
            field_magnitude,
        }
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn energy(&self) -> Scalar {
        0.5 * self.velocity.dot(self.velocity)
    }

    /// First adiabatic invariant, mu = m v⊥² / 2|B|
    ///
    /// Infinite on the initial sample, whose field has not been evaluated yet.
    pub fn magnetic_moment(&self) -> Scalar {
        0.5 / self.field_magnitude * transverse_squared(self.velocity)
    }

    /// Squared speed across the mirror axis, vx² + vy²
    pub fn perpendicular_velocity(&self) -> Scalar {
        transverse_squared(self.velocity)
    }

    pub fn speed(&self) -> Scalar {
        magnitude(self.velocity)
    }
}
