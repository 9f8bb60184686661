//! Boris velocity rotation for a pure magnetic field

use crate::physics::math::{Scalar, Vector};

/// Rotates `velocity` through half-step vector `t = (q/m) B dt / 2`
///
/// Closed form of the implicit midpoint update (a Cayley transform):
///
/// v' = ((1 - t²) v + 2 (v · t) t + 2 v × t) / (1 + t²)
///
/// The speed is preserved exactly up to rounding, which is what keeps the
/// particle energy flat over long runs.
#[inline]
pub fn rotate(velocity: Vector, field: Vector, charge_to_mass: Scalar, dt: Scalar) -> Vector {
    let t = field * (charge_to_mass * dt / 2.0);
    let t2 = t.dot(t);
    let sum = velocity + velocity.cross(t) + t * velocity.dot(t);

    sum * (2.0 / (1.0 + t2)) - velocity
}

/// Advances position and velocity by one Boris step, returning the new pair
#[inline]
pub fn push(
    position: Vector,
    velocity: Vector,
    field: Vector,
    charge_to_mass: Scalar,
    dt: Scalar,
) -> (Vector, Vector) {
    let velocity = rotate(velocity, field, charge_to_mass, dt);
    (position + velocity * dt, velocity)
}
