//! Scalar and vector types shared by the trajectory engine

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 3D vector type for positions, velocities, and fields
pub type Vector = bevy::math::DVec3;

/// Charge-to-mass ratio of the simulated particle
pub const Q_M: Scalar = 1.0;

/// Euclidean norm computed through libm so results match across targets
#[inline]
pub fn magnitude(v: Vector) -> Scalar {
    libm::sqrt(v.dot(v))
}

/// Squared norm of the component perpendicular to the z axis
#[inline]
pub fn transverse_squared(v: Vector) -> Scalar {
    v.x * v.x + v.y * v.y
}
