//! Magnetic mirror field model
//!
//! The field is the paraxial approximation of a simple mirror whose strength
//! grows quadratically along the axis:
//!
//! B(r) = b0 * (-x z / l², -y z / l², 1 + z² / l²)
//!
//! It is divergence free and reduces to a uniform field of strength `b0`
//! on the midplane axis.

use crate::physics::math::{Scalar, Vector};

/// Field shape normalized to unit strength at the origin
#[inline]
pub fn normalized_mirror_field(position: Vector, length_scale: Scalar) -> Vector {
    let l2 = length_scale * length_scale;
    let Vector { x, y, z } = position;

    Vector::new(-x * z / l2, -y * z / l2, 1.0 + z * z / l2)
}

/// Mirror field scaled by the reference strength `b0`
#[inline]
pub fn mirror_field(position: Vector, field_strength: Scalar, length_scale: Scalar) -> Vector {
    field_strength * normalized_mirror_field(position, length_scale)
}

/// Flux-surface label of the mirror field
///
/// Conserved along field lines; for a well-confined particle it changes slowly
/// over the bounce motion, which makes it the adiabatic invariant shown in the
/// readout.
pub fn flux_label(position: Vector, field_strength: Scalar, length_scale: Scalar) -> Scalar {
    let Vector { x, y, z } = position;
    field_strength * (x * x + y * y) * (1.0 + z * z / length_scale / length_scale)
}
