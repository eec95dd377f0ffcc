//! Closed-form conversion of direction vectors to quaternions
//!
//! Both codecs build the minimal rotation explaining a measured direction
//! without trigonometry. Each splits on the sign of one component so that the
//! denominators stay bounded away from zero.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::math::{clamped_sqrt, try_normalize};

/// Convert a unit direction to the quaternion rotating `+Z` onto it.
///
/// Used on the predicted gravity direction: the result is the attitude
/// correction that would fully explain the accelerometer reading. The yaw
/// component of the result is always zero.
///
/// The input must be normalized. Radicands are clamped at zero so that small
/// floating-point drift cannot produce NaN.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use complementary_ahrs::codec::vector_to_quaternion;
///
/// let q = vector_to_quaternion(&Vector3::new(1.0, 0.0, 0.0));
/// let up = q * Vector3::z();
/// assert!((up - Vector3::x()).norm() < 1e-6);
/// ```
pub fn vector_to_quaternion(v: &Vector3<f32>) -> UnitQuaternion<f32> {
    let q = if v.z >= 0.0 {
        let denominator = clamped_sqrt(2.0 * (v.z + 1.0));
        Quaternion::new(
            clamped_sqrt(0.5 * (v.z + 1.0)),
            -v.y / denominator,
            v.x / denominator,
            0.0,
        )
    } else {
        let denominator = clamped_sqrt(2.0 * (1.0 - v.z));
        Quaternion::new(
            -v.y / denominator,
            clamped_sqrt(0.5 * (1.0 - v.z)),
            0.0,
            v.x / denominator,
        )
    };

    try_normalize(q).unwrap_or_else(UnitQuaternion::identity)
}

/// Convert a magnetic field direction to a heading-only quaternion.
///
/// Only the horizontal components are used; the result is a pure rotation
/// about `Z` (`q1 = q2 = 0`) taking `+X` onto the horizontal projection of
/// the field. Intended for heading correction strategies after the tilt has
/// been removed from the field sample.
///
/// Returns `None` when the field has no horizontal component.
pub fn magnetic_field_to_quaternion(l: &Vector3<f32>) -> Option<UnitQuaternion<f32>> {
    let gamma = l.x * l.x + l.y * l.y;
    if !gamma.is_finite() || gamma <= f32::EPSILON {
        return None;
    }

    let sqrt_gamma = clamped_sqrt(gamma);
    let sqrt_2gamma = clamped_sqrt(2.0 * gamma);

    let q = if l.x >= 0.0 {
        let root = clamped_sqrt(gamma + l.x * sqrt_gamma);
        Quaternion::new(
            root / sqrt_2gamma,
            0.0,
            0.0,
            l.y / (core::f32::consts::SQRT_2 * root),
        )
    } else {
        let root = clamped_sqrt(gamma - l.x * sqrt_gamma);
        Quaternion::new(
            l.y / (core::f32::consts::SQRT_2 * root),
            0.0,
            0.0,
            root / sqrt_2gamma,
        )
    };

    try_normalize(q)
}
