//! Rotation convention adapter
//!
//! The filter math follows Valenti et al., where the attitude quaternion maps
//! the earth frame to the body frame. Callers work with body-to-earth
//! rotations. Every quaternion crossing the filter boundary is conjugated
//! exactly once, in one of the two functions below.

use nalgebra::UnitQuaternion;

/// Internal (earth-to-body) attitude to caller (body-to-earth) convention.
#[inline]
pub fn to_caller(internal: &UnitQuaternion<f32>) -> UnitQuaternion<f32> {
    internal.conjugate()
}

/// Caller (body-to-earth) attitude to internal (earth-to-body) convention.
#[inline]
pub fn from_caller(caller: &UnitQuaternion<f32>) -> UnitQuaternion<f32> {
    caller.conjugate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Quaternion;

    #[test]
    fn test_double_conjugation_is_exact() {
        let q = UnitQuaternion::new_unchecked(Quaternion::new(0.5, -0.5, 0.5, 0.5));
        assert_eq!(from_caller(&to_caller(&q)), q);
        assert_eq!(to_caller(&from_caller(&q)), q);
    }

    #[test]
    fn test_negates_vector_part() {
        let q = UnitQuaternion::new_unchecked(Quaternion::new(0.5, -0.5, 0.5, 0.5));
        let caller = to_caller(&q);
        assert_eq!(caller.w, 0.5);
        assert_eq!(caller.i, 0.5);
        assert_eq!(caller.j, -0.5);
        assert_eq!(caller.k, -0.5);
    }
}
