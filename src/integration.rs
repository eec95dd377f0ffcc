//! Gyroscope propagation of the attitude quaternion

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::math::try_normalize;

/// Quaternion rate for an angular velocity: `q̇ = Ω ⊗ q` with `Ω = (0, ω)`.
///
/// The angular velocity multiplies from the left, matching the
/// earth-to-body convention of the internal state.
#[inline]
pub fn quaternion_rate(q: &UnitQuaternion<f32>, angular_rate: &Vector3<f32>) -> Quaternion<f32> {
    let omega = Quaternion::from_parts(0.0, *angular_rate);
    omega * q.into_inner()
}

/// Propagate `q` through one tick of angular velocity.
///
/// Single explicit Euler step, `q − (dt/2)·(Ω ⊗ q)`, renormalized. There is
/// no trigonometry; the truncation error per step is O(dt²).
///
/// Returns `None` when the result cannot be normalized (non-finite input).
///
/// # Arguments
/// * `q` - Previous attitude (internal convention)
/// * `angular_rate` - Gyroscope reading in radians per second
/// * `dt` - Tick period in seconds
pub fn propagate(
    q: &UnitQuaternion<f32>,
    angular_rate: &Vector3<f32>,
    dt: f32,
) -> Option<UnitQuaternion<f32>> {
    let q_dot = quaternion_rate(q, angular_rate);
    let half_dt = -0.5 * dt;
    try_normalize(q.into_inner() + q_dot * half_dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use core::f32::consts::PI;

    #[test]
    fn test_zero_rate_is_fixed_point() {
        let q = UnitQuaternion::from_euler_angles(0.3, -0.2, 1.1);
        let propagated = propagate(&q, &Vector3::zeros(), 0.01).unwrap();
        assert_abs_diff_eq!(propagated, q, epsilon = 1e-6);
    }

    #[test]
    fn test_rate_is_left_multiplication() {
        let q = UnitQuaternion::from_euler_angles(0.0, 0.5, 0.0);
        let w = Vector3::new(0.0, 0.0, 1.0);
        let rate = quaternion_rate(&q, &w);

        // (0,0,0,1) ⊗ (c,0,s,0) = (0,-s,0,c)
        let (s, c) = (libm::sinf(0.25), libm::cosf(0.25));
        assert_abs_diff_eq!(rate.w, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rate.i, -s, epsilon = 1e-6);
        assert_abs_diff_eq!(rate.j, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rate.k, c, epsilon = 1e-6);
    }

    #[test]
    fn test_single_euler_step() {
        let q = UnitQuaternion::identity();
        let propagated = propagate(&q, &Vector3::new(0.0, 0.0, PI), 1.0).unwrap();

        // 1 - 0.5·(0,0,0,π) = (1,0,0,-π/2)
        let norm = libm::sqrtf(1.0 + PI * PI / 4.0);
        assert_abs_diff_eq!(propagated.w, 1.0 / norm, epsilon = 1e-6);
        assert_abs_diff_eq!(propagated.i, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(propagated.j, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(propagated.k, -PI / 2.0 / norm, epsilon = 1e-6);
    }

    #[test]
    fn test_small_steps_track_closed_form() {
        // 100 steps of 0.5 rad/s about z for 1 s
        let mut q = UnitQuaternion::identity();
        for _ in 0..100 {
            q = propagate(&q, &Vector3::new(0.0, 0.0, 0.5), 0.01).unwrap();
        }
        // Internal convention rotates the opposite way
        let expected = UnitQuaternion::from_euler_angles(0.0, 0.0, -0.5);
        assert_abs_diff_eq!(q, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_non_finite_rate_is_rejected() {
        let q = UnitQuaternion::identity();
        assert!(propagate(&q, &Vector3::new(f32::NAN, 0.0, 0.0), 0.01).is_none());
        assert!(propagate(&q, &Vector3::new(0.0, f32::INFINITY, 0.0), 0.01).is_none());
    }
}
