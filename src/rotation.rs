//! Rotation matrix construction from a quaternion

use nalgebra::{Matrix3, UnitQuaternion};

/// Expand a unit quaternion into its 3×3 rotation matrix.
///
/// The matrix applies the same rotation as `q * v`. Computed from the ten
/// pairwise component products; no state, no allocation.
pub fn to_rotation_matrix(q: &UnitQuaternion<f32>) -> Matrix3<f32> {
    let (q0, q1, q2, q3) = (q.w, q.i, q.j, q.k);

    let q0q0 = q0 * q0;
    let q1q1 = q1 * q1;
    let q2q2 = q2 * q2;
    let q3q3 = q3 * q3;
    let q0q1 = q0 * q1;
    let q0q2 = q0 * q2;
    let q0q3 = q0 * q3;
    let q1q2 = q1 * q2;
    let q1q3 = q1 * q3;
    let q2q3 = q2 * q3;

    Matrix3::new(
        q0q0 + q1q1 - q2q2 - q3q3,
        2.0 * (q1q2 - q0q3),
        2.0 * (q1q3 + q0q2),
        2.0 * (q1q2 + q0q3),
        q0q0 - q1q1 + q2q2 - q3q3,
        2.0 * (q2q3 - q0q1),
        2.0 * (q1q3 - q0q2),
        2.0 * (q2q3 + q0q1),
        q0q0 - q1q1 - q2q2 + q3q3,
    )
}
