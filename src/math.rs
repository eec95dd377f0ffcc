//! Mathematical utilities and nalgebra extensions for the complementary filter

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Smallest norm accepted when normalizing a vector or quaternion.
pub const MIN_NORM: f32 = 1e-6;

/// Square root with the radicand clamped at zero.
///
/// Near-unit inputs can drift slightly outside the domain of the closed-form
/// codecs; this keeps the result a number instead of NaN.
#[inline]
pub fn clamped_sqrt(x: f32) -> f32 {
    libm::sqrtf(if x > 0.0 { x } else { 0.0 })
}

/// Normalize a raw quaternion, rejecting zero and non-finite norms.
pub fn try_normalize(q: Quaternion<f32>) -> Option<UnitQuaternion<f32>> {
    let norm = libm::sqrtf(q.norm_squared());
    if !norm.is_finite() || norm <= MIN_NORM {
        return None;
    }
    Some(UnitQuaternion::new_unchecked(q / norm))
}

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Calculate the magnitude of the vector
    ///
    /// Scaled by the largest component so that large finite inputs do not
    /// overflow to infinity.
    fn magnitude(&self) -> f32;

    /// Normalize the vector, returning `None` if the magnitude is zero or not finite
    fn try_normalize_checked(&self) -> Option<Vector3<f32>>;

    /// Whether every component is finite
    fn all_finite(&self) -> bool;

    /// Convert degrees to radians
    fn deg_to_rad(&self) -> Vector3<f32>;

    /// Convert radians to degrees
    fn rad_to_deg(&self) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn magnitude(&self) -> f32 {
        let scale = libm::fabsf(self.x)
            .max(libm::fabsf(self.y))
            .max(libm::fabsf(self.z));
        if scale == 0.0 || !scale.is_finite() {
            return scale;
        }
        let (x, y, z) = (self.x / scale, self.y / scale, self.z / scale);
        scale * libm::sqrtf(x * x + y * y + z * z)
    }

    fn try_normalize_checked(&self) -> Option<Vector3<f32>> {
        let mag = Vector3Ext::magnitude(self);
        if mag.is_finite() && mag > MIN_NORM {
            Some(*self / mag)
        } else {
            None
        }
    }

    fn all_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn deg_to_rad(&self) -> Vector3<f32> {
        *self * DEG_TO_RAD
    }

    fn rad_to_deg(&self) -> Vector3<f32> {
        *self * RAD_TO_DEG
    }
}

/// Extension trait for UnitQuaternion operations
pub trait QuaternionExt {
    /// Convert quaternion to Euler angles (roll, pitch, yaw) in radians
    fn to_euler(&self) -> Vector3<f32>;

    /// Convert quaternion to Euler angles in degrees
    fn to_euler_degrees(&self) -> Vector3<f32>;

    /// Create quaternion from Euler angles in degrees
    fn from_euler_degrees(roll: f32, pitch: f32, yaw: f32) -> UnitQuaternion<f32>;
}

impl QuaternionExt for UnitQuaternion<f32> {
    fn to_euler(&self) -> Vector3<f32> {
        let (roll, pitch, yaw) = self.euler_angles();
        Vector3::new(roll, pitch, yaw)
    }

    fn to_euler_degrees(&self) -> Vector3<f32> {
        self.to_euler().rad_to_deg()
    }

    fn from_euler_degrees(roll: f32, pitch: f32, yaw: f32) -> UnitQuaternion<f32> {
        let euler_rad = Vector3::new(roll, pitch, yaw).deg_to_rad();
        UnitQuaternion::from_euler_angles(euler_rad.x, euler_rad.y, euler_rad.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_sqrt() {
        assert_eq!(clamped_sqrt(4.0), 2.0);
        assert_eq!(clamped_sqrt(0.0), 0.0);
        assert_eq!(clamped_sqrt(-1e-7), 0.0);
    }

    #[test]
    fn test_try_normalize() {
        let q = try_normalize(Quaternion::new(2.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(q, UnitQuaternion::identity());

        assert!(try_normalize(Quaternion::new(0.0, 0.0, 0.0, 0.0)).is_none());
        assert!(try_normalize(Quaternion::new(f32::NAN, 0.0, 0.0, 0.0)).is_none());
        assert!(try_normalize(Quaternion::new(f32::INFINITY, 0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_vector_extensions() {
        let v = Vector3::new(3.0f32, 4.0, 0.0);
        assert!((Vector3Ext::magnitude(&v) - 5.0).abs() < 1e-6);

        let normalized = v.try_normalize_checked().unwrap();
        assert!((Vector3Ext::magnitude(&normalized) - 1.0).abs() < 1e-6);

        assert!(Vector3::<f32>::zeros().try_normalize_checked().is_none());
        assert!(Vector3::new(f32::NAN, 0.0, 1.0).try_normalize_checked().is_none());
        assert!(!Vector3Ext::all_finite(&Vector3::new(0.0, f32::INFINITY, 0.0)));
    }

    #[test]
    fn test_magnitude_of_large_vector() {
        let v = Vector3::new(3e19f32, -4e19, 0.0);
        let mag = Vector3Ext::magnitude(&v);
        assert!((mag / 5e19 - 1.0).abs() < 1e-6);

        let normalized = v.try_normalize_checked().unwrap();
        assert!((normalized - Vector3::new(0.6, -0.8, 0.0)).norm() < 1e-6);

        assert!(Vector3Ext::magnitude(&Vector3::new(f32::NAN, 1.0, 0.0)).is_nan());
        assert_eq!(Vector3Ext::magnitude(&Vector3::new(f32::INFINITY, 1.0, 0.0)), f32::INFINITY);
    }

    #[test]
    fn test_quaternion_euler_conversion() {
        let euler = Vector3::new(30.0, 45.0, 60.0);
        let quat = UnitQuaternion::from_euler_degrees(euler.x, euler.y, euler.z);
        let recovered = quat.to_euler_degrees();

        // Allow for some numerical precision loss
        assert!((euler - recovered).norm() < 1e-3);
    }
}
