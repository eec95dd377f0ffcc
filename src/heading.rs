//! Heading correction extension point
//!
//! The gravity correction only observes roll and pitch; heading drifts with
//! gyroscope bias. A [`HeadingCorrection`] strategy can supply the missing
//! yaw correction from a magnetometer (or any other heading source). The
//! filter ships without a magnetometer fusion algorithm:
//! [`NoHeadingCorrection`] is the default and leaves the estimate untouched.
//!
//! # Example
//! ```
//! use nalgebra::{UnitQuaternion, Vector3};
//! use complementary_ahrs::{ComplementaryFilter, FilterConfig, HeadingCorrection};
//!
//! /// Accepts every sample with a no-op correction
//! struct ZeroHeading;
//!
//! impl HeadingCorrection for ZeroHeading {
//!     fn heading_correction(
//!         &mut self,
//!         _attitude: &UnitQuaternion<f32>,
//!         _magnetic_field: &Vector3<f32>,
//!     ) -> Option<UnitQuaternion<f32>> {
//!         Some(UnitQuaternion::identity())
//!     }
//! }
//!
//! let mut filter =
//!     ComplementaryFilter::with_heading_correction(FilterConfig::default(), ZeroHeading).unwrap();
//! let estimate = filter.update_with_magnetometer(
//!     Vector3::zeros(),
//!     Vector3::new(0.0, 0.0, 1.0),
//!     Vector3::new(0.4, 0.0, -0.9),
//! );
//! assert!(estimate.flags.heading_corrected);
//! ```

use nalgebra::{UnitQuaternion, Vector3};

/// Strategy producing a heading correction from a magnetic field sample
pub trait HeadingCorrection {
    /// Compute a correction for the current attitude
    ///
    /// # Arguments
    /// * `attitude` - Fused attitude for this tick, body-to-earth (same
    ///   convention as [`ComplementaryFilter::quaternion`](crate::ComplementaryFilter::quaternion))
    /// * `magnetic_field` - Magnetometer sample in the body frame
    ///
    /// # Returns
    /// An earth-frame correction `c`, giving the new attitude `c * attitude`,
    /// or `None` to leave the attitude unchanged this tick
    fn heading_correction(
        &mut self,
        attitude: &UnitQuaternion<f32>,
        magnetic_field: &Vector3<f32>,
    ) -> Option<UnitQuaternion<f32>>;
}

/// Gyroscope and accelerometer only; never corrects heading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHeadingCorrection;

impl HeadingCorrection for NoHeadingCorrection {
    #[inline]
    fn heading_correction(
        &mut self,
        _attitude: &UnitQuaternion<f32>,
        _magnetic_field: &Vector3<f32>,
    ) -> Option<UnitQuaternion<f32>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_heading_correction() {
        let mut strategy = NoHeadingCorrection;
        let correction =
            strategy.heading_correction(&UnitQuaternion::identity(), &Vector3::new(1.0, 0.0, 0.0));
        assert!(correction.is_none());
    }
}
