//! Complementary attitude filter

use log::{debug, trace, warn};
use nalgebra::{UnitQuaternion, Vector3};

use crate::blend;
use crate::codec::vector_to_quaternion;
use crate::convention::{from_caller, to_caller};
use crate::error::Result;
use crate::heading::{HeadingCorrection, NoHeadingCorrection};
use crate::integration::propagate;
use crate::math::{Vector3Ext, try_normalize};
use crate::rotation::to_rotation_matrix;
use crate::types::{Estimate, FilterConfig, FilterFlags};

/// Quaternion-based complementary filter
///
/// Fuses gyroscope and accelerometer samples once per fixed tick. The
/// gyroscope is integrated into a predicted attitude; the accelerometer
/// sample, rotated through that prediction, yields a tilt correction that is
/// blended in at the configured fusion weight.
///
/// The attitude is stored earth-to-body and reported body-to-earth. Each
/// tick takes `&mut self`, so the owning control-loop task has exclusive
/// access for the duration of the update.
pub struct ComplementaryFilter<H = NoHeadingCorrection> {
    /// Fixed configuration
    config: FilterConfig,
    /// Current attitude (earth-to-body)
    quaternion: UnitQuaternion<f32>,
    /// Flags of the most recent tick
    flags: FilterFlags,
    /// Heading correction strategy
    heading: H,
}

impl ComplementaryFilter {
    /// Create a filter for the given tick period with the default fusion weight
    ///
    /// # Example
    /// ```
    /// use nalgebra::{UnitQuaternion, Vector3};
    /// use complementary_ahrs::ComplementaryFilter;
    ///
    /// let mut filter = ComplementaryFilter::initialize(0.01).unwrap();
    /// let estimate = filter.update(Vector3::zeros(), Vector3::new(0.0, 0.0, 9.81));
    /// assert_eq!(estimate.quaternion, UnitQuaternion::identity());
    ///
    /// assert!(ComplementaryFilter::initialize(0.0).is_err());
    /// ```
    pub fn initialize(tick_period: f32) -> Result<Self> {
        Self::with_config(FilterConfig::new(tick_period))
    }

    /// Create a filter with the given configuration
    pub fn with_config(config: FilterConfig) -> Result<Self> {
        Self::with_heading_correction(config, NoHeadingCorrection)
    }
}

impl<H: HeadingCorrection> ComplementaryFilter<H> {
    /// Create a filter with a heading correction strategy
    pub fn with_heading_correction(config: FilterConfig, heading: H) -> Result<Self> {
        let config = config
            .validate()
            .inspect_err(|err| warn!("rejecting filter configuration: {err}"))?;

        debug!(
            "complementary filter ready: tick period {} s, fusion weight {}",
            config.tick_period, config.fusion_weight
        );

        Ok(Self::from_validated(config, heading))
    }

    fn from_validated(config: FilterConfig, heading: H) -> Self {
        Self {
            config,
            quaternion: UnitQuaternion::identity(),
            flags: FilterFlags::default(),
            heading,
        }
    }

    /// Reset the attitude to identity
    pub fn reset(&mut self) {
        debug!("complementary filter reset");
        self.quaternion = UnitQuaternion::identity();
        self.flags = FilterFlags::default();
    }

    /// Advance the filter by one tick
    ///
    /// # Arguments
    /// * `gyroscope` - Angular rate in radians per second, body frame
    /// * `accelerometer` - Specific force in any unit, body frame; only the direction is used
    ///
    /// # Returns
    /// The updated attitude (body-to-earth) and the flags describing the tick
    pub fn update(&mut self, gyroscope: Vector3<f32>, accelerometer: Vector3<f32>) -> Estimate {
        let mut flags = FilterFlags::default();
        if let Some(fused) = self.fuse(&gyroscope, &accelerometer, &mut flags) {
            self.quaternion = fused;
        }
        self.finish(flags)
    }

    /// Advance the filter by one tick, then apply the heading correction strategy
    ///
    /// The strategy sees the fused attitude body-to-earth, like
    /// [`quaternion`](Self::quaternion), and its correction is applied in the
    /// earth frame. With [`NoHeadingCorrection`] this is identical to
    /// [`update`](Self::update).
    ///
    /// # Arguments
    /// * `gyroscope` - Angular rate in radians per second, body frame
    /// * `accelerometer` - Specific force in any unit, body frame
    /// * `magnetometer` - Magnetic field in any unit, body frame
    pub fn update_with_magnetometer(
        &mut self,
        gyroscope: Vector3<f32>,
        accelerometer: Vector3<f32>,
        magnetometer: Vector3<f32>,
    ) -> Estimate {
        let mut flags = FilterFlags::default();
        if let Some(fused) = self.fuse(&gyroscope, &accelerometer, &mut flags) {
            let corrected = self
                .heading
                .heading_correction(&to_caller(&fused), &magnetometer)
                .and_then(|correction| {
                    try_normalize(fused.into_inner() * from_caller(&correction).into_inner())
                });

            self.quaternion = match corrected {
                Some(q) => {
                    flags.heading_corrected = true;
                    q
                }
                None => fused,
            };
        }
        self.finish(flags)
    }

    /// Current attitude (body-to-earth)
    pub fn quaternion(&self) -> UnitQuaternion<f32> {
        to_caller(&self.quaternion)
    }

    /// Seed the attitude from a body-to-earth quaternion
    pub fn set_quaternion(&mut self, quaternion: UnitQuaternion<f32>) {
        self.quaternion = from_caller(&quaternion);
    }

    /// Expected gravity direction in the body frame for the current attitude
    ///
    /// An accelerometer at rest reading this direction leaves the attitude
    /// unchanged.
    pub fn gravity(&self) -> Vector3<f32> {
        self.quaternion * Vector3::z()
    }

    /// Flags of the most recent tick
    pub fn flags(&self) -> FilterFlags {
        self.flags
    }

    /// Filter configuration
    pub fn config(&self) -> FilterConfig {
        self.config
    }

    /// Heading correction strategy
    pub fn heading_correction(&self) -> &H {
        &self.heading
    }

    /// Mutable access to the heading correction strategy
    pub fn heading_correction_mut(&mut self) -> &mut H {
        &mut self.heading
    }

    /// Gyroscope propagation followed by the accelerometer correction.
    ///
    /// Returns `None` when the tick must be discarded.
    fn fuse(
        &self,
        gyroscope: &Vector3<f32>,
        accelerometer: &Vector3<f32>,
        flags: &mut FilterFlags,
    ) -> Option<UnitQuaternion<f32>> {
        let prediction = if gyroscope.all_finite() {
            propagate(&self.quaternion, gyroscope, self.config.tick_period)
        } else {
            None
        };
        let Some(prediction) = prediction else {
            trace!("discarding tick: gyroscope propagation failed");
            flags.propagation_rejected = true;
            return None;
        };

        let Some(accelerometer) = accelerometer.try_normalize_checked() else {
            trace!("skipping accelerometer correction: degenerate sample");
            flags.accelerometer_ignored = true;
            return Some(prediction);
        };

        // Body-to-earth rotation of the prediction
        let rotation = to_rotation_matrix(&prediction.conjugate());
        let predicted_gravity = rotation * accelerometer;

        let correction = vector_to_quaternion(&predicted_gravity);
        Some(blend::fuse(&prediction, &correction, self.config.fusion_weight))
    }

    fn finish(&mut self, flags: FilterFlags) -> Estimate {
        self.flags = flags;
        Estimate {
            quaternion: self.quaternion(),
            flags,
        }
    }
}

impl Default for ComplementaryFilter {
    fn default() -> Self {
        Self::from_validated(FilterConfig::default(), NoHeadingCorrection)
    }
}
