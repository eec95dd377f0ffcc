//! Core types for the complementary filter

use nalgebra::UnitQuaternion;

use crate::error::{FilterError, Result};

/// Complementary blend factor used when none is configured
///
/// Each tick trusts gyroscope integration almost entirely and moves 0.5% of
/// the way toward the accelerometer-implied attitude.
pub const DEFAULT_FUSION_WEIGHT: f32 = 0.005;

/// Tick period used by [`FilterConfig::default`] (100 Hz)
pub const DEFAULT_TICK_PERIOD: f32 = 0.01;

/// Filter configuration
///
/// Fixed for the lifetime of a filter instance. The tick period enters the
/// gyroscope integration as a linear scale factor, so it must match the rate
/// at which [`update`](crate::ComplementaryFilter::update) is called.
///
/// # Example
/// ```
/// use complementary_ahrs::{ComplementaryFilter, FilterConfig};
///
/// let config = FilterConfig {
///     tick_period: 0.002, // 500 Hz control loop
///     ..Default::default()
/// };
/// let filter = ComplementaryFilter::with_config(config).unwrap();
/// assert_eq!(filter.config().fusion_weight, 0.005);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Control-loop tick period in seconds
    pub tick_period: f32,
    /// Weight of the accelerometer correction per tick, within `[0, 1]`
    ///
    /// Zero disables the accelerometer correction entirely (pure gyroscope
    /// integration). One snaps to the accelerometer-implied tilt every tick.
    pub fusion_weight: f32,
}

impl FilterConfig {
    /// Configuration with the given tick period and the default fusion weight
    pub fn new(tick_period: f32) -> Self {
        Self {
            tick_period,
            ..Default::default()
        }
    }

    /// Check the configuration, returning it unchanged when valid
    pub fn validate(self) -> Result<Self> {
        if !(self.tick_period.is_finite() && self.tick_period > 0.0) {
            return Err(FilterError::InvalidTickPeriod(self.tick_period));
        }
        if !(0.0..=1.0).contains(&self.fusion_weight) {
            return Err(FilterError::InvalidFusionWeight(self.fusion_weight));
        }
        Ok(self)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            fusion_weight: DEFAULT_FUSION_WEIGHT,
        }
    }
}

/// Per-tick status flags
///
/// Describes how the most recent tick was computed. All flags are cleared at
/// the start of every tick.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use complementary_ahrs::ComplementaryFilter;
///
/// let mut filter = ComplementaryFilter::initialize(0.01).unwrap();
///
/// // Free fall: no usable gravity direction
/// let estimate = filter.update(Vector3::zeros(), Vector3::zeros());
/// assert!(estimate.flags.accelerometer_ignored);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterFlags {
    /// The accelerometer correction was skipped this tick
    ///
    /// Set when the accelerometer sample has zero magnitude or is not finite;
    /// the attitude was propagated from the gyroscope alone.
    pub accelerometer_ignored: bool,
    /// The tick was discarded and the previous attitude kept
    ///
    /// Set when the gyroscope sample is not finite or the propagated
    /// quaternion could not be normalized.
    pub propagation_rejected: bool,
    /// A heading correction strategy contributed to this tick
    pub heading_corrected: bool,
}

impl FilterFlags {
    /// Whether the tick ran in a degraded mode
    pub fn is_degraded(&self) -> bool {
        self.accelerometer_ignored || self.propagation_rejected
    }
}

/// Output of a single filter tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Attitude as a body-to-earth rotation
    pub quaternion: UnitQuaternion<f32>,
    /// How this tick was computed
    pub flags: FilterFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FilterConfig::default();
        assert_eq!(config.tick_period, 0.01);
        assert_eq!(config.fusion_weight, 0.005);
        assert_eq!(FilterConfig::new(0.002).fusion_weight, DEFAULT_FUSION_WEIGHT);
    }

    #[test]
    fn test_validate_tick_period() {
        assert!(FilterConfig::new(0.01).validate().is_ok());
        assert_eq!(
            FilterConfig::new(0.0).validate(),
            Err(FilterError::InvalidTickPeriod(0.0))
        );
        assert_eq!(
            FilterConfig::new(-0.01).validate(),
            Err(FilterError::InvalidTickPeriod(-0.01))
        );
        assert!(FilterConfig::new(f32::NAN).validate().is_err());
        assert!(FilterConfig::new(f32::INFINITY).validate().is_err());
    }

    #[test]
    fn test_validate_fusion_weight() {
        let edges = [0.0, 1.0];
        for weight in edges {
            let config = FilterConfig {
                fusion_weight: weight,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }

        let config = FilterConfig {
            fusion_weight: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(FilterError::InvalidFusionWeight(1.5)));

        let config = FilterConfig {
            fusion_weight: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_flags_degraded() {
        assert!(!FilterFlags::default().is_degraded());
        let flags = FilterFlags {
            accelerometer_ignored: true,
            ..Default::default()
        };
        assert!(flags.is_degraded());
    }
}
