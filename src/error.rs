//! Filter error types
//!
//! Errors only arise while configuring a filter. Once a filter exists, every
//! tick completes and reports degraded operation through
//! [`FilterFlags`](crate::FilterFlags) instead.

use core::fmt;

/// Result type for filter construction
pub type Result<T> = core::result::Result<T, FilterError>;

/// Configuration errors rejected by the filter constructors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterError {
    /// Tick period must be positive and finite (seconds)
    InvalidTickPeriod(f32),
    /// Fusion weight must lie within `[0, 1]`
    InvalidFusionWeight(f32),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidTickPeriod(period) => {
                write!(f, "tick period must be positive and finite, got {period}")
            }
            FilterError::InvalidFusionWeight(weight) => {
                write!(f, "fusion weight must be within [0, 1], got {weight}")
            }
        }
    }
}

impl core::error::Error for FilterError {}
