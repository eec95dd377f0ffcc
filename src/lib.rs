#![no_std]

//! Complementary AHRS - quaternion-based attitude estimation for flight controllers
//!
//! This crate implements the complementary filter described by Valenti,
//! Dryanovski and Xiao in "Keeping a Good Attitude: A Quaternion-Based
//! Orientation Filter for IMUs and MARGs". Once per control-loop tick it
//! integrates the gyroscope into a predicted attitude and nudges that
//! prediction toward the tilt implied by the accelerometer.
//!
//! # Features
//!
//! - Closed-form, trigonometry-free quaternion math
//! - Fixed tick period and fusion weight, validated once at construction
//! - No heap allocation, no recursion, bounded work per tick
//! - Graceful degradation: a degenerate accelerometer sample falls back to
//!   gyroscope integration, a non-finite gyroscope sample leaves the attitude
//!   untouched
//! - Heading correction extension point for magnetometer fusion
//! - `#![no_std]` compatible for embedded systems
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use complementary_ahrs::ComplementaryFilter;
//!
//! let mut filter = ComplementaryFilter::initialize(0.01).unwrap(); // 100 Hz
//!
//! // Sensor readings
//! let gyroscope = Vector3::new(0.01, -0.02, 0.005);   // rad/s
//! let accelerometer = Vector3::new(0.0, 0.0, 9.81);   // any unit
//!
//! // Update the filter once per tick
//! let estimate = filter.update(gyroscope, accelerometer);
//!
//! // Body-to-earth attitude
//! let (roll, pitch, yaw) = estimate.quaternion.euler_angles();
//! # let _ = (roll, pitch, yaw);
//! ```

pub mod blend;
pub mod codec;
pub mod convention;
mod error;
mod filter;
mod heading;
pub mod integration;
mod math;
pub mod rotation;
mod types;

// Re-export all public types and functions
pub use error::{FilterError, Result};
pub use filter::ComplementaryFilter;
pub use heading::{HeadingCorrection, NoHeadingCorrection};
pub use math::{DEG_TO_RAD, QuaternionExt, RAD_TO_DEG, Vector3Ext};
pub use types::*;
