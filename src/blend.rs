//! Complementary blending of the accelerometer correction

use nalgebra::{Quaternion, UnitQuaternion};

use crate::math::try_normalize;

/// Componentwise linear interpolation `(1 − α)·qa + α·qb`.
///
/// The result is not normalized; callers renormalize. Exact at `α = 0` and
/// `α = 1`.
#[inline]
pub fn lerp(qa: &Quaternion<f32>, qb: &Quaternion<f32>, alpha: f32) -> Quaternion<f32> {
    let beta = 1.0 - alpha;
    Quaternion::new(
        beta * qa.w + alpha * qb.w,
        beta * qa.i + alpha * qb.i,
        beta * qa.j + alpha * qb.j,
        beta * qa.k + alpha * qb.k,
    )
}

/// Pull a correction toward identity by the fusion weight.
///
/// Small weights yield a correction that nudges the attitude by a small
/// fraction of the accelerometer-implied error per tick.
pub fn blend_correction(correction: &UnitQuaternion<f32>, weight: f32) -> UnitQuaternion<f32> {
    let identity = Quaternion::identity();
    try_normalize(lerp(&identity, correction.as_ref(), weight))
        .unwrap_or_else(UnitQuaternion::identity)
}

/// Compose the blended correction onto the gyroscope prediction.
pub fn fuse(
    prediction: &UnitQuaternion<f32>,
    correction: &UnitQuaternion<f32>,
    weight: f32,
) -> UnitQuaternion<f32> {
    let blended = blend_correction(correction, weight);
    try_normalize(prediction.into_inner() * blended.into_inner()).unwrap_or(*prediction)
}
