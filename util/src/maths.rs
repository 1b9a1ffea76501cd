//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
///
/// Unlike `f64::clamp` this does not panic if `min > max`, the `min` bound
/// wins. A NaN value is returned unchanged.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float,
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Arctangent of `y/x` using the signs of both to pick the quadrant.
///
/// Units: degrees
pub fn atan2_deg<T>(y: T, x: T) -> T
where
    T: Float,
{
    y.atan2(x).to_degrees()
}

/// Inverse cosine of a value which is first clamped into `[-1, 1]`, so
/// floating point error at the edges of the domain can never produce NaN.
///
/// A NaN argument is treated as fully saturated (`1`).
///
/// Units: degrees
pub fn acos_clamped_deg<T>(value: T) -> T
where
    T: Float,
{
    let one = T::one();

    if value.is_nan() {
        return one.acos().to_degrees();
    }

    clamp(&value, &-one, &one).acos().to_degrees()
}
