//! Piecewise-linear interpolation over a sorted abscissa
//!
//! Queries outside `[xp[0], xp[last]]` evaluate to a caller-supplied fill
//! value instead of extending the nearest sample. Both the time-domain
//! resampler and the frequency-domain prediction of the time-scaling check
//! go through here.

use crate::error::{FourierError, Result};

/// Interpolate `(xp, fp)` at every point of `query`.
///
/// `xp` must be ascending. Fails with `ShapeMismatch` if `xp` and `fp`
/// differ in length.
pub fn interp(query: &[f64], xp: &[f64], fp: &[f64], fill: f64) -> Result<Vec<f64>> {
    if xp.len() != fp.len() {
        return Err(FourierError::shape_mismatch(
            xp.len(),
            fp.len(),
            "interpolation sample values",
        ));
    }

    Ok(query.iter().map(|&x| interp_at(x, xp, fp, fill)).collect())
}

/// Interpolate a single point. `xp` and `fp` must have equal length.
pub fn interp_at(x: f64, xp: &[f64], fp: &[f64], fill: f64) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());

    let n = xp.len();
    if n == 0 {
        return fill;
    }
    if x.is_nan() {
        return f64::NAN;
    }
    if x < xp[0] || x > xp[n - 1] {
        return fill;
    }

    // First abscissa strictly greater than x
    let right = xp.partition_point(|&v| v <= x);
    if right >= n {
        return fp[n - 1];
    }
    let left = right - 1;

    let span = xp[right] - xp[left];
    if span == 0.0 {
        return fp[left];
    }
    let frac = (x - xp[left]) / span;
    fp[left] + frac * (fp[right] - fp[left])
}
