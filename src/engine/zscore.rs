//! Cole's LMS power transform between raw values and Z-scores.

use crate::core::standard::LmsParams;

/// Z-score reported for measurements the transform cannot handle (zero,
/// negative or non-finite values)
pub const Z_SCORE_FLOOR: f64 = -6.0;

/// `|L|` below this takes the log-normal branch; the power form loses all
/// precision as `L` approaches zero
pub const L_ZERO_TOLERANCE: f64 = 1e-7;

#[inline]
fn is_log_normal(lms: &LmsParams) -> bool {
    lms.l.abs() < L_ZERO_TOLERANCE
}

/// Z-score of `value` under the LMS distribution.
///
/// Non-positive or non-finite values return [`Z_SCORE_FLOOR`].
#[must_use]
pub fn value_to_z(value: f64, lms: &LmsParams) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return Z_SCORE_FLOOR;
    }

    let ratio = value / lms.m;
    let z = if is_log_normal(lms) {
        ratio.ln() / lms.s
    } else {
        (ratio.powf(lms.l) - 1.0) / (lms.l * lms.s)
    };

    if z.is_finite() {
        z
    } else {
        Z_SCORE_FLOOR
    }
}

/// Value at Z-score `z` under the LMS distribution.
///
/// Returns `0.0` when `1 + L*S*z <= 0`, where the power is undefined.
#[must_use]
pub fn z_to_value(z: f64, lms: &LmsParams) -> f64 {
    if is_log_normal(lms) {
        return lms.m * (lms.s * z).exp();
    }

    let base = 1.0 + lms.l * lms.s * z;
    if base <= 0.0 {
        return 0.0;
    }

    let value = lms.m * base.powf(1.0 / lms.l);
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
