//! Conversions between Z-scores and percentiles.
//!
//! The forward direction uses the Abramowitz & Stegun 7.1.26 approximation of
//! `erf` (absolute error below 1.5e-7). The inverse uses Peter Acklam's
//! rational approximation of the normal quantile function (relative error
//! below 1.15e-9).
//!
//! Everything here works at full precision. Use [`round_percentile`] and
//! [`round_z_score`] only when presenting results.

/// Lowest percentile accepted by [`percentile_to_z`]
pub const MIN_PERCENTILE: f64 = 0.001;

/// Highest percentile accepted by [`percentile_to_z`]
pub const MAX_PERCENTILE: f64 = 99.999;

/// Approximation of the error function (Abramowitz & Stegun 7.1.26)
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    // The coefficients sum to 0.999999999, so zero needs its own case to stay exact
    if x == 0.0 {
        return 0.0;
    }

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Standard normal cumulative distribution function
#[must_use]
pub fn normal_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return 0.5;
    }
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Standard normal quantile function (Acklam), for `p` in `(0, 1)`
#[must_use]
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_690e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;
    const P_HIGH: f64 = 1.0 - P_LOW;

    // Rational function for the tails, in q = sqrt(-2 ln p)
    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

/// Percentile (0-100) of a Z-score
#[must_use]
pub fn z_to_percentile(z: f64) -> f64 {
    (100.0 * normal_cdf(z)).clamp(0.0, 100.0)
}

/// Z-score of a percentile (0-100).
///
/// The input is clamped into `[MIN_PERCENTILE, MAX_PERCENTILE]`; NaN maps to
/// the median.
#[must_use]
pub fn percentile_to_z(percentile: f64) -> f64 {
    if percentile.is_nan() {
        return 0.0;
    }
    let p = percentile.clamp(MIN_PERCENTILE, MAX_PERCENTILE);
    normal_quantile(p / 100.0)
}

/// Round a percentile for display (1 decimal)
#[must_use]
pub fn round_percentile(percentile: f64) -> f64 {
    (percentile * 10.0).round() / 10.0
}

/// Round a Z-score for display (2 decimals)
#[must_use]
pub fn round_z_score(z: f64) -> f64 {
    (z * 100.0).round() / 100.0
}
