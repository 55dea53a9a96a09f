//! Centralized validation for caller-supplied numbers.
//!
//! The engine itself never rejects a number: it clamps ages and maps bad values
//! to sentinels. These checks are for the outer surfaces (CLI and HTTP), where a
//! malformed request should be reported instead of silently clamped.

/// Maximum number of observed measurements accepted in one request (DOS protection)
pub const MAX_HISTORY_POINTS: usize = 10_000;

/// Input validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{field}' must be a finite number")]
    NonFinite { field: &'static str },

    #[error("Percentile {0} is outside 0-100")]
    PercentileOutOfRange(f64),

    #[error("Too many measurements: {0} exceeds maximum of {MAX_HISTORY_POINTS}")]
    TooManyMeasurements(usize),
}

/// Require a finite number
///
/// # Errors
///
/// Returns `ValidationError::NonFinite` for NaN or infinite input.
pub fn validate_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

/// Require a finite percentile in `[0, 100]`
///
/// # Examples
///
/// ```
/// use growth_percentile::utils::validation::validate_percentile;
///
/// assert!(validate_percentile(97.0).is_ok());
/// assert!(validate_percentile(120.0).is_err());
/// assert!(validate_percentile(f64::NAN).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::NonFinite` or `ValidationError::PercentileOutOfRange`.
pub fn validate_percentile(percentile: f64) -> Result<f64, ValidationError> {
    let p = validate_finite("percentile", percentile)?;
    if (0.0..=100.0).contains(&p) {
        Ok(p)
    } else {
        Err(ValidationError::PercentileOutOfRange(p))
    }
}

/// Whether a history already holding `count` measurements is full.
///
/// Call this with the current count BEFORE adding a new measurement.
#[must_use]
pub fn history_limit_reached(count: usize) -> bool {
    count >= MAX_HISTORY_POINTS
}

/// Check a complete history length
///
/// # Errors
///
/// Returns `ValidationError::TooManyMeasurements` if `count` exceeds the limit.
pub fn validate_history_len(count: usize) -> Result<(), ValidationError> {
    if count > MAX_HISTORY_POINTS {
        Err(ValidationError::TooManyMeasurements(count))
    } else {
        Ok(())
    }
}
