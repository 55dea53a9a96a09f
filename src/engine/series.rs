//! Age series for growth charts.
//!
//! A series covers every integer month from birth to at least a year past the
//! child's current age. Each point carries the reference band (p3/p50/p97), the
//! observed value whose age rounds to that month, and at 3, 6 and 12 months
//! ahead of the current age a projection at the requested percentile.

use crate::core::measurement::{ChartPoint, Measurement};
use crate::core::types::{Metric, Sex};
use crate::engine::percentile::percentile_to_z;
use crate::engine::resolver::StandardResolver;
use crate::engine::zscore::z_to_value;

/// Months past the current age that receive a projected value
pub const PROJECTION_OFFSETS: [f64; 3] = [3.0, 6.0, 12.0];

/// The series always extends at least this far past the current age
pub const PROJECTION_HORIZON_MONTHS: u32 = 12;

/// Current ages above this are treated as this value when sizing a series
pub const MAX_CURRENT_AGE_MONTHS: f64 = 600.0;

/// Round a bounded, non-negative age to its month
#[inline]
fn nearest_month(age_months: f64) -> Option<u32> {
    if !age_months.is_finite() {
        return None;
    }
    let rounded = age_months.round();
    if rounded < 0.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        Some(rounded as u32)
    }
}

/// Build the chart series for one child.
///
/// Returns `None` when there is no reference table for (metric, sex).
#[must_use]
pub fn build_series(
    resolver: &StandardResolver<'_>,
    metric: Metric,
    sex: Sex,
    current_age_months: f64,
    target_percentile: f64,
    observed: &[Measurement],
) -> Option<Vec<ChartPoint>> {
    let table_max = resolver.max_age(metric, sex)?;

    let current = if current_age_months.is_nan() {
        0.0
    } else {
        current_age_months.clamp(0.0, MAX_CURRENT_AGE_MONTHS)
    };

    let horizon = nearest_month(current.ceil()).unwrap_or(0) + PROJECTION_HORIZON_MONTHS;
    let last_month = table_max.max(horizon);

    let target_z = percentile_to_z(target_percentile);
    let projection_months: Vec<u32> = PROJECTION_OFFSETS
        .iter()
        .filter_map(|offset| nearest_month(current + offset))
        .collect();

    let mut points = Vec::with_capacity(last_month as usize + 1);
    for month in 0..=last_month {
        let band = resolver.resolve(metric, sex, f64::from(month))?;

        let predicted = projection_months
            .contains(&month)
            .then(|| z_to_value(target_z, &band));

        points.push(ChartPoint {
            age_months: month,
            p3: band.p3,
            p50: band.p50,
            p97: band.p97,
            patient: None,
            predicted,
        });
    }

    // Callers pass history in chronological order, so later entries win
    for m in observed {
        if !m.value.is_finite() {
            continue;
        }
        if let Some(point) = nearest_month(m.age_months)
            .and_then(|month| usize::try_from(month).ok())
            .and_then(|idx| points.get_mut(idx))
        {
            point.patient = Some(m.value);
        }
    }

    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::ReferenceTables;
    use crate::engine::zscore::value_to_z;

    fn resolver() -> StandardResolver<'static> {
        StandardResolver::new(ReferenceTables::shared().unwrap())
    }

    #[test]
    fn test_series_covers_table_without_gaps() {
        let points = build_series(&resolver(), Metric::Height, Sex::Male, 30.0, 50.0, &[]).unwrap();

        // Table runs to 60 months, which is past 30 + 12
        assert_eq!(points.len(), 61);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.age_months as usize, i);
        }
    }

    #[test]
    fn test_series_extends_past_table() {
        let points = build_series(&resolver(), Metric::Weight, Sex::Female, 58.3, 50.0, &[]).unwrap();

        // ceil(58.3) + 12 = 71
        assert_eq!(points.last().unwrap().age_months, 71);

        // Beyond the table the band stays at the last row
        let at_max = points[60];
        let beyond = points[71];
        assert!((at_max.p50 - beyond.p50).abs() < f64::EPSILON);
        assert!((at_max.p97 - beyond.p97).abs() < f64::EPSILON);
    }

    #[test]
    fn test_projections_only_at_offsets() {
        let points = build_series(&resolver(), Metric::Height, Sex::Female, 24.0, 75.0, &[]).unwrap();

        let projected: Vec<u32> = points
            .iter()
            .filter(|p| p.predicted.is_some())
            .map(|p| p.age_months)
            .collect();
        assert_eq!(projected, vec![27, 30, 36]);

        // Each projection sits on the 75th percentile curve at its month
        let r = resolver();
        for month in projected {
            let point = points[month as usize];
            let lms = r.resolve(Metric::Height, Sex::Female, f64::from(month)).unwrap();
            let z = value_to_z(point.predicted.unwrap(), &lms);
            assert!((z - percentile_to_z(75.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fractional_current_age_rounds_projection_months() {
        let points = build_series(&resolver(), Metric::Weight, Sex::Male, 10.6, 50.0, &[]).unwrap();
        let projected: Vec<u32> = points
            .iter()
            .filter(|p| p.predicted.is_some())
            .map(|p| p.age_months)
            .collect();
        assert_eq!(projected, vec![14, 17, 23]);
    }

    #[test]
    fn test_observed_values_kept_apart_from_band() {
        let history = [
            Measurement::new(0.2, 3.4),
            Measurement::new(5.6, 7.9),
            Measurement::new(6.4, 8.1),
            Measurement::new(12.0, f64::NAN),
        ];
        let points =
            build_series(&resolver(), Metric::Weight, Sex::Male, 12.0, 50.0, &history).unwrap();

        assert_eq!(points[0].patient, Some(3.4));
        // 5.6 and 6.4 both round to month 6; the later entry wins
        assert_eq!(points[6].patient, Some(8.1));
        assert!(points[12].patient.is_none());
        assert_eq!(points.iter().filter(|p| p.patient.is_some()).count(), 2);

        let lms = resolver().resolve(Metric::Weight, Sex::Male, 6.0).unwrap();
        assert!((points[6].p50 - lms.p50).abs() < f64::EPSILON);
    }

    #[test]
    fn test_observed_outside_domain_ignored() {
        let history = [Measurement::new(-3.0, 3.0), Measurement::new(500.0, 30.0)];
        let points =
            build_series(&resolver(), Metric::Weight, Sex::Male, 12.0, 50.0, &history).unwrap();
        assert!(points.iter().all(|p| p.patient.is_none()));
    }

    #[test]
    fn test_absurd_current_age_is_bounded() {
        let points =
            build_series(&resolver(), Metric::Height, Sex::Male, 1e12, 50.0, &[]).unwrap();
        assert_eq!(points.len(), 600 + 12 + 1);
    }

    #[test]
    fn test_missing_table_is_none() {
        let tables = ReferenceTables::new();
        let r = StandardResolver::new(&tables);
        assert!(build_series(&r, Metric::Height, Sex::Male, 12.0, 50.0, &[]).is_none());
    }
}
