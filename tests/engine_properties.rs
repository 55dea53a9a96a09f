//! Behavioural properties of the growth engine against the embedded tables.
//!
//! These run every metric and sex through the public API and check the
//! relationships that must hold regardless of the exact reference values.

use growth_percentile::{
    EngineConfig, GrowthEngine, Measurement, Metric, ReferenceTables, Sex, StandardResolver,
};

const SEXES: [Sex; 2] = [Sex::Male, Sex::Female];
const AGES: [f64; 8] = [0.0, 0.5, 3.0, 11.25, 24.0, 30.7, 47.9, 60.0];

fn engine() -> GrowthEngine<'static> {
    GrowthEngine::new(
        ReferenceTables::shared().expect("embedded tables load"),
        EngineConfig::default(),
    )
}

#[test]
fn test_percentile_round_trip() {
    let e = engine();
    for metric in Metric::ALL {
        for sex in SEXES {
            for age in AGES {
                for p in (3..=97).step_by(2) {
                    let p = f64::from(p);
                    let value = e.value_at_percentile(metric, sex, age, p).unwrap();
                    let back = e.percentile_from_value(metric, sex, age, value).unwrap();
                    assert!(
                        (back - p).abs() <= 0.5,
                        "{metric}/{sex} at {age}: P{p} -> {value} -> P{back}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_percentile_is_monotonic_in_value() {
    let e = engine();
    for metric in Metric::ALL {
        for sex in SEXES {
            let median = e.value_at_percentile(metric, sex, 18.0, 50.0).unwrap();
            let mut last = -1.0;
            for step in 0..=40 {
                let value = median * (0.6 + f64::from(step) * 0.02);
                let p = e.percentile_from_value(metric, sex, 18.0, value).unwrap();
                assert!(p >= last, "{metric}/{sex}: {value} gave P{p} after P{last}");
                last = p;
            }
        }
    }
}

#[test]
fn test_value_is_monotonic_in_percentile() {
    let e = engine();
    for metric in Metric::ALL {
        for sex in SEXES {
            let mut last = 0.0;
            for p in [0.5, 3.0, 10.0, 25.0, 50.0, 75.0, 90.0, 97.0, 99.5] {
                let value = e.value_at_percentile(metric, sex, 36.0, p).unwrap();
                assert!(value > last);
                last = value;
            }
        }
    }
}

#[test]
fn test_z_scores_are_symmetric_about_median() {
    let e = engine();
    for metric in Metric::ALL {
        for sex in SEXES {
            let low = e.value_at_percentile(metric, sex, 12.0, 16.0).unwrap();
            let high = e.value_at_percentile(metric, sex, 12.0, 84.0).unwrap();
            let z_low = e.zscore_from_value(metric, sex, 12.0, low).unwrap();
            let z_high = e.zscore_from_value(metric, sex, 12.0, high).unwrap();
            assert!((z_low + z_high).abs() <= 0.011, "{z_low} vs {z_high}");
        }
    }
}

#[test]
fn test_fractional_age_is_between_neighbours() {
    let resolver = StandardResolver::new(ReferenceTables::shared().unwrap());
    for metric in Metric::ALL {
        for sex in SEXES {
            for month in 0..60 {
                let lo = resolver.resolve(metric, sex, f64::from(month)).unwrap();
                let hi = resolver.resolve(metric, sex, f64::from(month + 1)).unwrap();
                let mid = resolver.resolve(metric, sex, f64::from(month) + 0.4).unwrap();

                let (min, max) = if lo.m <= hi.m { (lo.m, hi.m) } else { (hi.m, lo.m) };
                assert!(mid.m >= min && mid.m <= max);
                assert!(mid.p3 <= mid.p50 && mid.p50 <= mid.p97);
            }
        }
    }
}

#[test]
fn test_ages_outside_table_use_boundary_row() {
    let e = engine();
    for metric in Metric::ALL {
        for sex in SEXES {
            assert_eq!(
                e.lms(metric, sex, -5.0).unwrap().m,
                e.lms(metric, sex, 0.0).unwrap().m
            );
            assert_eq!(
                e.lms(metric, sex, 240.0).unwrap().m,
                e.lms(metric, sex, 60.0).unwrap().m
            );
        }
    }
}

#[test]
fn test_degenerate_measurements() {
    let e = engine();
    for bad in [0.0, -3.5, f64::NAN, f64::INFINITY] {
        let a = e
            .assess(Metric::Weight, Sex::Female, Measurement::new(12.0, bad))
            .unwrap();
        assert!((a.z_score + 6.0).abs() < f64::EPSILON);
        assert!(a.percentile.abs() < f64::EPSILON);
    }
}

#[test]
fn test_extreme_percentiles_stay_finite() {
    let e = engine();
    for p in [0.0, 100.0, -10.0, 150.0] {
        let v = e.value_at_percentile(Metric::Height, Sex::Male, 24.0, p).unwrap();
        assert!(v.is_finite() && v > 0.0);
    }
}

#[test]
fn test_reference_fixture_at_two_years() {
    let e = engine();
    let tables = ReferenceTables::shared().unwrap();
    let row = *tables
        .get(Metric::Height, Sex::Male)
        .unwrap()
        .row(24)
        .unwrap();

    let at_median = e
        .percentile_from_value(Metric::Height, Sex::Male, 24.0, row.m)
        .unwrap();
    assert!((at_median - 50.0).abs() <= 0.1);

    let at_p97 = e
        .percentile_from_value(Metric::Height, Sex::Male, 24.0, row.p97)
        .unwrap();
    assert!((at_p97 - 97.0).abs() <= 0.5);

    let at_p3 = e
        .percentile_from_value(Metric::Height, Sex::Male, 24.0, row.p3)
        .unwrap();
    assert!((at_p3 - 3.0).abs() <= 0.5);
}

#[test]
fn test_series_spans_birth_to_horizon() {
    let e = engine();
    for current in [0.0, 7.4, 30.0, 55.5, 59.0] {
        let points = e
            .build_chart_series(Metric::Height, Sex::Female, current, 50.0, &[])
            .unwrap();

        let horizon = current.ceil() as u32 + 12;
        let last = points.last().unwrap().age_months;
        assert!(last >= 60 && last >= horizon);
        assert_eq!(points.len() as u32, last + 1);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.age_months as usize, i);
            assert!(p.p3 < p.p50 && p.p50 < p.p97);
        }
    }
}

#[test]
fn test_series_places_history_and_projections() {
    let e = engine();
    let history = vec![
        Measurement::new(2.2, 5.9),
        Measurement::new(6.0, 7.8),
        Measurement::new(6.4, 8.0),
        Measurement::new(80.0, 20.0),
    ];
    let points = e
        .build_chart_series(Metric::Weight, Sex::Male, 10.6, 50.0, &history)
        .unwrap();

    assert_eq!(points[2].patient, Some(5.9));
    // Both 6.0 and 6.4 round to month 6; the later one wins
    assert_eq!(points[6].patient, Some(8.0));
    // Beyond the series is dropped
    assert!(points.iter().all(|p| p.patient != Some(20.0)));

    let projected: Vec<u32> = points
        .iter()
        .filter(|p| p.predicted.is_some())
        .map(|p| p.age_months)
        .collect();
    assert_eq!(projected, vec![14, 17, 23]);

    // At P50 the projection is the median at that month
    let p17 = points[17];
    assert!((p17.predicted.unwrap() - p17.p50).abs() < 0.01);
}
