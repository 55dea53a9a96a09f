use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::store::ReferenceTables;
use crate::core::measurement::{Assessment, ChartPoint, Measurement};
use crate::core::standard::LmsParams;
use crate::core::types::{AgePolicy, CodeError, Metric, Sex, SexDefault};
use crate::engine::percentile::{
    percentile_to_z, round_percentile, round_z_score, z_to_percentile,
};
use crate::engine::resolver::StandardResolver;
use crate::engine::series::build_series;
use crate::engine::zscore::{value_to_z, z_to_value};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("No reference data for {metric}/{sex}")]
    NoReferenceData { metric: Metric, sex: Sex },

    #[error("Age {age} months is outside the reference range 0-{max} months")]
    AgeOutOfRange { age: f64, max: u32 },

    #[error(transparent)]
    InvalidCode(#[from] CodeError),
}

/// Policies applied by [`GrowthEngine`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Table used when the caller leaves sex blank
    pub sex_default: SexDefault,
    /// Treatment of ages outside a table's range
    pub age_policy: AgePolicy,
}

/// Entry point for percentile lookups against a set of reference tables
#[derive(Debug, Clone, Copy)]
pub struct GrowthEngine<'a> {
    resolver: StandardResolver<'a>,
    config: EngineConfig,
}

impl<'a> GrowthEngine<'a> {
    #[must_use]
    pub fn new(tables: &'a ReferenceTables, config: EngineConfig) -> Self {
        Self {
            resolver: StandardResolver::new(tables),
            config,
        }
    }

    /// Resolve a raw sex input using the configured default
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidCode` for unknown codes, or for blank input
    /// when the default is [`SexDefault::Reject`].
    pub fn sex(&self, raw: Option<&str>) -> Result<Sex, EngineError> {
        Ok(Sex::normalize(raw, self.config.sex_default)?)
    }

    /// LMS parameters at `age_months`, applying the age policy
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoReferenceData` if there is no table, or
    /// `EngineError::AgeOutOfRange` under [`AgePolicy::Reject`].
    pub fn lms(&self, metric: Metric, sex: Sex, age_months: f64) -> Result<LmsParams, EngineError> {
        let max = self
            .resolver
            .max_age(metric, sex)
            .ok_or(EngineError::NoReferenceData { metric, sex })?;

        let in_range = (0.0..=f64::from(max)).contains(&age_months);
        if !in_range {
            match self.config.age_policy {
                AgePolicy::Reject => {
                    return Err(EngineError::AgeOutOfRange {
                        age: age_months,
                        max,
                    })
                }
                AgePolicy::Clamp => {
                    debug!(
                        "Age {} months outside {}/{} range 0-{}, clamping",
                        age_months, metric, sex, max
                    );
                }
            }
        }

        self.resolver
            .resolve(metric, sex, age_months)
            .ok_or(EngineError::NoReferenceData { metric, sex })
    }

    /// Expected value at `percentile` (0-100), at full precision
    ///
    /// # Errors
    ///
    /// See [`GrowthEngine::lms`].
    pub fn value_at_percentile(
        &self,
        metric: Metric,
        sex: Sex,
        age_months: f64,
        percentile: f64,
    ) -> Result<f64, EngineError> {
        let lms = self.lms(metric, sex, age_months)?;
        Ok(z_to_value(percentile_to_z(percentile), &lms))
    }

    /// Percentile of `value`, rounded to 1 decimal
    ///
    /// # Errors
    ///
    /// See [`GrowthEngine::lms`].
    pub fn percentile_from_value(
        &self,
        metric: Metric,
        sex: Sex,
        age_months: f64,
        value: f64,
    ) -> Result<f64, EngineError> {
        let lms = self.lms(metric, sex, age_months)?;
        Ok(round_percentile(z_to_percentile(value_to_z(value, &lms))))
    }

    /// Z-score of `value`, rounded to 2 decimals
    ///
    /// # Errors
    ///
    /// See [`GrowthEngine::lms`].
    pub fn zscore_from_value(
        &self,
        metric: Metric,
        sex: Sex,
        age_months: f64,
        value: f64,
    ) -> Result<f64, EngineError> {
        let lms = self.lms(metric, sex, age_months)?;
        Ok(round_z_score(value_to_z(value, &lms)))
    }

    /// Z-score and percentile of one measurement
    ///
    /// # Errors
    ///
    /// See [`GrowthEngine::lms`].
    pub fn assess(
        &self,
        metric: Metric,
        sex: Sex,
        measurement: Measurement,
    ) -> Result<Assessment, EngineError> {
        let lms = self.lms(metric, sex, measurement.age_months)?;
        let z = value_to_z(measurement.value, &lms);
        Ok(Assessment {
            age_months: measurement.age_months,
            value: measurement.value,
            z_score: round_z_score(z),
            percentile: round_percentile(z_to_percentile(z)),
        })
    }

    /// Chart series from birth to at least 12 months past `current_age_months`.
    ///
    /// The series band is always clamped beyond the table; the age policy
    /// applies to `current_age_months` only.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoReferenceData` if there is no table, or
    /// `EngineError::AgeOutOfRange` for a current age below zero or beyond
    /// the table under [`AgePolicy::Reject`].
    pub fn build_chart_series(
        &self,
        metric: Metric,
        sex: Sex,
        current_age_months: f64,
        percentile: f64,
        history: &[Measurement],
    ) -> Result<Vec<ChartPoint>, EngineError> {
        if self.config.age_policy == AgePolicy::Reject {
            self.lms(metric, sex, current_age_months)?;
        }

        build_series(
            &self.resolver,
            metric,
            sex,
            current_age_months,
            percentile,
            history,
        )
        .ok_or(EngineError::NoReferenceData { metric, sex })
    }
}
