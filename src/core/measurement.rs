use serde::{Deserialize, Serialize};

/// A caller-supplied observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Age at measurement, in (fractional) months
    pub age_months: f64,

    /// Observed value in the metric's unit
    pub value: f64,
}

impl Measurement {
    #[must_use]
    pub fn new(age_months: f64, value: f64) -> Self {
        Self { age_months, value }
    }
}

/// One integer month of a renderable growth chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub age_months: u32,

    /// Reference band at this month
    pub p3: f64,
    pub p50: f64,
    pub p97: f64,

    /// Observed value whose age rounds to this month
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<f64>,

    /// Projected value at the target percentile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted: Option<f64>,
}

/// Position of one measurement within the reference distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub age_months: f64,
    pub value: f64,

    /// Z-score rounded to 2 decimals
    pub z_score: f64,

    /// Percentile rounded to 1 decimal
    pub percentile: f64,
}
