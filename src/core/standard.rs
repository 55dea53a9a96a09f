use serde::{Deserialize, Serialize};

/// One row of a growth reference table
///
/// The sex and metric are properties of the owning [`ReferenceTable`](crate::catalog::store::ReferenceTable),
/// so a row only carries the month it describes and its distribution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthStandard {
    /// Completed months of age (0-based, contiguous within a table)
    pub age_months: u32,

    /// Box-Cox power (skewness)
    pub l: f64,

    /// Median
    pub m: f64,

    /// Coefficient of variation
    pub s: f64,

    /// 3rd percentile, informational
    pub p3: f64,

    /// 50th percentile, informational
    pub p50: f64,

    /// 97th percentile, informational
    pub p97: f64,
}

impl GrowthStandard {
    /// True if the row can be used by the LMS transform (`M > 0`, `S > 0`,
    /// every field finite)
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        [self.l, self.m, self.s, self.p3, self.p50, self.p97]
            .iter()
            .all(|v| v.is_finite())
            && self.m > 0.0
            && self.s > 0.0
    }
}

/// LMS parameters resolved at a (possibly fractional) age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsParams {
    /// Age the parameters were resolved at, after clamping
    pub age_months: f64,
    pub l: f64,
    pub m: f64,
    pub s: f64,
    pub p3: f64,
    pub p50: f64,
    pub p97: f64,
}

impl LmsParams {
    /// Linear interpolation between two rows; `t` is the weight of `upper`
    #[must_use]
    pub fn interpolate(lower: &GrowthStandard, upper: &GrowthStandard, t: f64) -> Self {
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self {
            age_months: lerp(f64::from(lower.age_months), f64::from(upper.age_months)),
            l: lerp(lower.l, upper.l),
            m: lerp(lower.m, upper.m),
            s: lerp(lower.s, upper.s),
            p3: lerp(lower.p3, upper.p3),
            p50: lerp(lower.p50, upper.p50),
            p97: lerp(lower.p97, upper.p97),
        }
    }
}

impl From<&GrowthStandard> for LmsParams {
    fn from(row: &GrowthStandard) -> Self {
        Self {
            age_months: f64::from(row.age_months),
            l: row.l,
            m: row.m,
            s: row.s,
            p3: row.p3,
            p50: row.p50,
            p97: row.p97,
        }
    }
}
