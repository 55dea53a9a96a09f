use crate::catalog::store::{ReferenceTable, ReferenceTables};
use crate::core::standard::LmsParams;
use crate::core::types::{Metric, Sex};

/// Convert a clamped, non-negative age to a table index
#[inline]
fn month_index(age_months: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        age_months as u32
    }
}

/// Looks up LMS parameters at fractional ages
#[derive(Debug, Clone, Copy)]
pub struct StandardResolver<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> StandardResolver<'a> {
    #[must_use]
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Oldest month covered for (metric, sex), if there is a table
    #[must_use]
    pub fn max_age(&self, metric: Metric, sex: Sex) -> Option<u32> {
        self.tables
            .get(metric, sex)
            .filter(|t| !t.is_empty())
            .map(ReferenceTable::max_age)
    }

    /// Resolve parameters at `age_months`.
    ///
    /// Ages are clamped into `[0, max_age]` (NaN is treated as 0), so ages
    /// outside the table reuse the boundary row unchanged. Integer ages return
    /// their row directly; fractional ages interpolate every field linearly
    /// between the neighbouring months.
    ///
    /// Returns `None` only when there is no table for (metric, sex).
    #[must_use]
    pub fn resolve(&self, metric: Metric, sex: Sex, age_months: f64) -> Option<LmsParams> {
        let table = self.tables.get(metric, sex)?;
        if table.is_empty() {
            return None;
        }

        let max = f64::from(table.max_age());
        let age = if age_months.is_nan() {
            0.0
        } else {
            age_months.clamp(0.0, max)
        };

        let floor = age.floor();
        let lower = table.row(month_index(floor))?;

        let t = age - floor;
        if t == 0.0 {
            return Some(LmsParams::from(lower));
        }

        let upper = table.row(month_index(age.ceil()))?;
        Some(LmsParams::interpolate(lower, upper, t))
    }
}
