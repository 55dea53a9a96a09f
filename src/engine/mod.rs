//! Growth percentile engine.
//!
//! The pipeline runs leaves first:
//!
//! 1. [`resolver`]: LMS parameters at a fractional age, clamped to the table and
//!    linearly interpolated between months
//! 2. [`zscore`]: Cole's LMS power transform between a raw value and a Z-score
//! 3. [`percentile`]: Z-score to/from percentile via normal CDF approximations
//! 4. [`series`]: month-by-month chart series with reference band, observations
//!    and projections
//!
//! [`growth::GrowthEngine`] ties these together behind the operations exposed to
//! callers and applies the configurable sex-default and age policies.
//!
//! ## Degenerate inputs
//!
//! Nothing in the engine panics or returns NaN for expected edge inputs:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | No table for (metric, sex) | `None` / `EngineError::NoReferenceData` |
//! | Age outside table | clamped to boundary row (unless `AgePolicy::Reject`) |
//! | Value <= 0 or non-finite | Z-score `-6` |
//! | `1 + L*S*z <= 0` | value `0` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use growth_percentile::{EngineConfig, GrowthEngine, ReferenceTables};
//! use growth_percentile::core::types::{Metric, Sex};
//!
//! let tables = ReferenceTables::shared().unwrap();
//! let engine = GrowthEngine::new(tables, EngineConfig::default());
//!
//! let p = engine.percentile_from_value(Metric::Height, Sex::Female, 18.5, 81.2).unwrap();
//! let expected = engine.value_at_percentile(Metric::Height, Sex::Female, 18.5, p).unwrap();
//! println!("{p}th percentile, {expected:.1} cm");
//! ```

pub mod growth;
pub mod percentile;
pub mod resolver;
pub mod series;
pub mod zscore;
