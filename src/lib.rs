//! # growth-percentile
//!
//! A library for placing a child's height or weight within a pediatric growth
//! reference distribution.
//!
//! Reference tables store, for each sex, metric and whole month of age, the
//! three LMS parameters of Cole's method: a Box-Cox power (L), a median (M) and
//! a coefficient of variation (S). Given those, any measurement maps to a
//! Z-score and percentile, and any percentile maps back to an expected value.
//!
//! ## Features
//!
//! - **Percentiles and Z-scores**: For a single measurement at any age
//! - **Inverse lookup**: Expected value at a target percentile
//! - **Fractional ages**: Parameters are interpolated between monthly rows
//! - **Chart series**: Reference band, observed history and projections
//! - **Custom tables**: Load a replacement catalog from JSON
//!
//! ## Example
//!
//! ```rust
//! use growth_percentile::{EngineConfig, GrowthEngine, Metric, ReferenceTables, Sex};
//!
//! let tables = ReferenceTables::load_embedded().unwrap();
//! let engine = GrowthEngine::new(&tables, EngineConfig::default());
//!
//! let median = engine
//!     .value_at_percentile(Metric::Height, Sex::Female, 18.0, 50.0)
//!     .unwrap();
//! let p = engine
//!     .percentile_from_value(Metric::Height, Sex::Female, 18.0, median)
//!     .unwrap();
//! assert!((p - 50.0).abs() < 0.1);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference table storage and lookup
//! - [`core`]: Core data types for metrics, sexes, LMS rows and measurements
//! - [`engine`]: LMS transform, percentile conversion and chart series
//! - [`parsing`]: Parsers for measurement history files
//! - [`utils`]: Age calculation and input validation
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON HTTP API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod engine;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::{ReferenceTable, ReferenceTables};
pub use core::measurement::{Assessment, ChartPoint, Measurement};
pub use core::standard::{GrowthStandard, LmsParams};
pub use core::types::*;
pub use engine::growth::{EngineConfig, EngineError, GrowthEngine};
pub use engine::resolver::StandardResolver;
