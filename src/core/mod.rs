//! Core data types for growth percentile calculations.
//!
//! - [`GrowthStandard`](standard::GrowthStandard): one month of a reference table (L, M, S and
//!   informational p3/p50/p97)
//! - [`LmsParams`](standard::LmsParams): parameters resolved at a fractional age
//! - [`Measurement`](measurement::Measurement), [`ChartPoint`](measurement::ChartPoint),
//!   [`Assessment`](measurement::Assessment): engine inputs and outputs
//! - [`Metric`](types::Metric), [`Sex`](types::Sex), [`SexDefault`](types::SexDefault),
//!   [`AgePolicy`](types::AgePolicy): table keys and policies
//!
//! ## Input codes
//!
//! | Field  | Accepted                                   |
//! |--------|--------------------------------------------|
//! | metric | `height`, `length`, `stature`, `weight`, `mass` |
//! | sex    | `male`/`female`, `m`/`f`, `1`/`2`, `boy`/`girl` |
//!
//! A blank sex resolves through [`SexDefault`](types::SexDefault).

pub mod measurement;
pub mod standard;
pub mod types;
