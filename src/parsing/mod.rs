//! Parsers for caller-supplied measurement histories.
//!
//! A history is a two-column table of `age_months` and value, tab- or
//! comma-separated, with an optional header row and `#` comments:
//!
//! ```text
//! # clinic visits
//! age_months	value
//! 0.0	3.4
//! 6.2	7.9
//! 12.1	9.7
//! ```
//!
//! Single points can also be given as `AGE:VALUE` on the command line.

pub mod history;
