//! Growth reference table storage.
//!
//! A catalog holds one LMS table per (metric, sex) pair. Each table is an array
//! indexed directly by completed month of age, so a fractional age resolves with
//! two O(1) lookups. Tables must start at month 0 and be contiguous; this is
//! checked when a catalog is loaded.
//!
//! ## Embedded Catalog
//!
//! The default catalog covers WHO Child Growth Standards for 0-60 months:
//!
//! - **height**: length/height-for-age, male and female
//! - **weight**: weight-for-age, male and female
//!
//! ## Example
//!
//! ```rust,no_run
//! use growth_percentile::ReferenceTables;
//! use growth_percentile::core::types::{Metric, Sex};
//!
//! let tables = ReferenceTables::shared().unwrap();
//! if let Some(table) = tables.get(Metric::Height, Sex::Female) {
//!     println!("height/female covers 0-{} months", table.max_age());
//! }
//! ```
//!
//! ## Custom Catalogs
//!
//! ```rust,no_run
//! use growth_percentile::ReferenceTables;
//! use std::path::Path;
//!
//! let embedded = ReferenceTables::load_embedded().unwrap();
//! std::fs::write("tables.json", embedded.to_json().unwrap()).unwrap();
//!
//! let custom = ReferenceTables::load_from_file(Path::new("tables.json")).unwrap();
//! ```

pub mod store;
