//! JSON HTTP API over the growth engine.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! growth-percentile serve
//!
//! # Custom port, female default for blank sex
//! growth-percentile serve --port 3000 --default-sex female
//!
//! # Bind to all interfaces
//! growth-percentile serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /api/percentile?metric=&sex=&age_months=&value=` - Z-score and percentile
//! - `GET /api/value?metric=&sex=&age_months=&percentile=` - Value at a percentile
//! - `POST /api/series` - Chart series (JSON body with history)
//! - `GET /api/age?birth_date=&measured_on=` - Age in months
//! - `GET /api/tables` - List the loaded reference tables

pub mod server;
