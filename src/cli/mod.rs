//! Command-line interface for growth-percentile.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **percentile**: Percentile and Z-score of a single measurement
//! - **value**: Expected value at one or more percentiles
//! - **series**: Month-by-month chart series with observations and projections
//! - **table**: List, show, or export the reference tables
//! - **age**: Age in months between two dates
//! - **serve**: Start the JSON HTTP API
//!
//! ## Usage
//!
//! ```text
//! # Where does an 11.2 kg, 20-month-old girl sit?
//! growth-percentile percentile --metric weight --sex female --age 20 --value 11.2
//!
//! # Same, from dates
//! growth-percentile percentile --metric weight --sex f --birth-date 2023-02-14 \
//!     --measured-on 2024-10-30 --value 11.2
//!
//! # 3rd/50th/97th percentile heights at 3 years
//! growth-percentile value --metric height --sex male --age 36 -p 3 -p 50 -p 97
//!
//! # Chart data as JSON
//! growth-percentile series --metric height --sex male --age 30 --history visits.tsv --format json
//!
//! # Start the API
//! growth-percentile serve --port 8080
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::store::{CatalogError, ReferenceTables};
use crate::core::types::{AgePolicy, Metric, SexDefault};
use crate::engine::growth::EngineConfig;
use crate::utils::age::{age_in_months, parse_date};
use crate::utils::validation::validate_finite;

pub mod age;
pub mod percentile;
pub mod series;
pub mod table;
pub mod value;

#[derive(Parser)]
#[command(name = "growth-percentile")]
#[command(version)]
#[command(about = "Pediatric growth percentiles from LMS reference tables")]
#[command(
    long_about = "growth-percentile places a child's height or weight within a growth reference distribution.\n\nIt uses Cole's LMS method against WHO reference tables and provides:\n- Percentiles and Z-scores for single measurements\n- Expected values at a target percentile\n- Chart series combining reference bands, observations and projections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Percentile and Z-score of a measurement
    Percentile(percentile::PercentileArgs),

    /// Expected value at the given percentiles
    Value(value::ValueArgs),

    /// Chart series for a child
    Series(series::SeriesArgs),

    /// Inspect the reference tables
    Table(table::TableArgs),

    /// Age in months between two dates
    Age(age::AgeArgs),

    /// Start the web server
    Serve(ServeArgs),
}

/// Options shared by every command that touches the reference tables
#[derive(Args, Clone)]
pub struct EngineArgs {
    /// Path to a custom reference table catalog (JSON)
    #[arg(long, global = true)]
    pub table: Option<PathBuf>,

    /// Reference table used when sex is not given
    #[arg(long, global = true, value_enum, default_value = "male")]
    pub default_sex: SexDefault,

    /// How ages outside a table's range are handled
    #[arg(long, global = true, value_enum, default_value = "clamp")]
    pub age_policy: AgePolicy,
}

impl EngineArgs {
    /// Load the custom catalog if given, otherwise the embedded one
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if the catalog cannot be read or is invalid.
    pub fn load_tables(&self) -> Result<ReferenceTables, CatalogError> {
        if let Some(path) = &self.table {
            ReferenceTables::load_from_file(path)
        } else {
            ReferenceTables::load_embedded()
        }
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            sex_default: self.default_sex,
            age_policy: self.age_policy,
        }
    }
}

/// Who and when: the subject of a lookup
#[derive(Args, Clone)]
pub struct SubjectArgs {
    /// Measurement type (height or weight)
    #[arg(short, long)]
    pub metric: Metric,

    /// Sex (male/female, m/f, 1/2); falls back to --default-sex when omitted
    #[arg(short, long)]
    pub sex: Option<String>,

    /// Age in months
    #[arg(short, long, allow_hyphen_values = true, conflicts_with = "birth_date")]
    pub age: Option<f64>,

    /// Birth date (YYYY-MM-DD), used with --measured-on instead of --age
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Measurement date (YYYY-MM-DD); defaults to today
    #[arg(long, requires = "birth_date")]
    pub measured_on: Option<String>,
}

impl SubjectArgs {
    /// Age in months from --age or from the dates
    ///
    /// # Errors
    ///
    /// Returns an error if neither form is given, a date is invalid, or the age
    /// is not a finite number.
    pub fn age_months(&self) -> anyhow::Result<f64> {
        if let Some(age) = self.age {
            return Ok(validate_finite("age", age)?);
        }

        let birth = self
            .birth_date
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Either --age or --birth-date is required"))?;
        let birth = parse_date(birth)?;
        let measured = match &self.measured_on {
            Some(d) => parse_date(d)?,
            None => chrono::Local::now().date_naive(),
        };

        Ok(age_in_months(birth, measured)?)
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
