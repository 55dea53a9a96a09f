//! Series command - chart data combining reference band, history and projections.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{EngineArgs, OutputFormat};
use crate::core::measurement::Measurement;
use crate::core::types::Metric;
use crate::engine::growth::GrowthEngine;
use crate::parsing::history::{parse_history_file, parse_point};
use crate::utils::validation::{validate_finite, validate_history_len, validate_percentile};

#[derive(Args)]
pub struct SeriesArgs {
    /// Measurement type (height or weight)
    #[arg(short, long)]
    pub metric: Metric,

    /// Sex (male/female, m/f, 1/2); falls back to --default-sex when omitted
    #[arg(short, long)]
    pub sex: Option<String>,

    /// Current age in months
    #[arg(short, long, required = true, allow_hyphen_values = true)]
    pub age: f64,

    /// Percentile the projections follow (0-100)
    #[arg(short, long, default_value = "50")]
    pub percentile: f64,

    /// Observed history file: age_months and value columns (TSV, or CSV by extension)
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Observed point as AGE:VALUE; may be repeated
    #[arg(long = "point")]
    pub points: Vec<String>,
}

/// Execute the series command
///
/// # Errors
///
/// Returns an error if the tables or history cannot be loaded, inputs are
/// invalid, or there is no reference data for the request.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: SeriesArgs,
    engine_args: &EngineArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let tables = engine_args.load_tables()?;
    let engine = GrowthEngine::new(&tables, engine_args.config());

    let sex = engine.sex(args.sex.as_deref())?;
    let age_months = validate_finite("age", args.age)?;
    let percentile = validate_percentile(args.percentile)?;

    let mut history = match &args.history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };
    for point in &args.points {
        history.push(parse_point(point)?);
    }
    validate_history_len(history.len())?;

    if verbose {
        eprintln!("Loaded {} observed measurements", history.len());
    }

    let points = engine.build_chart_series(args.metric, sex, age_months, percentile, &history)?;

    let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));

    match format {
        OutputFormat::Text => {
            println!(
                "\n{} ({}) chart, current age {:.1} months, projecting P{}",
                super::percentile::capitalize(&args.metric.to_string()),
                sex,
                age_months,
                percentile
            );
            println!(
                "\n{:>6} {:>9} {:>9} {:>9} {:>9} {:>9}",
                "Month", "P3", "P50", "P97", "Patient", "Predicted"
            );
            println!("{}", "-".repeat(57));
            for p in &points {
                println!(
                    "{:>6} {:>9.2} {:>9.2} {:>9.2} {:>9} {:>9}",
                    p.age_months,
                    p.p3,
                    p.p50,
                    p.p97,
                    fmt_opt(p.patient),
                    fmt_opt(p.predicted)
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "metric": args.metric,
                "sex": sex,
                "current_age_months": age_months,
                "percentile": percentile,
                "unit": args.metric.unit(),
                "points": points,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("age_months\tp3\tp50\tp97\tpatient\tpredicted");
            for p in &points {
                println!(
                    "{}\t{:.4}\t{:.4}\t{:.4}\t{}\t{}",
                    p.age_months,
                    p.p3,
                    p.p50,
                    p.p97,
                    p.patient.map(|v| v.to_string()).unwrap_or_default(),
                    p.predicted.map(|v| format!("{v:.4}")).unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}

fn load_history(path: &Path) -> anyhow::Result<Vec<Measurement>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let delimiter = if is_csv { ',' } else { '\t' };
    Ok(parse_history_file(path, delimiter)?)
}
