//! Value command - expected measurement at target percentiles.

use clap::Args;

use crate::cli::{EngineArgs, OutputFormat, SubjectArgs};
use crate::engine::growth::GrowthEngine;
use crate::utils::validation::validate_percentile;

#[derive(Args)]
pub struct ValueArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,

    /// Target percentile (0-100); may be given more than once
    #[arg(short, long = "percentile", required = true, num_args = 1..)]
    pub percentiles: Vec<f64>,
}

/// Execute the value command
///
/// # Errors
///
/// Returns an error if the tables cannot be loaded, inputs are invalid, or there
/// is no reference data for the request.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: ValueArgs,
    engine_args: &EngineArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let tables = engine_args.load_tables()?;
    let engine = GrowthEngine::new(&tables, engine_args.config());

    let metric = args.subject.metric;
    let sex = engine.sex(args.subject.sex.as_deref())?;
    let age_months = args.subject.age_months()?;

    let mut rows = Vec::with_capacity(args.percentiles.len());
    for &p in &args.percentiles {
        let p = validate_percentile(p)?;
        rows.push((p, engine.value_at_percentile(metric, sex, age_months, p)?));
    }

    if verbose {
        eprintln!(
            "Resolved {} values for {}/{} at {:.2} months",
            rows.len(),
            metric,
            sex,
            age_months
        );
    }

    match format {
        OutputFormat::Text => {
            println!(
                "\n{} ({}) at {:.1} months:",
                super::percentile::capitalize(&metric.to_string()),
                sex,
                age_months
            );
            for (p, value) in &rows {
                println!("   P{:<6} {:>8.2} {}", p, value, metric.unit());
            }
        }
        OutputFormat::Json => {
            let values: Vec<serde_json::Value> = rows
                .iter()
                .map(|(p, value)| serde_json::json!({"percentile": p, "value": value}))
                .collect();
            let output = serde_json::json!({
                "metric": metric,
                "sex": sex,
                "age_months": age_months,
                "unit": metric.unit(),
                "values": values,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("percentile\tvalue");
            for (p, value) in &rows {
                println!("{p}\t{value:.4}");
            }
        }
    }

    Ok(())
}
