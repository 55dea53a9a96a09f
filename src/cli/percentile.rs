//! Percentile command - place one measurement within the reference distribution.

use clap::Args;

use crate::cli::{EngineArgs, OutputFormat, SubjectArgs};
use crate::core::measurement::{Assessment, Measurement};
use crate::core::types::{Metric, Sex};
use crate::engine::growth::GrowthEngine;
use crate::utils::validation::validate_finite;

#[derive(Args)]
pub struct PercentileArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,

    /// Measured value (cm for height, kg for weight)
    #[arg(long, required = true, allow_hyphen_values = true)]
    pub value: f64,
}

/// Execute the percentile command
///
/// # Errors
///
/// Returns an error if the tables cannot be loaded, inputs are invalid, or there
/// is no reference data for the request.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: PercentileArgs,
    engine_args: &EngineArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let tables = engine_args.load_tables()?;
    let engine = GrowthEngine::new(&tables, engine_args.config());

    let metric = args.subject.metric;
    let sex = engine.sex(args.subject.sex.as_deref())?;
    let age_months = args.subject.age_months()?;
    let value = validate_finite("value", args.value)?;

    if verbose {
        let lms = engine.lms(metric, sex, age_months)?;
        eprintln!(
            "LMS at {:.2} months: L={:.4} M={:.4} S={:.5}",
            lms.age_months, lms.l, lms.m, lms.s
        );
    }

    let assessment = engine.assess(metric, sex, Measurement::new(age_months, value))?;

    match format {
        OutputFormat::Text => print_text(metric, sex, &assessment),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "metric": metric,
                "sex": sex,
                "age_months": assessment.age_months,
                "value": assessment.value,
                "unit": metric.unit(),
                "z_score": assessment.z_score,
                "percentile": assessment.percentile,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("metric\tsex\tage_months\tvalue\tz_score\tpercentile");
            println!(
                "{}\t{}\t{:.2}\t{}\t{:.2}\t{:.1}",
                metric,
                sex,
                assessment.age_months,
                assessment.value,
                assessment.z_score,
                assessment.percentile
            );
        }
    }

    Ok(())
}

fn print_text(metric: Metric, sex: Sex, assessment: &Assessment) {
    println!(
        "\n{} ({}) at {:.1} months: {} {}",
        capitalize(&metric.to_string()),
        sex,
        assessment.age_months,
        assessment.value,
        metric.unit()
    );
    println!("   Percentile: {:.1}", assessment.percentile);
    println!("   Z-score:    {:.2}", assessment.z_score);
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
