use clap::Args;

use crate::cli::OutputFormat;
use crate::utils::age::{age_in_months, parse_date};

#[derive(Args)]
pub struct AgeArgs {
    /// Birth date (YYYY-MM-DD)
    #[arg(long, required = true)]
    pub birth_date: String,

    /// Measurement date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub measured_on: Option<String>,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: AgeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let birth = parse_date(&args.birth_date)?;
    let measured = match &args.measured_on {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };

    let months = age_in_months(birth, measured)?;

    match format {
        OutputFormat::Text => println!("{months:.2} months"),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "birth_date": birth,
                "measured_on": measured,
                "age_months": months,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("birth_date\tmeasured_on\tage_months");
            println!("{birth}\t{measured}\t{months:.4}");
        }
    }

    Ok(())
}
