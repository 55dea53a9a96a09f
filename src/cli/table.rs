use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{EngineArgs, OutputFormat};
use crate::core::types::{Metric, Sex};

#[derive(Args)]
pub struct TableArgs {
    #[command(subcommand)]
    pub command: TableCommands,
}

#[derive(Subcommand)]
pub enum TableCommands {
    /// List all reference tables
    List,

    /// Show the rows of one table
    Show {
        /// Measurement type (height or weight)
        #[arg(short, long)]
        metric: Metric,

        /// Sex (male/female, m/f, 1/2)
        #[arg(short, long)]
        sex: Sex,

        /// Show every row instead of the first 25
        #[arg(long)]
        all_rows: bool,
    },

    /// Export the tables to a JSON file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,
    },
}

pub fn run(
    args: TableArgs,
    engine_args: &EngineArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    match args.command {
        TableCommands::List => run_list(engine_args, format, verbose),
        TableCommands::Show {
            metric,
            sex,
            all_rows,
        } => run_show(engine_args, metric, sex, all_rows, format),
        TableCommands::Export { output } => run_export(engine_args, output),
    }
}

fn run_list(engine_args: &EngineArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let tables = engine_args.load_tables()?;

    if verbose {
        eprintln!("Loaded {} reference tables", tables.len());
    }

    match format {
        OutputFormat::Text => {
            println!("Reference Tables ({} tables)", tables.len());
            if let Some(source) = tables.source() {
                println!("Source: {source}");
            }
            println!();
            println!("{:<8} {:<8} {:>6} {:>8}", "Metric", "Sex", "Rows", "Max Age");
            println!("{}", "-".repeat(33));
            for t in tables.iter() {
                println!(
                    "{:<8} {:<8} {:>6} {:>8}",
                    t.metric().to_string(),
                    t.sex().to_string(),
                    t.len(),
                    t.max_age()
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = tables
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "metric": t.metric(),
                        "sex": t.sex(),
                        "rows": t.len(),
                        "max_age_months": t.max_age(),
                        "unit": t.metric().unit(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("metric\tsex\trows\tmax_age_months");
            for t in tables.iter() {
                println!("{}\t{}\t{}\t{}", t.metric(), t.sex(), t.len(), t.max_age());
            }
        }
    }

    Ok(())
}

fn run_show(
    engine_args: &EngineArgs,
    metric: Metric,
    sex: Sex,
    all_rows: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let tables = engine_args.load_tables()?;
    let table = tables
        .get(metric, sex)
        .ok_or_else(|| anyhow::anyhow!("No reference table for {metric}/{sex}"))?;

    match format {
        OutputFormat::Text => {
            println!("Table: {metric}/{sex} ({})\n", metric.unit());
            println!("Rows:    {}", table.len());
            println!("Max age: {} months", table.max_age());

            let rows = table.rows();
            let rows_to_show = if all_rows {
                rows
            } else {
                &rows[..rows.len().min(25)]
            };

            println!(
                "\n{:>5} {:>8} {:>9} {:>8} {:>9} {:>9} {:>9}",
                "Month", "L", "M", "S", "P3", "P50", "P97"
            );
            println!("{}", "-".repeat(63));
            for r in rows_to_show {
                println!(
                    "{:>5} {:>8.4} {:>9.4} {:>8.5} {:>9.3} {:>9.3} {:>9.3}",
                    r.age_months, r.l, r.m, r.s, r.p3, r.p50, r.p97
                );
            }

            if !all_rows && rows.len() > 25 {
                println!(
                    "\n... and {} more rows (use --all-rows to show all)",
                    rows.len() - 25
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        OutputFormat::Tsv => {
            println!("age_months\tl\tm\ts\tp3\tp50\tp97");
            for r in table.rows() {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    r.age_months, r.l, r.m, r.s, r.p3, r.p50, r.p97
                );
            }
        }
    }

    Ok(())
}

fn run_export(engine_args: &EngineArgs, output: PathBuf) -> anyhow::Result<()> {
    let tables = engine_args.load_tables()?;

    let json = tables.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} tables to {}",
        tables.len(),
        output.display()
    );

    Ok(())
}
