use clap::Parser;
use tracing_subscriber::EnvFilter;

use growth_percentile::{cli, web};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("growth_percentile=debug,info")
    } else {
        EnvFilter::new("growth_percentile=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Percentile(args) => {
            cli::percentile::run(args, &cli.engine, cli.format, cli.verbose)?;
        }
        cli::Commands::Value(args) => {
            cli::value::run(args, &cli.engine, cli.format, cli.verbose)?;
        }
        cli::Commands::Series(args) => {
            cli::series::run(args, &cli.engine, cli.format, cli.verbose)?;
        }
        cli::Commands::Table(args) => {
            cli::table::run(args, &cli.engine, cli.format, cli.verbose)?;
        }
        cli::Commands::Age(args) => {
            cli::age::run(args, cli.format)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args, &cli.engine)?;
        }
    }

    Ok(())
}
