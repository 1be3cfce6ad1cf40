mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use commands::monthly::MonthlyArgs;
use input::layers::{LayerArgs, ParamArgs};

/// Mortgage amortization and own-versus-rent projections
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage amortization tools",
    long_about = "Computes level-payment mortgage schedules and projects the yearly \
                  economics of renting out the property: interest, principal, tax, \
                  carrying costs, rent, profit, cash flow and equity. Parameters are \
                  layered from global, area and specific JSON files, piped stdin and flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    layers: LayerArgs,

    #[command(flatten)]
    params: ParamArgs,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate, APY and payment summary for the loan
    Summary,
    /// Year-by-year ownership schedule (default)
    Schedule,
    /// Month-by-month amortization table
    Monthly(MonthlyArgs),
    /// Print the merged, validated parameter set
    Config,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let log_format = std::env::var("MORTGAGE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let params = || input::layers::resolve(&cli.layers, &cli.params);
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> =
        match cli.command.unwrap_or(Commands::Schedule) {
            Commands::Summary => params().and_then(|p| commands::summary::run_summary(&p)),
            Commands::Schedule => params().and_then(|p| commands::schedule::run_schedule(&p)),
            Commands::Monthly(args) => {
                params().and_then(|p| commands::monthly::run_monthly(&p, args))
            }
            Commands::Config => params().and_then(|p| commands::config::run_config(&p)),
            Commands::Version => {
                println!("mortgage {}", env!("CARGO_PKG_VERSION"));
                return;
            }
        };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
