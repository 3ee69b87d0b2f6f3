mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::depreciation::{CompareArgs, DepreciationArgs};
use commands::valuation::{DdmArgs, FcfeArgs, FcffArgs, ValueArgs};

/// Equity valuation and depreciation-impact calculations
#[derive(Parser)]
#[command(
    name = "evt",
    version,
    about = "Equity valuation and depreciation-impact calculations",
    long_about = "A CLI for equity valuation with decimal precision. Supports the \
                  Dividend Discount Model, FCFE and FCFF per-share values, and \
                  six-year EPS / cash-flow projections under MACRS or straight-line \
                  depreciation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Dividend Discount Model value per share
    Ddm(DdmArgs),
    /// Free Cash Flow to Equity value per share
    Fcfe(FcfeArgs),
    /// Free Cash Flow to the Firm value per share
    Fcff(FcffArgs),
    /// Value equity with DDM, FCFE and FCFF side by side
    Value(ValueArgs),
    /// Project EPS and cash flow per share under a depreciation method
    Depreciation(DepreciationArgs),
    /// Compare every depreciation method under the same assumptions
    CompareDepreciation(CompareArgs),
    /// List the named depreciation schedules
    Schedules,
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

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Ddm(args) => commands::valuation::run_ddm(args),
        Commands::Fcfe(args) => commands::valuation::run_fcfe(args),
        Commands::Fcff(args) => commands::valuation::run_fcff(args),
        Commands::Value(args) => commands::valuation::run_value(args),
        Commands::Depreciation(args) => commands::depreciation::run_depreciation(args),
        Commands::CompareDepreciation(args) => commands::depreciation::run_compare(args),
        Commands::Schedules => commands::depreciation::run_schedules(),
        Commands::Version => {
            println!("evt {}", env!("CARGO_PKG_VERSION"));
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
