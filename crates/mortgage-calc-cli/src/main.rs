mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::calculate::CalculateArgs;
use commands::session::SessionArgs;
use mortgage_calc_core::config::CalculatorConfig;

/// Mortgage payment calculator
#[derive(Parser)]
#[command(
    name = "mortcalc",
    version,
    about = "Mortgage payment calculator",
    long_about = "Computes the monthly payment, total paid and interest paid for a \
                  fixed-rate mortgage from a loan amount, a term in years and an \
                  interest code (annual rate in percent times 20). Edits can be \
                  replayed as a session, recomputing after every change."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// TOML file with starting values under [defaults]
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log recomputation passes to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute payment figures for one set of inputs
    Calculate(CalculateArgs),
    /// Replay field edits, recomputing after each one
    Session(SessionArgs),
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

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(mortgage_calc_core::config::load_config(p)?),
        None => Ok(CalculatorConfig::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args, &config),
        Commands::Session(args) => commands::session::run_session(args, &config),
        Commands::Version => {
            println!("mortcalc {}", env!("CARGO_PKG_VERSION"));
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
