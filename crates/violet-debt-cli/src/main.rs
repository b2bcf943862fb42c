mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use commands::payoff::PayoffArgs;
use commands::strategies::{ImpactArgs, PortfolioArgs};

/// Debt payoff planning: avalanche, snowball and custom strategies
#[derive(Parser)]
#[command(
    name = "vdebt",
    version,
    about = "Debt payoff strategy engine",
    long_about = "Ranks debts under the avalanche and snowball methods, simulates \
                  month-by-month payoff with optional extra payments, recommends a \
                  strategy and projects single-debt payoff dates. All money math uses \
                  decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full validated portfolio analysis (strategies, plans, insights)
    Analyze(PortfolioArgs),
    /// Simulate payoff targeting the highest interest rate first
    Avalanche(PortfolioArgs),
    /// Simulate payoff targeting the smallest balance first
    Snowball(PortfolioArgs),
    /// Simulate payoff in user-assigned priority order
    Custom(PortfolioArgs),
    /// Compare avalanche and snowball at the same extra payment
    Compare(PortfolioArgs),
    /// Re-simulate a strategy across several extra payment amounts
    Impact(ImpactArgs),
    /// Rule-based observations about the portfolio
    Insights(PortfolioArgs),
    /// Payoff time, interest and date for a single balance
    Payoff(PayoffArgs),
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

/// Diagnostics go to stderr; stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("VDEBT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::strategies::run_analyze(args),
        Commands::Avalanche(args) => commands::strategies::run_avalanche(args),
        Commands::Snowball(args) => commands::strategies::run_snowball(args),
        Commands::Custom(args) => commands::strategies::run_custom(args),
        Commands::Compare(args) => commands::strategies::run_compare(args),
        Commands::Impact(args) => commands::strategies::run_impact(args),
        Commands::Insights(args) => commands::strategies::run_insights(args),
        Commands::Payoff(args) => commands::payoff::run_payoff(args),
        Commands::Version => {
            println!("vdebt {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
