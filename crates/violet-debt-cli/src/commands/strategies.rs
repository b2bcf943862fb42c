use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use violet_debt_core::engine::{
    analyze_debt_portfolio, portfolio_from_value, validate_portfolio, DebtPortfolioInput,
};
use violet_debt_core::insights::generate_insights;
use violet_debt_core::strategies::comparison::compare_debt_strategies;
use violet_debt_core::strategies::impact::{calculate_extra_payment_impact, DEFAULT_IMPACT_AMOUNTS};
use violet_debt_core::strategies::ordering::active_debts;
use violet_debt_core::strategies::plan::calculate_strategy_plan;
use violet_debt_core::strategies::simulation::SimulationOptions;
use violet_debt_core::strategies::StrategyKind;

use crate::input;

/// Arguments shared by every portfolio command
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PortfolioArgs {
    /// Path to a JSON or YAML portfolio (a debt list or an object with `debts`)
    #[arg(long)]
    pub input: Option<String>,

    /// Extra amount paid each month on top of all minimums (overrides the file)
    #[arg(long)]
    pub extra_payment: Option<Decimal>,

    /// Add the minimum payments of cleared debts to the extra pool
    #[arg(long)]
    pub rollover: bool,

    /// Anchor date for payoff projections (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Avalanche,
    Snowball,
    Custom,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Avalanche => StrategyKind::Avalanche,
            StrategyArg::Snowball => StrategyKind::Snowball,
            StrategyArg::Custom => StrategyKind::Custom,
        }
    }
}

/// Arguments for the extra payment impact table
#[derive(Args)]
pub struct ImpactArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Ordering policy to re-simulate
    #[arg(long, value_enum, default_value = "avalanche")]
    pub strategy: StrategyArg,

    /// Comma-separated extra payment amounts (default 0,50,100,200,500)
    #[arg(long, value_delimiter = ',')]
    pub amounts: Vec<Decimal>,
}

/// Load and validate the portfolio, letting flags override file values.
fn load_portfolio(args: &PortfolioArgs) -> Result<DebtPortfolioInput, Box<dyn std::error::Error>> {
    let value = input::read_input(args.input.as_deref())?
        .ok_or("--input file or piped JSON portfolio is required")?;
    let mut portfolio = portfolio_from_value(value)?;

    if let Some(extra) = args.extra_payment {
        portfolio.extra_payment = extra;
    }
    if args.rollover {
        portfolio.roll_over_freed_payments = true;
    }
    if args.as_of.is_some() {
        portfolio.as_of = args.as_of;
    }

    validate_portfolio(&portfolio)?;
    Ok(portfolio)
}

fn run_plan(args: PortfolioArgs, kind: StrategyKind) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio = load_portfolio(&args)?;
    let options = SimulationOptions {
        extra_payment: portfolio.extra_payment,
        roll_over_freed_payments: portfolio.roll_over_freed_payments,
    };
    let plan = calculate_strategy_plan(&portfolio.debts, kind, &options);
    Ok(serde_json::to_value(plan)?)
}

pub fn run_analyze(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio = load_portfolio(&args)?;
    let result = analyze_debt_portfolio(&portfolio)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_avalanche(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_plan(args, StrategyKind::Avalanche)
}

pub fn run_snowball(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_plan(args, StrategyKind::Snowball)
}

pub fn run_custom(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    run_plan(args, StrategyKind::Custom)
}

pub fn run_compare(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio = load_portfolio(&args)?;
    let comparison = compare_debt_strategies(&portfolio.debts, portfolio.extra_payment);
    Ok(serde_json::to_value(comparison)?)
}

pub fn run_impact(args: ImpactArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio = load_portfolio(&args.portfolio)?;
    if let Some(negative) = args.amounts.iter().find(|a| **a < Decimal::ZERO) {
        return Err(format!("--amounts must be >= 0 (got {negative})").into());
    }
    let amounts: Vec<Decimal> = if args.amounts.is_empty() {
        DEFAULT_IMPACT_AMOUNTS.to_vec()
    } else {
        args.amounts
    };

    let rows = calculate_extra_payment_impact(&portfolio.debts, args.strategy.into(), &amounts);
    Ok(serde_json::to_value(rows)?)
}

pub fn run_insights(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio = load_portfolio(&args)?;
    let insights = generate_insights(&active_debts(&portfolio.debts));
    Ok(serde_json::to_value(insights)?)
}
