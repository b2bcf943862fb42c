use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use violet_debt_core::engine::{calculate_payoff, PayoffInput};

use crate::input;

/// Arguments for single-debt payoff projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PayoffArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding balance
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Annual interest rate in percent (19.9 = 19.9% APR)
    #[arg(long, alias = "apr")]
    pub rate: Option<Decimal>,

    /// Fixed monthly payment
    #[arg(long, alias = "minimum-payment")]
    pub payment: Option<Decimal>,

    /// Date the projection starts from (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

pub fn run_payoff(args: PayoffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payoff_input: PayoffInput = if args.balance.is_some() || args.payment.is_some() {
        PayoffInput {
            balance: args.balance.ok_or("--balance is required (or provide --input)")?,
            interest_rate: args.rate.unwrap_or(Decimal::ZERO),
            minimum_payment: args.payment.ok_or("--payment is required (or provide --input)")?,
            as_of: args.as_of,
        }
    } else if let Some(data) = input::read_input(args.input.as_deref())? {
        let mut parsed: PayoffInput = serde_json::from_value(data)?;
        if args.as_of.is_some() {
            parsed.as_of = args.as_of;
        }
        parsed
    } else {
        return Err("--balance and --payment are required (or provide --input)".into());
    };

    let result = calculate_payoff(&payoff_input)?;
    Ok(serde_json::to_value(result)?)
}
