use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use violet_debt_core::engine::{self, DebtPortfolioInput, PayoffInput};
use violet_debt_core::strategies::comparison;
use violet_debt_core::strategies::impact::{self, DEFAULT_IMPACT_AMOUNTS};
use violet_debt_core::strategies::ordering::active_debts;
use violet_debt_core::strategies::StrategyKind;
use violet_debt_core::{insights, DebtAccount, VioletDebtError};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse and validate a portfolio payload (debt list or `{ debts, ... }`).
fn parse_portfolio(input_json: &str) -> NapiResult<DebtPortfolioInput> {
    let value: serde_json::Value = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let portfolio = engine::portfolio_from_value(value).map_err(to_napi_error)?;
    engine::validate_portfolio(&portfolio).map_err(to_napi_error)?;
    Ok(portfolio)
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_debt_strategies(input_json: String) -> NapiResult<String> {
    let portfolio = parse_portfolio(&input_json)?;
    let output = engine::compute_debt_strategies(&portfolio.debts);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_debt_portfolio(input_json: String) -> NapiResult<String> {
    let portfolio = parse_portfolio(&input_json)?;
    let output = engine::analyze_debt_portfolio(&portfolio).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_debt_strategies(input_json: String) -> NapiResult<String> {
    let portfolio = parse_portfolio(&input_json)?;
    let output = comparison::compare_debt_strategies(&portfolio.debts, portfolio.extra_payment);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct ImpactRequest {
    debts: Vec<DebtAccount>,
    #[serde(default)]
    strategy: Option<StrategyKind>,
    #[serde(default)]
    amounts: Option<Vec<Decimal>>,
}

#[napi]
pub fn calculate_extra_payment_impact(input_json: String) -> NapiResult<String> {
    let request: ImpactRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let amounts = request
        .amounts
        .unwrap_or_else(|| DEFAULT_IMPACT_AMOUNTS.to_vec());
    if amounts.iter().any(|a| *a < Decimal::ZERO) {
        return Err(to_napi_error(VioletDebtError::InvalidInput {
            field: "amounts".into(),
            reason: "extra payment amounts must be >= 0".into(),
        }));
    }

    let portfolio = DebtPortfolioInput {
        debts: request.debts,
        extra_payment: Decimal::ZERO,
        roll_over_freed_payments: false,
        as_of: None,
    };
    engine::validate_portfolio(&portfolio).map_err(to_napi_error)?;

    let kind = request.strategy.unwrap_or(StrategyKind::Avalanche);
    let output = impact::calculate_extra_payment_impact(&portfolio.debts, kind, &amounts);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Single debt and insights
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payoff_time(input_json: String) -> NapiResult<String> {
    let input: PayoffInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = engine::calculate_payoff(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn generate_insights(input_json: String) -> NapiResult<String> {
    let portfolio = parse_portfolio(&input_json)?;
    let output = insights::generate_insights(&active_debts(&portfolio.debts));
    serde_json::to_string(&output).map_err(to_napi_error)
}
