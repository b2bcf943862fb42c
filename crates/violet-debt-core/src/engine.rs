use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::amortization::{
    is_unpayable, payoff_time_for, project_payoff, total_interest_for, PayoffProjection,
    UNPAYABLE_MONTHS,
};
use crate::error::VioletDebtError;
use crate::insights::{generate_insights, Insight};
use crate::strategies::analysis::{analyze_strategy, StrategyResult};
use crate::strategies::comparison::{compare, Recommendation, RecommendedStrategy};
use crate::strategies::impact::{impact_analysis, PaymentImpactScenario};
use crate::strategies::ordering::active_debts;
use crate::strategies::plan::{calculate_strategy_plan, format_duration, StrategyPlan};
use crate::strategies::simulation::{SimulationOptions, MAX_SIMULATION_MONTHS};
use crate::strategies::StrategyKind;
use crate::types::{with_metadata, ComputationOutput, DebtAccount, Money, Months, Rate};
use crate::VioletDebtResult;

// ---------------------------------------------------------------------------
// Facade
// ---------------------------------------------------------------------------

/// Everything a debt-strategy screen renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtStrategies {
    pub avalanche_strategy: StrategyResult,
    pub snowball_strategy: StrategyResult,
    pub recommendation: Option<Recommendation>,
    pub payment_impact: Vec<PaymentImpactScenario>,
    pub insights: Vec<Insight>,
    pub recommendation_text: String,
    pub has_debts: bool,
}

/// Rank, compare and summarise the active debts in `debts`.
///
/// Pure: the same input always yields the same output, and inactive or
/// zero-balance accounts are ignored.
pub fn compute_debt_strategies(debts: &[DebtAccount]) -> DebtStrategies {
    let active = active_debts(debts);
    if active.is_empty() {
        return DebtStrategies {
            avalanche_strategy: StrategyResult::empty(StrategyKind::Avalanche),
            snowball_strategy: StrategyResult::empty(StrategyKind::Snowball),
            recommendation: None,
            payment_impact: Vec::new(),
            insights: Vec::new(),
            recommendation_text: String::new(),
            has_debts: false,
        };
    }

    let avalanche_strategy = analyze_strategy(&active, StrategyKind::Avalanche);
    let snowball_strategy = analyze_strategy(&active, StrategyKind::Snowball);
    let recommendation = compare(&avalanche_strategy, &snowball_strategy);
    let payment_impact = impact_analysis(&avalanche_strategy, &snowball_strategy);
    let insights = generate_insights(&active);
    let recommendation_text = recommendation_text(Some(&recommendation));

    DebtStrategies {
        avalanche_strategy,
        snowball_strategy,
        recommendation: Some(recommendation),
        payment_impact,
        insights,
        recommendation_text,
        has_debts: true,
    }
}

/// One-line summary of a recommendation; empty when there is none.
pub fn recommendation_text(recommendation: Option<&Recommendation>) -> String {
    match recommendation {
        None => String::new(),
        Some(rec) => match rec.strategy {
            RecommendedStrategy::Avalanche => {
                format!("Avalanche method recommended: {}", rec.reason)
            }
            RecommendedStrategy::Snowball => {
                format!("Snowball method recommended: {}", rec.reason)
            }
            RecommendedStrategy::Either => format!("Either method works well: {}", rec.reason),
        },
    }
}

// ---------------------------------------------------------------------------
// Validated entry point
// ---------------------------------------------------------------------------

/// Portfolio plus planning knobs, as supplied by the CLI or the web client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtPortfolioInput {
    pub debts: Vec<DebtAccount>,
    #[serde(default, alias = "extraPayment")]
    pub extra_payment: Money,
    #[serde(default, alias = "rollOverFreedPayments")]
    pub roll_over_freed_payments: bool,
    /// Anchor date for payoff projections; no projections without it.
    #[serde(default, alias = "asOf")]
    pub as_of: Option<NaiveDate>,
}

/// Dated payoff projection for one active debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtProjection {
    pub debt_id: String,
    pub projection: Option<PayoffProjection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPortfolioAnalysis {
    pub strategies: DebtStrategies,
    pub avalanche_plan: StrategyPlan,
    pub snowball_plan: StrategyPlan,
    pub projections: Vec<DebtProjection>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortfolioShape {
    Full(DebtPortfolioInput),
    Debts(Vec<DebtAccount>),
}

/// Accept either a full `DebtPortfolioInput` object or a bare debt list.
pub fn portfolio_from_value(value: serde_json::Value) -> VioletDebtResult<DebtPortfolioInput> {
    if !(value.is_array() || value.get("debts").is_some()) {
        return Err(VioletDebtError::InsufficientData(
            "expected a list of debts or an object with a `debts` field".into(),
        ));
    }
    match serde_json::from_value::<PortfolioShape>(value)? {
        PortfolioShape::Full(input) => Ok(input),
        PortfolioShape::Debts(debts) => Ok(DebtPortfolioInput {
            debts,
            extra_payment: Decimal::ZERO,
            roll_over_freed_payments: false,
            as_of: None,
        }),
    }
}

/// Reject negative amounts and blank ids.
pub fn validate_portfolio(input: &DebtPortfolioInput) -> VioletDebtResult<()> {
    if input.extra_payment < Decimal::ZERO {
        return Err(VioletDebtError::InvalidInput {
            field: "extra_payment".into(),
            reason: "extra_payment must be >= 0".into(),
        });
    }

    for (idx, debt) in input.debts.iter().enumerate() {
        if debt.id.trim().is_empty() {
            return Err(VioletDebtError::InvalidInput {
                field: format!("debts[{idx}].id"),
                reason: "debt id must not be empty".into(),
            });
        }
        let checks = [
            ("current_balance", debt.current_balance),
            ("interest_rate", debt.interest_rate),
            ("minimum_payment", debt.minimum_payment),
        ];
        for (field, value) in checks {
            if value < Decimal::ZERO {
                return Err(VioletDebtError::InvalidInput {
                    field: format!("debts[{idx}].{field}"),
                    reason: format!("{field} must be >= 0 for debt '{}'", debt.id),
                });
            }
        }
    }

    Ok(())
}

/// Validate a portfolio and run the full analysis: strategy ranking,
/// recommendation, impact table, insights, simulated plans for both
/// policies at the requested extra payment, and optional dated projections.
pub fn analyze_debt_portfolio(
    input: &DebtPortfolioInput,
) -> VioletDebtResult<ComputationOutput<DebtPortfolioAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_portfolio(input)?;
    debug!(
        debts = input.debts.len(),
        extra_payment = %input.extra_payment,
        "analyzing debt portfolio"
    );

    let active = active_debts(&input.debts);
    if active.is_empty() {
        warnings.push("No active debts with an outstanding balance".into());
    }
    for debt in active.iter().filter(|d| is_unpayable(d)) {
        warnings.push(format!(
            "Minimum payment on '{}' does not cover monthly interest; balance will not amortize",
            debt.name
        ));
    }

    let strategies = compute_debt_strategies(&active);

    let options = SimulationOptions {
        extra_payment: input.extra_payment,
        roll_over_freed_payments: input.roll_over_freed_payments,
    };
    let avalanche_plan = calculate_strategy_plan(&active, StrategyKind::Avalanche, &options);
    let snowball_plan = calculate_strategy_plan(&active, StrategyKind::Snowball, &options);
    for plan in [&avalanche_plan, &snowball_plan] {
        if !plan.converged {
            warnings.push(format!(
                "{} plan does not clear all balances within {} months",
                plan.strategy, MAX_SIMULATION_MONTHS
            ));
        }
    }

    let projections = match input.as_of {
        Some(as_of) => active
            .iter()
            .map(|debt| {
                Ok(DebtProjection {
                    debt_id: debt.id.clone(),
                    projection: project_payoff(debt, as_of)?,
                })
            })
            .collect::<VioletDebtResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    let output = DebtPortfolioAnalysis {
        strategies,
        avalanche_plan,
        snowball_plan,
        projections,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Debt payoff strategy analysis (avalanche vs snowball, monthly amortization)",
        &serde_json::json!({
            "active_debts": active.len(),
            "extra_payment": input.extra_payment.to_string(),
            "roll_over_freed_payments": input.roll_over_freed_payments,
            "interest_compounding": "monthly on remaining balance",
            "max_months": MAX_SIMULATION_MONTHS,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Single-debt payoff
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffInput {
    #[serde(alias = "currentBalance")]
    pub balance: Money,
    #[serde(default, alias = "interestRate")]
    pub interest_rate: Rate,
    #[serde(alias = "minimumPayment")]
    pub minimum_payment: Money,
    #[serde(default, alias = "asOf")]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSummary {
    pub months_to_payoff: Months,
    pub total_interest: Money,
    pub unpayable: bool,
    pub time_to_payoff: String,
    pub payoff_date: Option<NaiveDate>,
}

/// Closed-form payoff figures for one balance at a fixed monthly payment.
pub fn calculate_payoff(input: &PayoffInput) -> VioletDebtResult<ComputationOutput<PayoffSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let checks = [
        ("balance", input.balance),
        ("interest_rate", input.interest_rate),
        ("minimum_payment", input.minimum_payment),
    ];
    for (field, value) in checks {
        if value < Decimal::ZERO {
            return Err(VioletDebtError::InvalidInput {
                field: field.into(),
                reason: format!("{field} must be >= 0"),
            });
        }
    }
    if input.balance > Decimal::ZERO && input.minimum_payment.is_zero() {
        return Err(VioletDebtError::InsufficientData(
            "a monthly payment is required to project payoff of a non-zero balance".into(),
        ));
    }

    let debt = DebtAccount::new(
        "payoff",
        "payoff",
        input.balance,
        input.interest_rate,
        input.minimum_payment,
    );
    let months = payoff_time_for(&debt);
    let unpayable = months == UNPAYABLE_MONTHS;
    if unpayable {
        warnings.push(format!(
            "Payment of {} does not cover monthly interest of {}",
            input.minimum_payment,
            (input.balance * debt.monthly_rate()).round_dp(2)
        ));
    }

    let payoff_date = match input.as_of {
        Some(as_of) => project_payoff(&debt, as_of)?.map(|p| p.payoff_date),
        None => None,
    };

    let output = PayoffSummary {
        months_to_payoff: months,
        total_interest: total_interest_for(&debt),
        unpayable,
        time_to_payoff: if unpayable {
            "never".to_string()
        } else {
            format_duration(months)
        },
        payoff_date,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Closed-form amortization payoff (level monthly payment)",
        &serde_json::json!({
            "interest_compounding": "monthly",
            "unpayable_sentinel_months": UNPAYABLE_MONTHS,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_portfolio_from_bare_list() {
        let value = serde_json::json!([
            {"id": "a", "currentBalance": 100, "interestRate": 5, "minimumPayment": 10}
        ]);
        let input = portfolio_from_value(value).unwrap();
        assert_eq!(input.debts.len(), 1);
        assert_eq!(input.extra_payment, Decimal::ZERO);
    }

    #[test]
    fn test_portfolio_from_object() {
        let value = serde_json::json!({
            "debts": [{"id": "a", "balance": "100", "minimumPayment": "10"}],
            "extraPayment": "75",
            "asOf": "2024-03-01"
        });
        let input = portfolio_from_value(value).unwrap();
        assert_eq!(input.extra_payment, dec!(75));
        assert_eq!(input.as_of, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_portfolio_from_unrelated_value() {
        let value = serde_json::json!({"accounts": []});
        assert!(matches!(
            portfolio_from_value(value),
            Err(VioletDebtError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_calculate_payoff_with_date() {
        let input = PayoffInput {
            balance: dec!(1000),
            interest_rate: dec!(12),
            minimum_payment: dec!(100),
            as_of: NaiveDate::from_ymd_opt(2024, 1, 15),
        };
        let out = calculate_payoff(&input).unwrap();
        assert_eq!(out.result.months_to_payoff, 11);
        assert_eq!(out.result.time_to_payoff, "0 years 11 months");
        assert_eq!(out.result.payoff_date, NaiveDate::from_ymd_opt(2024, 12, 15));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_calculate_payoff_unpayable_warns() {
        let input = PayoffInput {
            balance: dec!(1000),
            interest_rate: dec!(24),
            minimum_payment: dec!(5),
            as_of: None,
        };
        let out = calculate_payoff(&input).unwrap();
        assert!(out.result.unpayable);
        assert_eq!(out.result.time_to_payoff, "never");
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_calculate_payoff_requires_payment() {
        let input = PayoffInput {
            balance: dec!(1000),
            interest_rate: dec!(24),
            minimum_payment: Decimal::ZERO,
            as_of: None,
        };
        assert!(matches!(
            calculate_payoff(&input),
            Err(VioletDebtError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_recommendation_text_variants() {
        let mut rec = Recommendation {
            strategy: RecommendedStrategy::Avalanche,
            reason: "because".into(),
            savings: dec!(600),
            interest_savings: dec!(600),
            time_difference: 0,
        };
        assert_eq!(
            recommendation_text(Some(&rec)),
            "Avalanche method recommended: because"
        );
        rec.strategy = RecommendedStrategy::Snowball;
        assert!(recommendation_text(Some(&rec)).starts_with("Snowball method"));
        rec.strategy = RecommendedStrategy::Either;
        assert!(recommendation_text(Some(&rec)).starts_with("Either method"));
        assert_eq!(recommendation_text(None), "");
    }

    #[test]
    fn test_validation_rejects_negative_values() {
        let input = DebtPortfolioInput {
            debts: vec![DebtAccount::new("a", "A", dec!(-5), dec!(10), dec!(10))],
            extra_payment: Decimal::ZERO,
            roll_over_freed_payments: false,
            as_of: None,
        };
        match analyze_debt_portfolio(&input) {
            Err(VioletDebtError::InvalidInput { field, .. }) => {
                assert_eq!(field, "debts[0].current_balance")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_rejects_negative_extra_payment() {
        let input = DebtPortfolioInput {
            debts: Vec::new(),
            extra_payment: dec!(-1),
            roll_over_freed_payments: false,
            as_of: None,
        };
        assert!(matches!(
            analyze_debt_portfolio(&input),
            Err(VioletDebtError::InvalidInput { .. })
        ));
    }
}
