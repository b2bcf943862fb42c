use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{calculate_payoff_time, calculate_total_interest};
use crate::strategies::analysis::StrategyResult;
use crate::strategies::plan::{calculate_debt_avalanche, calculate_debt_snowball, calculate_debt_custom};
use crate::strategies::StrategyKind;
use crate::types::{DebtAccount, Money, Months};

/// Extra monthly amounts tabulated by [`impact_analysis`].
pub const EXTRA_PAYMENT_SCENARIOS: [Decimal; 4] = [dec!(50), dec!(100), dec!(200), dec!(500)];

/// Amounts re-simulated by [`calculate_extra_payment_impact`] when none are given.
pub const DEFAULT_IMPACT_AMOUNTS: [Decimal; 5] = [dec!(0), dec!(50), dec!(100), dec!(200), dec!(500)];

/// One strategy's outcome under an extra payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub months_to_payoff: Months,
    pub total_interest: Money,
    /// Baseline months minus scenario months.
    pub time_savings: i64,
    /// Baseline interest minus scenario interest.
    pub interest_savings: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentImpactScenario {
    pub extra_payment: Money,
    pub avalanche: ScenarioOutcome,
    pub snowball: ScenarioOutcome,
}

fn top_debt_outcome(result: &StrategyResult, extra_payment: Money) -> ScenarioOutcome {
    let Some(top) = result.top_debt() else {
        return ScenarioOutcome {
            months_to_payoff: 0,
            total_interest: Decimal::ZERO,
            time_savings: 0,
            interest_savings: Decimal::ZERO,
        };
    };

    let debt = &top.debt;
    let boosted = debt.minimum_payment + extra_payment;
    let months = calculate_payoff_time(debt.current_balance, debt.interest_rate, boosted);
    let interest = calculate_total_interest(debt.current_balance, debt.interest_rate, boosted);

    ScenarioOutcome {
        months_to_payoff: months,
        total_interest: interest,
        time_savings: i64::from(top.months_to_payoff) - i64::from(months),
        interest_savings: top.total_interest_cost - interest,
    }
}

/// Effect of each [`EXTRA_PAYMENT_SCENARIOS`] amount on each strategy.
///
/// Only the first-priority debt of each strategy is recomputed, with the
/// extra amount added to its minimum payment.
pub fn impact_analysis(
    avalanche: &StrategyResult,
    snowball: &StrategyResult,
) -> Vec<PaymentImpactScenario> {
    if avalanche.debts.is_empty() && snowball.debts.is_empty() {
        return Vec::new();
    }

    EXTRA_PAYMENT_SCENARIOS
        .iter()
        .map(|&extra_payment| PaymentImpactScenario {
            extra_payment,
            avalanche: top_debt_outcome(avalanche, extra_payment),
            snowball: top_debt_outcome(snowball, extra_payment),
        })
        .collect()
}

/// Full-portfolio outcome of one extra payment amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentImpact {
    pub extra_payment: Money,
    pub total_months: Months,
    pub total_interest: Money,
    pub total_payment: Money,
    pub time_to_payoff: String,
    /// Interest avoided relative to no extra payment.
    pub monthly_savings: Money,
}

/// Re-simulate the whole portfolio under `kind` for each amount.
pub fn calculate_extra_payment_impact(
    debts: &[DebtAccount],
    kind: StrategyKind,
    amounts: &[Money],
) -> Vec<ExtraPaymentImpact> {
    let run = |extra: Money| match kind {
        StrategyKind::Avalanche => calculate_debt_avalanche(debts, extra),
        StrategyKind::Snowball => calculate_debt_snowball(debts, extra),
        StrategyKind::Custom => calculate_debt_custom(debts, extra),
    };

    let baseline_interest = run(Decimal::ZERO).total_interest;

    amounts
        .iter()
        .map(|&amount| {
            let plan = run(amount);
            let monthly_savings = if amount.is_zero() {
                Decimal::ZERO
            } else {
                baseline_interest - plan.total_interest
            };
            ExtraPaymentImpact {
                extra_payment: amount,
                total_months: plan.total_months,
                total_interest: plan.total_interest,
                total_payment: plan.summary.total_payment,
                time_to_payoff: plan.summary.time_to_payoff,
                monthly_savings,
            }
        })
        .collect()
}
