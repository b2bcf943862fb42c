use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::strategies::ordering::{active_debts, order_by};
use crate::strategies::simulation::{
    simulate_minimum_payments, simulate_with, MonthlySnapshot, PayoffEvent, SimulationOptions,
};
use crate::strategies::StrategyKind;
use crate::types::{DebtAccount, Money, Months};

/// Months of breakdown kept on a plan for display.
pub const DISPLAY_MONTHS: usize = 60;

/// Portfolio totals attached to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_debt: Money,
    pub total_minimum_payment: Money,
    pub extra_payment: Money,
    /// Principal plus simulated interest.
    pub total_payment: Money,
    pub time_to_payoff: String,
}

/// Full payoff plan for one ordering policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPlan {
    pub strategy: StrategyKind,
    pub total_months: Months,
    pub total_interest: Money,
    /// Interest avoided relative to paying minimums only.
    pub interest_saved: Money,
    pub debt_payoff_order: Vec<String>,
    pub payoff_events: Vec<PayoffEvent>,
    pub monthly_breakdown: Vec<MonthlySnapshot>,
    pub converged: bool,
    pub summary: PlanSummary,
}

/// "X years Y months"
pub fn format_duration(months: Months) -> String {
    format!("{} years {} months", months / 12, months % 12)
}

/// Highest interest rate first.
pub fn calculate_debt_avalanche(debts: &[DebtAccount], extra_payment: Money) -> StrategyPlan {
    calculate_strategy_plan(debts, StrategyKind::Avalanche, &fixed_pool(extra_payment))
}

/// Smallest balance first.
pub fn calculate_debt_snowball(debts: &[DebtAccount], extra_payment: Money) -> StrategyPlan {
    calculate_strategy_plan(debts, StrategyKind::Snowball, &fixed_pool(extra_payment))
}

/// User priority first.
pub fn calculate_debt_custom(debts: &[DebtAccount], extra_payment: Money) -> StrategyPlan {
    calculate_strategy_plan(debts, StrategyKind::Custom, &fixed_pool(extra_payment))
}

fn fixed_pool(extra_payment: Money) -> SimulationOptions {
    SimulationOptions {
        extra_payment,
        roll_over_freed_payments: false,
    }
}

/// Filter to active debts, order them by `kind` and simulate the payoff.
pub fn calculate_strategy_plan(
    debts: &[DebtAccount],
    kind: StrategyKind,
    options: &SimulationOptions,
) -> StrategyPlan {
    let ordered = order_by(kind, &active_debts(debts));

    let total_debt: Money = ordered.iter().map(|d| d.current_balance).sum();
    let total_minimum_payment: Money = ordered
        .iter()
        .map(|d| d.minimum_payment.max(Decimal::ZERO))
        .sum();

    let simulation = simulate_with(&ordered, options);
    let baseline = simulate_minimum_payments(&ordered);
    let interest_saved = if ordered.is_empty() {
        Decimal::ZERO
    } else {
        baseline.total_interest - simulation.total_interest
    };

    let mut monthly_breakdown = simulation.monthly_breakdown;
    monthly_breakdown.truncate(DISPLAY_MONTHS);

    StrategyPlan {
        strategy: kind,
        total_months: simulation.total_months,
        total_interest: simulation.total_interest,
        interest_saved,
        debt_payoff_order: simulation.debt_payoff_order,
        payoff_events: simulation.payoff_events,
        monthly_breakdown,
        converged: simulation.converged,
        summary: PlanSummary {
            total_debt,
            total_minimum_payment,
            extra_payment: options.extra_payment,
            total_payment: total_debt + simulation.total_interest,
            time_to_payoff: format_duration(simulation.total_months),
        },
    }
}
