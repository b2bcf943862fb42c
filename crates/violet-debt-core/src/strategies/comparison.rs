use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::strategies::analysis::StrategyResult;
use crate::strategies::plan::{calculate_debt_avalanche, calculate_debt_snowball, StrategyPlan};
use crate::strategies::StrategyKind;
use crate::types::{DebtAccount, Money, Months};

/// Interest gap below which the strategies count as equivalent.
const EQUIVALENT_INTEREST: Decimal = dec!(100);
/// Payoff-time gap (months) within which the strategies count as equivalent.
const EQUIVALENT_MONTHS: i64 = 2;
/// Interest avalanche must save to be recommended outright.
const AVALANCHE_INTEREST_THRESHOLD: Decimal = dec!(500);
/// Extra months snowball may take before avalanche is recommended.
const AVALANCHE_TIME_THRESHOLD: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedStrategy {
    Avalanche,
    Snowball,
    Either,
}

impl std::fmt::Display for RecommendedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecommendedStrategy::Avalanche => "avalanche",
            RecommendedStrategy::Snowball => "snowball",
            RecommendedStrategy::Either => "either",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub strategy: RecommendedStrategy,
    pub reason: String,
    /// Absolute interest difference between the strategies.
    pub savings: Money,
    /// Snowball interest minus avalanche interest.
    pub interest_savings: Money,
    /// Snowball top-debt payoff time minus avalanche's, in months.
    pub time_difference: i64,
}

/// Choose between avalanche and snowball. First matching rule wins:
///
/// 1. interest gap under $100 and time gap within 2 months: either
/// 2. avalanche saves more than $500: avalanche
/// 3. snowball takes more than 6 extra months: avalanche
/// 4. otherwise snowball, for the motivation of quick wins
pub fn compare(avalanche: &StrategyResult, snowball: &StrategyResult) -> Recommendation {
    let interest_savings = snowball.total_interest - avalanche.total_interest;
    let time_difference = i64::from(snowball.payoff_time) - i64::from(avalanche.payoff_time);
    let savings = interest_savings.abs();

    let (strategy, reason) = if savings < EQUIVALENT_INTEREST
        && time_difference.abs() <= EQUIVALENT_MONTHS
    {
        (
            RecommendedStrategy::Either,
            "Both strategies have similar costs and timelines. Choose based on your personal preference."
                .to_string(),
        )
    } else if interest_savings > AVALANCHE_INTEREST_THRESHOLD {
        (
            RecommendedStrategy::Avalanche,
            format!(
                "Avalanche saves ${} in interest compared to snowball.",
                interest_savings.round_dp(2)
            ),
        )
    } else if time_difference > AVALANCHE_TIME_THRESHOLD {
        (
            RecommendedStrategy::Avalanche,
            format!("Avalanche pays off your debt {time_difference} months sooner than snowball."),
        )
    } else {
        (
            RecommendedStrategy::Snowball,
            "Snowball provides psychological motivation through faster small debt payoffs."
                .to_string(),
        )
    };

    Recommendation {
        strategy,
        reason,
        savings,
        interest_savings,
        time_difference,
    }
}

/// Side-by-side avalanche and snowball plans at one extra payment level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub extra_payment: Money,
    pub avalanche: StrategyPlan,
    pub snowball: StrategyPlan,
    pub best_for_interest: StrategyKind,
    pub best_for_time: StrategyKind,
    /// Snowball, for its early wins.
    pub best_for_motivation: StrategyKind,
    pub interest_difference: Money,
    pub time_difference: Months,
    /// Snowball interest minus avalanche interest.
    pub savings_with_avalanche: Money,
    /// Avalanche months minus snowball months.
    pub time_with_snowball: i64,
}

/// Simulate both policies with the same extra payment and compare them.
pub fn compare_debt_strategies(debts: &[DebtAccount], extra_payment: Money) -> StrategyComparison {
    let avalanche = calculate_debt_avalanche(debts, extra_payment);
    let snowball = calculate_debt_snowball(debts, extra_payment);

    let best_for_interest = if avalanche.total_interest <= snowball.total_interest {
        StrategyKind::Avalanche
    } else {
        StrategyKind::Snowball
    };
    let best_for_time = if avalanche.total_months <= snowball.total_months {
        StrategyKind::Avalanche
    } else {
        StrategyKind::Snowball
    };

    StrategyComparison {
        extra_payment,
        best_for_interest,
        best_for_time,
        best_for_motivation: StrategyKind::Snowball,
        interest_difference: (avalanche.total_interest - snowball.total_interest).abs(),
        time_difference: avalanche.total_months.abs_diff(snowball.total_months),
        savings_with_avalanche: snowball.total_interest - avalanche.total_interest,
        time_with_snowball: i64::from(avalanche.total_months) - i64::from(snowball.total_months),
        avalanche,
        snowball,
    }
}
