use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{payoff_time_for, total_interest_for};
use crate::strategies::ordering::order_by;
use crate::strategies::simulation::simulate;
use crate::strategies::StrategyKind;
use crate::types::{DebtAccount, Money, Months};

/// A debt annotated with its rank and standalone payoff figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedDebt {
    pub debt: DebtAccount,
    /// 1-based rank within the strategy.
    pub priority: u32,
    pub months_to_payoff: Months,
    pub total_interest_cost: Money,
}

/// Ordered debts plus aggregates for one strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: StrategyKind,
    pub name: String,
    pub description: String,
    pub debts: Vec<PrioritizedDebt>,
    /// Sum of per-debt interest costs.
    pub total_interest: Money,
    /// Minimum-payment payoff time of the top-priority debt. This is the
    /// figure strategies are compared on.
    pub payoff_time: Months,
    /// Months until every balance reaches zero, minimum payments only.
    pub portfolio_payoff_time: Months,
}

impl StrategyResult {
    pub fn empty(kind: StrategyKind) -> Self {
        Self {
            strategy: kind,
            name: kind.display_name().to_string(),
            description: kind.description().to_string(),
            debts: Vec::new(),
            total_interest: Decimal::ZERO,
            payoff_time: 0,
            portfolio_payoff_time: 0,
        }
    }

    /// Highest-priority debt, if any.
    pub fn top_debt(&self) -> Option<&PrioritizedDebt> {
        self.debts.first()
    }
}

/// Rank already-filtered active debts under `kind`.
pub fn analyze_strategy(active: &[DebtAccount], kind: StrategyKind) -> StrategyResult {
    if active.is_empty() {
        return StrategyResult::empty(kind);
    }

    let ordered = order_by(kind, active);
    let portfolio_payoff_time = simulate(&ordered, Decimal::ZERO).total_months;

    let debts: Vec<PrioritizedDebt> = ordered
        .into_iter()
        .enumerate()
        .map(|(idx, debt)| PrioritizedDebt {
            priority: idx as u32 + 1,
            months_to_payoff: payoff_time_for(&debt),
            total_interest_cost: total_interest_for(&debt),
            debt,
        })
        .collect();

    let total_interest = debts.iter().map(|d| d.total_interest_cost).sum();
    let payoff_time = debts.first().map_or(0, |d| d.months_to_payoff);

    StrategyResult {
        strategy: kind,
        name: kind.display_name().to_string(),
        description: kind.description().to_string(),
        debts,
        total_interest,
        payoff_time,
        portfolio_payoff_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::UNPAYABLE_MONTHS;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<DebtAccount> {
        vec![
            DebtAccount::new("debt1", "Card A", dec!(5000), dec!(18.99), dec!(150)),
            DebtAccount::new("debt2", "Card B", dec!(2000), dec!(15.5), dec!(60)),
            DebtAccount::new("debt3", "Loan", dec!(8000), dec!(10), dec!(200)),
        ]
    }

    #[test]
    fn test_priorities_are_contiguous() {
        for kind in [StrategyKind::Avalanche, StrategyKind::Snowball] {
            let result = analyze_strategy(&sample(), kind);
            let ranks: Vec<u32> = result.debts.iter().map(|d| d.priority).collect();
            assert_eq!(ranks, [1, 2, 3]);
        }
    }

    #[test]
    fn test_each_debt_has_finite_payoff() {
        let result = analyze_strategy(&sample(), StrategyKind::Avalanche);
        for d in &result.debts {
            assert!(d.months_to_payoff > 0);
            assert!(d.months_to_payoff < UNPAYABLE_MONTHS);
            assert!(d.total_interest_cost > Decimal::ZERO);
        }
        assert!(result.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_metadata_names() {
        let avalanche = analyze_strategy(&sample(), StrategyKind::Avalanche);
        let snowball = analyze_strategy(&sample(), StrategyKind::Snowball);
        assert_eq!(avalanche.name, "Debt Avalanche");
        assert!(avalanche.description.contains("highest interest rate"));
        assert_eq!(snowball.name, "Debt Snowball");
        assert!(snowball.description.contains("lowest balance"));
    }

    #[test]
    fn test_payoff_time_follows_top_debt() {
        let avalanche = analyze_strategy(&sample(), StrategyKind::Avalanche);
        let snowball = analyze_strategy(&sample(), StrategyKind::Snowball);
        assert_eq!(avalanche.payoff_time, avalanche.debts[0].months_to_payoff);
        assert_eq!(snowball.payoff_time, snowball.debts[0].months_to_payoff);
        assert_eq!(avalanche.payoff_time, 48);
        assert_eq!(snowball.payoff_time, 44);
    }

    #[test]
    fn test_portfolio_payoff_time_covers_every_debt() {
        let result = analyze_strategy(&sample(), StrategyKind::Snowball);
        let slowest = result.debts.iter().map(|d| d.months_to_payoff).max().unwrap();
        assert!(result.portfolio_payoff_time >= result.payoff_time);
        // The simulation agrees with the slowest closed-form estimate to within a month.
        assert!(
            result.portfolio_payoff_time + 1 >= slowest
                && result.portfolio_payoff_time <= slowest + 1
        );
    }

    #[test]
    fn test_unpayable_debt_reports_sentinel() {
        let debts = vec![DebtAccount::new("x", "Impossible", dec!(10000), dec!(25), dec!(10))];
        let result = analyze_strategy(&debts, StrategyKind::Avalanche);
        assert_eq!(result.debts[0].months_to_payoff, UNPAYABLE_MONTHS);
        assert_eq!(result.debts[0].total_interest_cost, dec!(20000));
    }

    #[test]
    fn test_empty_input() {
        let result = analyze_strategy(&[], StrategyKind::Snowball);
        assert!(result.debts.is_empty());
        assert_eq!(result.payoff_time, 0);
        assert_eq!(result.portfolio_payoff_time, 0);
        assert!(result.top_debt().is_none());
    }
}
