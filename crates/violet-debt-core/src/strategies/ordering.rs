use crate::strategies::StrategyKind;
use crate::types::DebtAccount;

/// Debts that take part in payoff planning, in input order.
pub fn active_debts(debts: &[DebtAccount]) -> Vec<DebtAccount> {
    debts.iter().filter(|d| d.is_active()).cloned().collect()
}

/// Highest interest rate first. Stable for equal rates.
pub fn order_by_avalanche(debts: &[DebtAccount]) -> Vec<DebtAccount> {
    let mut ordered = debts.to_vec();
    ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));
    ordered
}

/// Smallest balance first. Stable for equal balances.
pub fn order_by_snowball(debts: &[DebtAccount]) -> Vec<DebtAccount> {
    let mut ordered = debts.to_vec();
    ordered.sort_by(|a, b| a.current_balance.cmp(&b.current_balance));
    ordered
}

/// Highest user priority first; unset priority ranks as 1. Stable for ties.
pub fn order_by_custom(debts: &[DebtAccount]) -> Vec<DebtAccount> {
    let mut ordered = debts.to_vec();
    ordered.sort_by(|a, b| b.priority.unwrap_or(1).cmp(&a.priority.unwrap_or(1)));
    ordered
}

pub fn order_by(kind: StrategyKind, debts: &[DebtAccount]) -> Vec<DebtAccount> {
    match kind {
        StrategyKind::Avalanche => order_by_avalanche(debts),
        StrategyKind::Snowball => order_by_snowball(debts),
        StrategyKind::Custom => order_by_custom(debts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DebtStatus;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ids(debts: &[DebtAccount]) -> Vec<&str> {
        debts.iter().map(|d| d.id.as_str()).collect()
    }

    fn sample() -> Vec<DebtAccount> {
        vec![
            DebtAccount::new("debt1", "Card A", dec!(5000), dec!(18.99), dec!(150)),
            DebtAccount::new("debt2", "Card B", dec!(2000), dec!(15.5), dec!(60)),
            DebtAccount::new("debt3", "Loan", dec!(8000), dec!(10), dec!(200)),
        ]
    }

    #[test]
    fn test_avalanche_orders_by_rate_desc() {
        assert_eq!(ids(&order_by_avalanche(&sample())), ["debt1", "debt2", "debt3"]);
    }

    #[test]
    fn test_snowball_orders_by_balance_asc() {
        assert_eq!(ids(&order_by_snowball(&sample())), ["debt2", "debt1", "debt3"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let debts = vec![
            DebtAccount::new("a", "A", dec!(5000), dec!(10), dec!(150)),
            DebtAccount::new("b", "B", dec!(5000), dec!(10), dec!(100)),
            DebtAccount::new("c", "C", dec!(5000), dec!(10), dec!(75)),
        ];
        assert_eq!(ids(&order_by_avalanche(&debts)), ["a", "b", "c"]);
        assert_eq!(ids(&order_by_snowball(&debts)), ["a", "b", "c"]);
        assert_eq!(ids(&order_by_custom(&debts)), ["a", "b", "c"]);
    }

    #[test]
    fn test_custom_uses_priority_desc() {
        let debts = vec![
            DebtAccount::new("low", "Low", dec!(500), dec!(25), dec!(50)),
            DebtAccount::new("top", "Top", dec!(10000), dec!(5), dec!(200)).with_priority(5),
            DebtAccount::new("mid", "Mid", dec!(3000), dec!(15), dec!(90)).with_priority(2),
        ];
        assert_eq!(ids(&order_by_custom(&debts)), ["top", "mid", "low"]);
    }

    #[test]
    fn test_active_filter_drops_inactive_and_empty() {
        let mut debts = sample();
        debts.push(
            DebtAccount::new("paid", "Paid", Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
                .with_status(DebtStatus::PaidOff),
        );
        debts.push(DebtAccount::new("zero", "Zero", Decimal::ZERO, dec!(12), Decimal::ZERO));
        debts.push(
            DebtAccount::new("def", "Deferred", dec!(900), dec!(6), dec!(30))
                .with_status(DebtStatus::Deferred),
        );
        assert_eq!(ids(&active_debts(&debts)), ["debt1", "debt2", "debt3"]);
    }
}
