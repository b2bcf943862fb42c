use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use violet_debt_core::amortization::{calculate_payoff_time, calculate_total_interest};
use violet_debt_core::strategies::analysis::analyze_strategy;
use violet_debt_core::strategies::comparison::compare_debt_strategies;
use violet_debt_core::strategies::impact::{calculate_extra_payment_impact, DEFAULT_IMPACT_AMOUNTS};
use violet_debt_core::strategies::ordering::{active_debts, order_by_avalanche, order_by_snowball};
use violet_debt_core::strategies::plan::{
    calculate_debt_avalanche, calculate_debt_custom, calculate_debt_snowball,
    calculate_strategy_plan,
};
use violet_debt_core::strategies::simulation::{simulate, SimulationOptions, MAX_SIMULATION_MONTHS};
use violet_debt_core::strategies::StrategyKind;
use violet_debt_core::{DebtAccount, DebtStatus, DebtType};

// ===========================================================================
// Fixtures
// ===========================================================================

fn household_debts() -> Vec<DebtAccount> {
    vec![
        DebtAccount::new("debt1", "Credit Card A", dec!(5000), dec!(18.99), dec!(150))
            .with_type(DebtType::CreditCard),
        DebtAccount::new("debt2", "Credit Card B", dec!(2000), dec!(15.5), dec!(60))
            .with_type(DebtType::CreditCard),
        DebtAccount::new("debt3", "Personal Loan", dec!(8000), dec!(10), dec!(200))
            .with_type(DebtType::PersonalLoan),
    ]
}

fn ids(debts: &[DebtAccount]) -> Vec<&str> {
    debts.iter().map(|d| d.id.as_str()).collect()
}

// ===========================================================================
// Ordering
// ===========================================================================

#[test]
fn test_avalanche_orders_by_rate() {
    let ordered = order_by_avalanche(&household_debts());
    assert_eq!(ids(&ordered), ["debt1", "debt2", "debt3"]);
    for pair in ordered.windows(2) {
        assert!(pair[0].interest_rate >= pair[1].interest_rate);
    }
}

#[test]
fn test_snowball_orders_by_balance() {
    let ordered = order_by_snowball(&household_debts());
    assert_eq!(ids(&ordered), ["debt2", "debt1", "debt3"]);
    for pair in ordered.windows(2) {
        assert!(pair[0].current_balance <= pair[1].current_balance);
    }
}

#[test]
fn test_inactive_debts_are_excluded() {
    let mut debts = household_debts();
    debts.push(
        DebtAccount::new("paid", "Old Card", dec!(900), dec!(29), dec!(40))
            .with_status(DebtStatus::PaidOff),
    );
    debts.push(DebtAccount::new("zero", "Cleared", Decimal::ZERO, dec!(12), dec!(25)));
    let active = active_debts(&debts);
    assert_eq!(active.len(), 3);

    let plan = calculate_debt_avalanche(&debts, dec!(100));
    assert!(!plan.debt_payoff_order.iter().any(|id| id == "paid" || id == "zero"));
}

// ===========================================================================
// Closed form
// ===========================================================================

#[test]
fn test_closed_form_reference_card() {
    // 5000 at 19.9% paying 150: n = ln(1 + rP/(pmt - rP)) / ln(1 + r)
    let months = calculate_payoff_time(dec!(5000), dec!(19.9), dec!(150));
    assert_eq!(months, 49);
    let interest = calculate_total_interest(dec!(5000), dec!(19.9), dec!(150));
    assert!(interest > dec!(2300) && interest < dec!(2400));
}

#[test]
fn test_closed_form_is_monotone_in_payment() {
    let mut previous = u32::MAX;
    for payment in [dec!(100), dec!(150), dec!(250), dec!(500)] {
        let months = calculate_payoff_time(dec!(5000), dec!(18.99), payment);
        assert!(months <= previous);
        previous = months;
    }
}

// ===========================================================================
// Simulation and plans
// ===========================================================================

#[test]
fn test_extra_payment_cascades_within_a_month() {
    let debts = vec![
        DebtAccount::new("a", "A", dec!(300), Decimal::ZERO, dec!(100)),
        DebtAccount::new("b", "B", dec!(1000), Decimal::ZERO, dec!(100)),
    ];
    let sim = simulate(&order_by_snowball(&debts), dec!(100));
    assert_eq!(sim.total_months, 6);
    assert_eq!(sim.debt_payoff_order, ["a", "b"]);
    assert_eq!(sim.payoff_events[0].month_paid_off, 2);
    assert_eq!(sim.total_interest, Decimal::ZERO);
}

#[test]
fn test_rollover_shortens_payoff() {
    let debts = vec![
        DebtAccount::new("a", "A", dec!(300), Decimal::ZERO, dec!(100)),
        DebtAccount::new("b", "B", dec!(1000), Decimal::ZERO, dec!(100)),
    ];
    let plan = calculate_strategy_plan(
        &debts,
        StrategyKind::Snowball,
        &SimulationOptions {
            extra_payment: dec!(100),
            roll_over_freed_payments: true,
        },
    );
    assert_eq!(plan.total_months, 5);
    assert!(plan.converged);
}

#[test]
fn test_plans_converge_and_beat_minimums() {
    for plan in [
        calculate_debt_avalanche(&household_debts(), dec!(200)),
        calculate_debt_snowball(&household_debts(), dec!(200)),
    ] {
        assert!(plan.converged);
        assert!(plan.total_months < MAX_SIMULATION_MONTHS);
        assert!(plan.total_interest > Decimal::ZERO);
        assert!(plan.interest_saved > Decimal::ZERO);
        assert_eq!(plan.debt_payoff_order.len(), 3);
        assert_eq!(plan.summary.total_debt, dec!(15000));
        assert_eq!(plan.summary.total_minimum_payment, dec!(410));
        assert_eq!(plan.summary.total_payment, dec!(15000) + plan.total_interest);
    }
}

#[test]
fn test_more_extra_never_slower() {
    let low = calculate_debt_avalanche(&household_debts(), dec!(50));
    let high = calculate_debt_avalanche(&household_debts(), dec!(500));
    assert!(high.total_months <= low.total_months);
    assert!(high.total_interest < low.total_interest);
}

#[test]
fn test_custom_plan_follows_priority() {
    let debts = vec![
        DebtAccount::new("low", "Low", dec!(500), dec!(5), dec!(50)).with_priority(1),
        DebtAccount::new("high", "High", dec!(4000), dec!(7), dec!(80)).with_priority(9),
    ];
    let plan = calculate_debt_custom(&debts, dec!(1000));
    assert_eq!(plan.strategy, StrategyKind::Custom);
    assert_eq!(plan.debt_payoff_order.first().map(String::as_str), Some("high"));
}

#[test]
fn test_single_debt_strategies_agree() {
    let debts = vec![DebtAccount::new("only", "Only", dec!(3000), dec!(21), dec!(120))];
    let avalanche = analyze_strategy(&debts, StrategyKind::Avalanche);
    let snowball = analyze_strategy(&debts, StrategyKind::Snowball);
    assert_eq!(avalanche.total_interest, snowball.total_interest);
    assert_eq!(avalanche.payoff_time, snowball.payoff_time);
    assert_eq!(avalanche.debts[0].debt, snowball.debts[0].debt);
}

// ===========================================================================
// Comparison and impact
// ===========================================================================

#[test]
fn test_comparison_on_household_debts() {
    let cmp = compare_debt_strategies(&household_debts(), dec!(300));
    assert_eq!(
        cmp.savings_with_avalanche,
        cmp.snowball.total_interest - cmp.avalanche.total_interest
    );
    assert_eq!(cmp.interest_difference, cmp.savings_with_avalanche.abs());
    let expected_best = if cmp.savings_with_avalanche >= Decimal::ZERO {
        StrategyKind::Avalanche
    } else {
        StrategyKind::Snowball
    };
    assert_eq!(cmp.best_for_interest, expected_best);
    assert_eq!(cmp.best_for_motivation, StrategyKind::Snowball);
    assert_eq!(cmp.avalanche.debt_payoff_order.first().map(String::as_str), Some("debt1"));
    assert_eq!(cmp.snowball.debt_payoff_order.first().map(String::as_str), Some("debt2"));
}

#[test]
fn test_full_impact_rows_improve() {
    let rows = calculate_extra_payment_impact(
        &household_debts(),
        StrategyKind::Snowball,
        &DEFAULT_IMPACT_AMOUNTS,
    );
    assert_eq!(rows.len(), DEFAULT_IMPACT_AMOUNTS.len());
    assert_eq!(rows[0].extra_payment, Decimal::ZERO);
    for pair in rows.windows(2) {
        assert!(pair[1].total_months <= pair[0].total_months);
        assert!(pair[1].monthly_savings >= pair[0].monthly_savings);
    }
}
