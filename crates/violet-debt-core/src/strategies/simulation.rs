use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{DebtAccount, Money, Months};

/// Hard stop for the month-by-month loop (50 years).
pub const MAX_SIMULATION_MONTHS: Months = 600;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Knobs for [`simulate_with`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    /// Fixed amount added on top of all minimum payments each month.
    pub extra_payment: Money,
    /// Add the minimum payments of cleared debts to the monthly extra pool.
    #[serde(default)]
    pub roll_over_freed_payments: bool,
}

/// One debt's figures within a simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtMonth {
    pub debt_id: String,
    /// Cash paid toward the debt this month.
    pub payment: Money,
    pub principal: Money,
    /// Interest accrued this month. Exceeds the payment on an unpayable debt.
    pub interest: Money,
    pub remaining_balance: Money,
}

/// Aggregate and per-debt figures for one simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub month: Months,
    pub debts: Vec<DebtMonth>,
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub remaining_debt: Money,
    pub debts_remaining: usize,
}

/// A debt reaching zero balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffEvent {
    pub debt_id: String,
    pub debt_name: String,
    pub month_paid_off: Months,
    pub original_balance: Money,
}

/// Result of a full portfolio simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSimulation {
    pub total_months: Months,
    pub total_interest: Money,
    pub monthly_breakdown: Vec<MonthlySnapshot>,
    /// Debt ids in the order their balances reached zero.
    pub debt_payoff_order: Vec<String>,
    pub payoff_events: Vec<PayoffEvent>,
    /// False when the month cap was reached with balances outstanding.
    pub converged: bool,
}

/// Closed-form minimum-payment-only estimate used as a savings baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineEstimate {
    pub total_months: Months,
    pub total_interest: Money,
}

/// Private working copy of a debt; only `remaining` changes during a run.
struct WorkingDebt<'a> {
    debt: &'a DebtAccount,
    remaining: Money,
    monthly_rate: Decimal,
    paid_off: bool,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Simulate paying off `ordered` debts with a fixed monthly extra payment
/// directed at debts in the given (fixed) priority order.
pub fn simulate(ordered: &[DebtAccount], extra_payment: Money) -> PayoffSimulation {
    simulate_with(
        ordered,
        &SimulationOptions {
            extra_payment,
            roll_over_freed_payments: false,
        },
    )
}

/// Month-by-month amortization of a prioritized portfolio.
///
/// Each month every open debt accrues interest on its remaining balance and
/// receives its minimum payment; the extra pool then tops up principal in
/// priority order. Principal never exceeds the remaining balance. The loop
/// ends when every balance is zero or after [`MAX_SIMULATION_MONTHS`].
pub fn simulate_with(ordered: &[DebtAccount], options: &SimulationOptions) -> PayoffSimulation {
    let mut working: Vec<WorkingDebt<'_>> = ordered
        .iter()
        .map(|debt| {
            let remaining = debt.current_balance.max(Decimal::ZERO);
            WorkingDebt {
                debt,
                remaining,
                monthly_rate: debt.monthly_rate(),
                paid_off: remaining.is_zero(),
            }
        })
        .collect();

    let extra_payment = options.extra_payment.max(Decimal::ZERO);
    let mut freed_payments = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut month: Months = 0;
    let mut monthly_breakdown = Vec::new();
    let mut debt_payoff_order = Vec::new();
    let mut payoff_events = Vec::new();

    while working.iter().any(|w| !w.paid_off) && month < MAX_SIMULATION_MONTHS {
        month += 1;

        let mut pool = extra_payment;
        if options.roll_over_freed_payments {
            pool += freed_payments;
        }

        let mut rows = Vec::new();
        let mut month_interest = Decimal::ZERO;
        let mut month_principal = Decimal::ZERO;
        let mut month_payment = Decimal::ZERO;

        for w in working.iter_mut().filter(|w| !w.paid_off) {
            let interest = w.remaining * w.monthly_rate;
            let minimum = w.debt.minimum_payment.max(Decimal::ZERO);
            let mut principal = (minimum - interest).max(Decimal::ZERO);
            let mut extra = Decimal::ZERO;

            if pool > Decimal::ZERO {
                let room = (w.remaining - principal).max(Decimal::ZERO);
                extra = pool.min(room);
                principal += extra;
                pool -= extra;
            }

            principal = principal.min(w.remaining);
            w.remaining -= principal;
            // Unpaid interest is not capitalized; payment is the cash sent.
            let payment = (principal + interest).min(minimum + extra);
            month_interest += interest;
            month_principal += principal;
            month_payment += payment;

            if w.remaining <= Decimal::ZERO {
                w.remaining = Decimal::ZERO;
                w.paid_off = true;
                freed_payments += minimum;
                debt_payoff_order.push(w.debt.id.clone());
                payoff_events.push(PayoffEvent {
                    debt_id: w.debt.id.clone(),
                    debt_name: w.debt.name.clone(),
                    month_paid_off: month,
                    original_balance: w.debt.current_balance,
                });
            }

            rows.push(DebtMonth {
                debt_id: w.debt.id.clone(),
                payment,
                principal,
                interest,
                remaining_balance: w.remaining,
            });
        }

        total_interest += month_interest;

        monthly_breakdown.push(MonthlySnapshot {
            month,
            debts: rows,
            total_payment: month_payment,
            total_interest: month_interest,
            total_principal: month_principal,
            remaining_debt: working.iter().map(|w| w.remaining).sum(),
            debts_remaining: working.iter().filter(|w| !w.paid_off).count(),
        });
    }

    let converged = working.iter().all(|w| w.paid_off);
    if converged {
        debug!(
            debts = ordered.len(),
            months = month,
            %total_interest,
            "payoff simulation complete"
        );
    } else {
        warn!(
            debts = ordered.len(),
            cap = MAX_SIMULATION_MONTHS,
            "payoff simulation hit month cap with balances outstanding"
        );
    }

    PayoffSimulation {
        total_months: month,
        total_interest,
        monthly_breakdown,
        debt_payoff_order,
        payoff_events,
        converged,
    }
}

/// Minimum-payments-only estimate across a portfolio.
///
/// Debts lacking a balance, payment or rate are skipped. A debt whose payment
/// never covers interest counts as [`MAX_SIMULATION_MONTHS`].
pub fn simulate_minimum_payments(debts: &[DebtAccount]) -> BaselineEstimate {
    debts.iter().fold(BaselineEstimate::default(), |total, debt| {
        if debt.current_balance <= Decimal::ZERO
            || debt.minimum_payment <= Decimal::ZERO
            || debt.interest_rate <= Decimal::ZERO
        {
            return total;
        }

        let rate = debt.monthly_rate();
        let balance = debt.current_balance;
        let payment = debt.minimum_payment;

        let months = if payment > balance * rate {
            let ratio = Decimal::ONE - balance * rate / payment;
            match (ratio.checked_ln(), (Decimal::ONE + rate).checked_ln()) {
                (Some(num), Some(den)) if !den.is_zero() => (-num / den)
                    .ceil()
                    .to_u32()
                    .unwrap_or(MAX_SIMULATION_MONTHS),
                _ => MAX_SIMULATION_MONTHS,
            }
        } else {
            MAX_SIMULATION_MONTHS
        };

        let interest = (payment * Decimal::from(months) - balance).max(Decimal::ZERO);

        BaselineEstimate {
            total_months: total.total_months.max(months),
            total_interest: total.total_interest + interest,
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
