use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::VioletDebtError;
use crate::types::{monthly_rate, DebtAccount, Money, Months, Rate};
use crate::VioletDebtResult;

/// Reported payoff time for a debt whose payment never covers its interest.
pub const UNPAYABLE_MONTHS: Months = 999;

/// Closed-form payoff figures for a single debt, anchored to a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffProjection {
    pub months_to_payoff: Months,
    pub total_interest: Money,
    pub payoff_date: NaiveDate,
}

/// Unrounded number of level payments needed to retire `balance`:
/// n = ln(1 + rP / (pmt - rP)) / ln(1 + r)
fn payment_periods(balance: Money, rate: Decimal, payment: Money) -> Option<Decimal> {
    let accrual = balance * rate;
    let headroom = payment - accrual;
    if headroom <= Decimal::ZERO {
        return None;
    }
    let numerator = (Decimal::ONE + accrual / headroom).checked_ln()?;
    let denominator = (Decimal::ONE + rate).checked_ln()?;
    if denominator.is_zero() {
        return None;
    }
    Some(numerator / denominator)
}

fn to_months(periods: Decimal) -> Months {
    periods
        .ceil()
        .to_u32()
        .map_or(UNPAYABLE_MONTHS, |m| m.min(UNPAYABLE_MONTHS))
}

/// Months to retire a debt paying only `minimum_payment` each month.
///
/// Returns 0 when there is nothing to pay or no payment, and
/// [`UNPAYABLE_MONTHS`] when the payment does not exceed the first month's
/// interest.
pub fn calculate_payoff_time(balance: Money, annual_rate: Rate, minimum_payment: Money) -> Months {
    if balance <= Decimal::ZERO || minimum_payment <= Decimal::ZERO {
        return 0;
    }

    let rate = monthly_rate(annual_rate);
    if rate.is_zero() {
        return to_months(balance / minimum_payment);
    }
    if minimum_payment <= balance * rate {
        return UNPAYABLE_MONTHS;
    }

    payment_periods(balance, rate, minimum_payment).map_or(UNPAYABLE_MONTHS, to_months)
}

/// Interest paid over the life of a debt paying only `minimum_payment`.
///
/// Unpayable debts are approximated as twice the current balance.
pub fn calculate_total_interest(
    balance: Money,
    annual_rate: Rate,
    minimum_payment: Money,
) -> Money {
    if balance <= Decimal::ZERO || minimum_payment <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let rate = monthly_rate(annual_rate);
    if rate.is_zero() {
        return Decimal::ZERO;
    }
    if minimum_payment <= balance * rate {
        return balance * Decimal::TWO;
    }

    match payment_periods(balance, rate, minimum_payment) {
        Some(n) => (minimum_payment * n - balance).max(Decimal::ZERO),
        None => balance * Decimal::TWO,
    }
}

/// [`calculate_payoff_time`] for an account.
pub fn payoff_time_for(debt: &DebtAccount) -> Months {
    calculate_payoff_time(debt.current_balance, debt.interest_rate, debt.minimum_payment)
}

/// [`calculate_total_interest`] for an account.
pub fn total_interest_for(debt: &DebtAccount) -> Money {
    calculate_total_interest(debt.current_balance, debt.interest_rate, debt.minimum_payment)
}

/// True when the minimum payment never outpaces interest accrual.
pub fn is_unpayable(debt: &DebtAccount) -> bool {
    payoff_time_for(debt) == UNPAYABLE_MONTHS
}

/// Project the payoff date of a single debt from `as_of`.
///
/// Returns `Ok(None)` when the debt has no balance, no payment, or can never
/// be paid off at the current payment.
pub fn project_payoff(
    debt: &DebtAccount,
    as_of: NaiveDate,
) -> VioletDebtResult<Option<PayoffProjection>> {
    if debt.current_balance <= Decimal::ZERO || debt.minimum_payment <= Decimal::ZERO {
        return Ok(None);
    }

    let months = payoff_time_for(debt);
    if months == UNPAYABLE_MONTHS {
        return Ok(None);
    }

    let payoff_date = as_of
        .checked_add_months(chrono::Months::new(months))
        .ok_or_else(|| {
            VioletDebtError::DateError(format!("{as_of} + {months} months is out of range"))
        })?;

    Ok(Some(PayoffProjection {
        months_to_payoff: months,
        total_interest: total_interest_for(debt),
        payoff_date,
    }))
}
