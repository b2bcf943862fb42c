use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{DebtAccount, DebtType, Money};

/// APR above which a debt counts as high interest.
const HIGH_INTEREST_RATE: Decimal = dec!(15);
/// Minimum-payment to balance ratio considered favourable.
const HEALTHY_PAYMENT_RATIO: Decimal = dec!(0.05);
/// Credit cards beyond this count prompt a consolidation tip.
const CONSOLIDATION_CARD_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Warning,
    Info,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub message: String,
}

/// Rule-based observations about a set of active debts.
pub fn generate_insights(active: &[DebtAccount]) -> Vec<Insight> {
    let mut insights = Vec::new();

    let high_interest = active
        .iter()
        .filter(|d| d.interest_rate > HIGH_INTEREST_RATE)
        .count();
    if high_interest > 0 {
        let plural = if high_interest == 1 { "" } else { "s" };
        insights.push(Insight {
            insight_type: InsightType::Warning,
            title: "High Interest Debt".into(),
            message: format!(
                "You have {high_interest} debt{plural} with interest rates above 15%. \
                 Prioritizing these can save you significant money."
            ),
        });
    }

    let total_minimum: Money = active.iter().map(|d| d.minimum_payment).sum();
    let total_balance: Money = active.iter().map(|d| d.current_balance).sum();
    if total_balance > Decimal::ZERO {
        let ratio = total_minimum / total_balance;
        if ratio > HEALTHY_PAYMENT_RATIO {
            insights.push(Insight {
                insight_type: InsightType::Info,
                title: "Good Payment Ratio".into(),
                message: format!(
                    "Your minimum payments are {}% of your total balance, which keeps payoff on a good pace.",
                    (ratio * Decimal::ONE_HUNDRED).round_dp(1)
                ),
            });
        }
    }

    let credit_cards = active
        .iter()
        .filter(|d| d.debt_type == DebtType::CreditCard)
        .count();
    if credit_cards > CONSOLIDATION_CARD_COUNT {
        insights.push(Insight {
            insight_type: InsightType::Tip,
            title: "Consider Consolidation".into(),
            message: format!(
                "You have {credit_cards} credit cards. Consider consolidating them with a \
                 lower-rate balance transfer or personal loan."
            ),
        });
    }

    insights
}
