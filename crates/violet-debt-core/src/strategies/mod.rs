pub mod analysis;
pub mod comparison;
pub mod impact;
pub mod ordering;
pub mod plan;
pub mod simulation;

use serde::{Deserialize, Serialize};

/// Payoff ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Highest interest rate first.
    Avalanche,
    /// Smallest balance first.
    Snowball,
    /// User-assigned priority, highest first.
    Custom,
}

impl StrategyKind {
    pub fn display_name(self) -> &'static str {
        match self {
            StrategyKind::Avalanche => "Debt Avalanche",
            StrategyKind::Snowball => "Debt Snowball",
            StrategyKind::Custom => "Custom Priority",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            StrategyKind::Avalanche => {
                "Pay minimums on all debts, then put extra money toward the debt with the highest interest rate"
            }
            StrategyKind::Snowball => {
                "Pay minimums on all debts, then put extra money toward the debt with the lowest balance"
            }
            StrategyKind::Custom => {
                "Pay minimums on all debts, then put extra money toward debts in your chosen priority order"
            }
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StrategyKind::Avalanche => "avalanche",
            StrategyKind::Snowball => "snowball",
            StrategyKind::Custom => "custom",
        };
        f.write_str(s)
    }
}
