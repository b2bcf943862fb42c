use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Annual interest rates expressed as percentages (19.9 = 19.9% APR).
pub type Rate = Decimal;

/// Whole months.
pub type Months = u32;

/// Lifecycle state of a debt account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    #[default]
    Active,
    PaidOff,
    Deferred,
    #[serde(rename = "default")]
    Defaulted,
}

/// Kind of liability. Unknown kinds deserialize as `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CreditCard,
    PersonalLoan,
    Personal,
    Auto,
    Mortgage,
    Student,
    Medical,
    #[default]
    #[serde(other)]
    Other,
}

/// A debt account as held by the budgeting application.
///
/// Field aliases accept the camelCase names the web client persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtAccount {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor: Option<String>,
    #[serde(rename = "type", default)]
    pub debt_type: DebtType,
    #[serde(default)]
    pub status: DebtStatus,
    #[serde(alias = "currentBalance", alias = "balance")]
    pub current_balance: Money,
    #[serde(default, alias = "interestRate")]
    pub interest_rate: Rate,
    #[serde(default, alias = "minimumPayment")]
    pub minimum_payment: Money,
    /// User-assigned priority, consulted only by the custom ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl DebtAccount {
    /// Active personal debt with the given figures.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        current_balance: Money,
        interest_rate: Rate,
        minimum_payment: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            creditor: None,
            debt_type: DebtType::Other,
            status: DebtStatus::Active,
            current_balance,
            interest_rate,
            minimum_payment,
            priority: None,
        }
    }

    pub fn with_type(mut self, debt_type: DebtType) -> Self {
        self.debt_type = debt_type;
        self
    }

    pub fn with_status(mut self, status: DebtStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_creditor(mut self, creditor: impl Into<String>) -> Self {
        self.creditor = Some(creditor.into());
        self
    }

    /// Participates in payoff planning: active with an outstanding balance.
    pub fn is_active(&self) -> bool {
        self.status == DebtStatus::Active && self.current_balance > Decimal::ZERO
    }

    /// Monthly periodic rate as a decimal (APR / 100 / 12), floored at zero.
    pub fn monthly_rate(&self) -> Decimal {
        monthly_rate(self.interest_rate)
    }
}

/// Convert an annual percentage rate into a monthly decimal rate.
pub fn monthly_rate(annual_pct: Rate) -> Decimal {
    annual_pct.max(Decimal::ZERO) / Decimal::ONE_HUNDRED / Decimal::from(12)
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
