pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "strategies")]
pub mod strategies;

#[cfg(feature = "insights")]
pub mod insights;

#[cfg(feature = "engine")]
pub mod engine;

pub use error::VioletDebtError;
pub use types::*;

/// Standard result type for all debt-engine operations
pub type VioletDebtResult<T> = Result<T, VioletDebtError>;
