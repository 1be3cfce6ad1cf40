use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::CURRENCY_DP;

/// Dollar amounts. Reported values are rescaled to cents.
pub type Money = Decimal;

/// Rates expressed as decimals (0.06 = 6%).
pub type Rate = Decimal;

/// Percentages as entered by the user (6 = 6%).
pub type Percent = Decimal;

/// Envelope every engine entry point returns: the result plus the inputs
/// it ran with and anything worth flagging about them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    /// Decimal places of reported currency values
    pub currency_dp: u32,
}

pub fn with_metadata<T: Serialize>(
    methodology: impl Into<String>,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.into(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            currency_dp: CURRENCY_DP,
        },
    }
}
