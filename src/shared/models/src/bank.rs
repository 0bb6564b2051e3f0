use serde::{Deserialize, Serialize};

/// A single balance entry in base denomination units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: f64,
}

/// Display denomination and the coefficient dividing base units into it,
/// resolved once at startup from the chain's denom metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenomInfo {
    pub denom: String,
    pub coefficient: f64,
}

impl DenomInfo {
    /// Converts an amount in base units into display units.
    pub fn display_amount(&self, base_amount: f64) -> f64 {
        base_amount / self.coefficient
    }
}
