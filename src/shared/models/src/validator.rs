use serde::{Deserialize, Serialize};

/// Snapshot of a single validator from the active set.
///
/// `delegated_shares` is the decimal share string from the node parsed to a
/// number; it is only ever compared against other validators from the same
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorSummary {
    pub operator_address: String,
    pub moniker: String,
    pub details: String,
    pub website: String,
    pub security_contact: String,
    pub commission_rate: f64,
    pub delegated_shares: f64,
    pub jailed: bool,
}
