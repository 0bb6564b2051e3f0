//! Raw response shapes of the Tendermint RPC and LCD REST endpoints.
//!
//! Numeric fields arrive as decimal strings and are parsed into the shared
//! model types before leaving this crate.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use chain_models::{BlockRef, Proposal, ValidatorSummary};

use crate::errors::{ChainError, Result};

pub(crate) fn parse_number(value: &str, what: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| ChainError::QueryFailed(format!("unparseable {what}: {value:?}")))
}

// ---------------------------------------------------------------------------
// Tendermint RPC `/block`

#[derive(Debug, Deserialize)]
pub(crate) struct BlockEnvelope {
    pub result: BlockResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BlockResult {
    pub block: RawBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBlock {
    pub header: RawHeader,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawHeader {
    pub height: String,
    pub time: DateTime<Utc>,
}

impl RawHeader {
    pub(crate) fn into_block_ref(self) -> Result<BlockRef> {
        let height = self
            .height
            .parse::<u64>()
            .map_err(|_| ChainError::QueryFailed(format!("unparseable block height: {:?}", self.height)))?;
        Ok(BlockRef {
            height,
            time: self.time,
        })
    }
}

// ---------------------------------------------------------------------------
// LCD staking

#[derive(Debug, Deserialize)]
pub(crate) struct ValidatorsResponse {
    pub validators: Vec<RawValidator>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValidatorResponse {
    pub validator: RawValidator,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawValidator {
    pub operator_address: String,
    #[serde(default)]
    pub jailed: bool,
    pub delegator_shares: String,
    #[serde(default)]
    pub description: RawDescription,
    #[serde(default)]
    pub commission: RawCommission,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawDescription {
    #[serde(default)]
    pub moniker: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub security_contact: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCommission {
    #[serde(default)]
    pub commission_rates: RawCommissionRates,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCommissionRates {
    #[serde(default)]
    pub rate: String,
}

impl RawValidator {
    pub(crate) fn into_summary(self) -> Result<ValidatorSummary> {
        let delegated_shares = parse_number(&self.delegator_shares, "delegator shares")?;
        let commission_rate = if self.commission.commission_rates.rate.is_empty() {
            0.0
        } else {
            parse_number(&self.commission.commission_rates.rate, "commission rate")?
        };
        Ok(ValidatorSummary {
            operator_address: self.operator_address,
            moniker: self.description.moniker,
            details: self.description.details,
            website: self.description.website,
            security_contact: self.description.security_contact,
            commission_rate,
            delegated_shares,
            jailed: self.jailed,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DelegationsResponse {
    pub delegation_responses: Vec<RawDelegation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDelegation {
    pub balance: RawCoin,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UnbondingsResponse {
    pub unbonding_responses: Vec<RawUnbonding>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUnbonding {
    pub entries: Vec<RawUnbondingEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUnbondingEntry {
    pub balance: String,
}

// ---------------------------------------------------------------------------
// LCD bank and distribution

#[derive(Debug, Deserialize)]
pub(crate) struct BalancesResponse {
    pub balances: Vec<RawCoin>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCoin {
    pub denom: String,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RewardsResponse {
    #[serde(default)]
    pub total: Vec<RawCoin>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DenomsMetadataResponse {
    pub metadatas: Vec<RawDenomMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDenomMetadata {
    #[serde(default)]
    pub display: String,
    pub denom_units: Vec<RawDenomUnit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDenomUnit {
    pub denom: String,
    #[serde(default)]
    pub exponent: u32,
}

// ---------------------------------------------------------------------------
// LCD governance

#[derive(Debug, Deserialize)]
pub(crate) struct ProposalsResponse {
    pub proposals: Vec<RawProposal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProposalResponse {
    pub proposal: RawProposal,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProposal {
    pub proposal_id: String,
    #[serde(default)]
    pub content: RawProposalContent,
    pub status: String,
    pub submit_time: DateTime<Utc>,
    pub deposit_end_time: DateTime<Utc>,
    pub voting_start_time: DateTime<Utc>,
    pub voting_end_time: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawProposalContent {
    #[serde(rename = "@type", default)]
    pub type_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl RawProposal {
    pub(crate) fn into_proposal(self) -> Result<Proposal> {
        let id = self.proposal_id.parse::<u64>().map_err(|_| {
            ChainError::QueryFailed(format!("unparseable proposal id: {:?}", self.proposal_id))
        })?;

        // Proposal types without a title/description field in their content
        // object are reported as unsupported rather than blank.
        let title = if self.content.title.is_empty() {
            format!("Unsupported proposal type {}", self.content.type_url)
        } else {
            self.content.title
        };
        Ok(Proposal {
            id,
            title,
            description: self.content.description,
            status: self.status,
            submit_time: self.submit_time,
            deposit_end_time: self.deposit_end_time,
            voting_start_time: self.voting_start_time,
            voting_end_time: self.voting_end_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_header_parses() {
        let raw = r#"{
            "jsonrpc": "2.0",
            "id": -1,
            "result": {
                "block_id": { "hash": "AA" },
                "block": {
                    "header": {
                        "chain_id": "test-1",
                        "height": "4814775",
                        "time": "2023-05-05T12:34:56.789Z"
                    }
                }
            }
        }"#;

        let envelope: BlockEnvelope = serde_json::from_str(raw).unwrap();
        let block = envelope.result.block.header.into_block_ref().unwrap();
        assert_eq!(block.height, 4814775);
        assert_eq!(block.time.timestamp(), 1683290096);
    }

    #[test]
    fn validator_parses_to_summary() {
        let raw = r#"{
            "operator_address": "testvaloper1abc",
            "jailed": true,
            "status": "BOND_STATUS_BONDED",
            "tokens": "4000000",
            "delegator_shares": "4000000.000000000000000000",
            "description": {
                "moniker": "Test Validator",
                "website": "https://example.org",
                "security_contact": "sec@example.org",
                "details": "A validator"
            },
            "commission": {
                "commission_rates": { "rate": "0.050000000000000000" }
            }
        }"#;

        let validator: RawValidator = serde_json::from_str(raw).unwrap();
        let summary = validator.into_summary().unwrap();
        assert_eq!(summary.operator_address, "testvaloper1abc");
        assert_eq!(summary.moniker, "Test Validator");
        assert!(summary.jailed);
        assert_eq!(summary.delegated_shares, 4_000_000.0);
        assert_eq!(summary.commission_rate, 0.05);
    }

    #[test]
    fn bad_share_string_is_a_query_failure() {
        let raw = r#"{
            "operator_address": "testvaloper1abc",
            "delegator_shares": "not-a-number"
        }"#;

        let validator: RawValidator = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            validator.into_summary(),
            Err(ChainError::QueryFailed(_))
        ));
    }

    #[test]
    fn proposal_without_known_content_is_unsupported() {
        let raw = r#"{
            "proposal_id": "12",
            "content": { "@type": "/custom.v1.WeirdProposal" },
            "status": "PROPOSAL_STATUS_VOTING_PERIOD",
            "submit_time": "2023-01-01T00:00:00Z",
            "deposit_end_time": "2023-01-03T00:00:00Z",
            "voting_start_time": "2023-01-03T00:00:00Z",
            "voting_end_time": "2023-01-05T00:00:00Z"
        }"#;

        let proposal: RawProposal = serde_json::from_str(raw).unwrap();
        let proposal = proposal.into_proposal().unwrap();
        assert_eq!(proposal.id, 12);
        assert!(proposal.title.starts_with("Unsupported proposal type"));
        assert_eq!(proposal.status, "PROPOSAL_STATUS_VOTING_PERIOD");
    }
}
