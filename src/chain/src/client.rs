//! Query client for a Cosmos-SDK node.
//!
//! Blocks come from the Tendermint RPC endpoint, everything else from the
//! LCD REST API. Every call is a fresh synchronous round trip with a short
//! timeout; nothing is cached or retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use chain_models::{BlockRef, Coin, DenomInfo, Proposal, ValidatorSummary};

use crate::errors::{ChainError, Result};
use crate::wire;

/// Full validator sets are small enough to fetch in one page.
const VALIDATOR_PAGE_LIMIT: u32 = 1000;

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_block(&self, height: Option<u64>) -> Result<BlockRef>;
    async fn get_validators(&self) -> Result<Vec<ValidatorSummary>>;
    async fn get_validator(&self, operator_address: &str) -> Result<ValidatorSummary>;
    async fn get_balances(&self, address: &str) -> Result<Vec<Coin>>;
    async fn get_total_delegations(&self, address: &str) -> Result<f64>;
    async fn get_total_unbondings(&self, address: &str) -> Result<f64>;
    async fn get_total_rewards(&self, address: &str) -> Result<f64>;
    async fn get_proposal(&self, id: u64) -> Result<Proposal>;
    async fn get_proposals(&self) -> Result<Vec<Proposal>>;
    async fn denom_info(&self, display_denom: Option<String>) -> Result<DenomInfo>;
}

/// Looks a validator up by operator address when the query carries the
/// chain's valoper prefix, otherwise by case-insensitive moniker containment
/// over the full set.
pub async fn find_validator(
    client: &dyn ChainClient,
    query: &str,
    valoper_prefix: &str,
) -> Result<ValidatorSummary> {
    if query.starts_with(valoper_prefix) {
        debug!(query, "searching validator by address");
        return client.get_validator(query).await;
    }

    debug!(query, "searching validator by moniker");
    let needle = query.to_lowercase();
    client
        .get_validators()
        .await?
        .into_iter()
        .find(|validator| validator.moniker.to_lowercase().contains(&needle))
        .ok_or_else(|| ChainError::NotFound(format!("no validator matching {query:?}")))
}

pub struct HttpChainClient {
    http: reqwest::Client,
    rpc_url: String,
    lcd_url: String,
}

impl HttpChainClient {
    pub fn new(rpc_url: &str, lcd_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            rpc_url: rpc_url.trim_end_matches('/').to_string(),
            lcd_url: lcd_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChainError::QueryFailed(format!("{url}: http status {status}")));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn get_block(&self, height: Option<u64>) -> Result<BlockRef> {
        let url = match height {
            Some(height) => format!("{}/block?height={height}", self.rpc_url),
            None => format!("{}/block", self.rpc_url),
        };
        let envelope: wire::BlockEnvelope = self.get_json(url).await?;
        envelope.result.block.header.into_block_ref()
    }

    async fn get_validators(&self) -> Result<Vec<ValidatorSummary>> {
        let url = format!(
            "{}/cosmos/staking/v1beta1/validators?pagination.limit={VALIDATOR_PAGE_LIMIT}",
            self.lcd_url
        );
        let response: wire::ValidatorsResponse = self.get_json(url).await?;
        response
            .validators
            .into_iter()
            .map(wire::RawValidator::into_summary)
            .collect()
    }

    async fn get_validator(&self, operator_address: &str) -> Result<ValidatorSummary> {
        let url = format!(
            "{}/cosmos/staking/v1beta1/validators/{operator_address}",
            self.lcd_url
        );
        let response: wire::ValidatorResponse = self.get_json(url).await?;
        response.validator.into_summary()
    }

    async fn get_balances(&self, address: &str) -> Result<Vec<Coin>> {
        let url = format!("{}/cosmos/bank/v1beta1/balances/{address}", self.lcd_url);
        let response: wire::BalancesResponse = self.get_json(url).await?;
        response
            .balances
            .into_iter()
            .map(|coin| {
                Ok(Coin {
                    amount: wire::parse_number(&coin.amount, "balance amount")?,
                    denom: coin.denom,
                })
            })
            .collect()
    }

    async fn get_total_delegations(&self, address: &str) -> Result<f64> {
        let url = format!("{}/cosmos/staking/v1beta1/delegations/{address}", self.lcd_url);
        let response: wire::DelegationsResponse = self.get_json(url).await?;
        let mut total = 0.0;
        for delegation in response.delegation_responses {
            total += wire::parse_number(&delegation.balance.amount, "delegation amount")?;
        }
        Ok(total)
    }

    async fn get_total_unbondings(&self, address: &str) -> Result<f64> {
        let url = format!(
            "{}/cosmos/staking/v1beta1/delegators/{address}/unbonding_delegations",
            self.lcd_url
        );
        let response: wire::UnbondingsResponse = self.get_json(url).await?;
        let mut total = 0.0;
        for unbonding in response.unbonding_responses {
            for entry in unbonding.entries {
                total += wire::parse_number(&entry.balance, "unbonding balance")?;
            }
        }
        Ok(total)
    }

    async fn get_total_rewards(&self, address: &str) -> Result<f64> {
        let url = format!(
            "{}/cosmos/distribution/v1beta1/delegators/{address}/rewards",
            self.lcd_url
        );
        let response: wire::RewardsResponse = self.get_json(url).await?;
        let mut total = 0.0;
        for reward in response.total {
            total += wire::parse_number(&reward.amount, "reward amount")?;
        }
        Ok(total)
    }

    async fn get_proposal(&self, id: u64) -> Result<Proposal> {
        let url = format!("{}/cosmos/gov/v1beta1/proposals/{id}", self.lcd_url);
        let response: wire::ProposalResponse = self.get_json(url).await?;
        response.proposal.into_proposal()
    }

    async fn get_proposals(&self) -> Result<Vec<Proposal>> {
        let url = format!("{}/cosmos/gov/v1beta1/proposals", self.lcd_url);
        let response: wire::ProposalsResponse = self.get_json(url).await?;
        response
            .proposals
            .into_iter()
            .map(wire::RawProposal::into_proposal)
            .collect()
    }

    /// Resolves the display denomination and its base-unit coefficient from
    /// the chain's denom metadata. The first metadata entry is the chain's
    /// native token; `display_denom` overrides the advertised display unit.
    async fn denom_info(&self, display_denom: Option<String>) -> Result<DenomInfo> {
        let url = format!("{}/cosmos/bank/v1beta1/denoms_metadata", self.lcd_url);
        let response: wire::DenomsMetadataResponse = self.get_json(url).await?;
        let metadata = response
            .metadatas
            .into_iter()
            .next()
            .ok_or_else(|| ChainError::QueryFailed("node returned no denom metadata".to_string()))?;

        let denom = display_denom.unwrap_or_else(|| metadata.display.clone());
        let unit = metadata
            .denom_units
            .iter()
            .find(|unit| unit.denom == denom)
            .ok_or_else(|| {
                ChainError::QueryFailed(format!("denom {denom:?} is not among the chain's denom units"))
            })?;

        Ok(DenomInfo {
            denom,
            coefficient: 10f64.powi(unit.exponent as i32),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    mock! {
        pub Chain {}

        #[async_trait]
        impl ChainClient for Chain {
            async fn get_block(&self, height: Option<u64>) -> Result<BlockRef>;
            async fn get_validators(&self) -> Result<Vec<ValidatorSummary>>;
            async fn get_validator(&self, operator_address: &str) -> Result<ValidatorSummary>;
            async fn get_balances(&self, address: &str) -> Result<Vec<Coin>>;
            async fn get_total_delegations(&self, address: &str) -> Result<f64>;
            async fn get_total_unbondings(&self, address: &str) -> Result<f64>;
            async fn get_total_rewards(&self, address: &str) -> Result<f64>;
            async fn get_proposal(&self, id: u64) -> Result<Proposal>;
            async fn get_proposals(&self) -> Result<Vec<Proposal>>;
            async fn denom_info(&self, display_denom: Option<String>) -> Result<DenomInfo>;
        }
    }

    fn named_validator(operator_address: &str, moniker: &str) -> ValidatorSummary {
        ValidatorSummary {
            operator_address: operator_address.to_string(),
            moniker: moniker.to_string(),
            details: String::new(),
            website: String::new(),
            security_contact: String::new(),
            commission_rate: 0.1,
            delegated_shares: 1.0,
            jailed: false,
        }
    }

    #[tokio::test]
    async fn prefixed_query_looks_up_by_address() {
        let mut chain = MockChain::new();
        chain
            .expect_get_validator()
            .withf(|address| address == "testvaloper1abc")
            .times(1)
            .returning(|address| Ok(named_validator(address, "Ignored")));
        chain.expect_get_validators().times(0);

        let found = find_validator(&chain, "testvaloper1abc", "testvaloper")
            .await
            .unwrap();
        assert_eq!(found.operator_address, "testvaloper1abc");
    }

    #[tokio::test]
    async fn unprefixed_query_matches_moniker_case_insensitively() {
        let mut chain = MockChain::new();
        chain.expect_get_validators().times(1).returning(|| {
            Ok(vec![
                named_validator("testvaloper1abc", "Nodes United"),
                named_validator("testvaloper1def", "Lunar Flare"),
            ])
        });

        let found = find_validator(&chain, "lunar", "testvaloper").await.unwrap();
        assert_eq!(found.operator_address, "testvaloper1def");
    }

    #[tokio::test]
    async fn unmatched_moniker_is_not_found() {
        let mut chain = MockChain::new();
        chain
            .expect_get_validators()
            .returning(|| Ok(vec![named_validator("testvaloper1abc", "Nodes United")]));

        assert!(matches!(
            find_validator(&chain, "ghost", "testvaloper").await,
            Err(ChainError::NotFound(_))
        ));
    }
}
