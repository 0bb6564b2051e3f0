//! Startup configuration.
//!
//! Command-line flags win over the optional toml config file, which wins
//! over the built-in defaults. The resolved [`Config`] is immutable and
//! passed by reference for the lifetime of the process.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;

#[derive(Parser, Debug, Default)]
#[command(
    name = "chainbot",
    about = "Telegram bot that answers queries about a Cosmos-SDK chain"
)]
pub struct Args {
    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Logging level
    #[arg(long)]
    pub log_level: Option<String>,
    /// Tendermint RPC endpoint of the node
    #[arg(long)]
    pub tendermint_rpc: Option<String>,
    /// LCD REST endpoint of the node
    #[arg(long)]
    pub node_lcd: Option<String>,
    /// Telegram bot token
    #[arg(long)]
    pub telegram_token: Option<String>,
    /// Prefix for mintscan links like https://mintscan.io/{prefix}
    #[arg(long)]
    pub mintscan_prefix: Option<String>,
    /// Human-readable network name shown in /help
    #[arg(long)]
    pub network_name: Option<String>,
    /// Coingecko currency id
    #[arg(long)]
    pub coingecko_currency: Option<String>,
    /// AscendEX ticker symbol, empty to skip the AscendEX rate
    #[arg(long)]
    pub ascendex_currency: Option<String>,
    /// MEXC ticker symbol, empty to skip the MEXC rate
    #[arg(long)]
    pub mexc_currency: Option<String>,
    /// Display denomination override
    #[arg(long)]
    pub denom: Option<String>,
    /// Bech32 global prefix
    #[arg(long)]
    pub bech_prefix: Option<String>,
    /// Bech32 account prefix
    #[arg(long)]
    pub bech_account_prefix: Option<String>,
    /// Bech32 account pubkey prefix
    #[arg(long)]
    pub bech_account_pubkey_prefix: Option<String>,
    /// Bech32 validator prefix
    #[arg(long)]
    pub bech_validator_prefix: Option<String>,
    /// Bech32 validator pubkey prefix
    #[arg(long)]
    pub bech_validator_pubkey_prefix: Option<String>,
    /// Bech32 consensus node prefix
    #[arg(long)]
    pub bech_consensus_node_prefix: Option<String>,
    /// Bech32 consensus node pubkey prefix
    #[arg(long)]
    pub bech_consensus_node_pubkey_prefix: Option<String>,
}

/// Optional file-level settings, same names as the flags.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub log_level: Option<String>,
    pub tendermint_rpc: Option<String>,
    pub node_lcd: Option<String>,
    pub telegram_token: Option<String>,
    pub mintscan_prefix: Option<String>,
    pub network_name: Option<String>,
    pub coingecko_currency: Option<String>,
    pub ascendex_currency: Option<String>,
    pub mexc_currency: Option<String>,
    pub denom: Option<String>,
    pub bech_prefix: Option<String>,
    pub bech_account_prefix: Option<String>,
    pub bech_account_pubkey_prefix: Option<String>,
    pub bech_validator_prefix: Option<String>,
    pub bech_validator_pubkey_prefix: Option<String>,
    pub bech_consensus_node_prefix: Option<String>,
    pub bech_consensus_node_pubkey_prefix: Option<String>,
}

/// Bech32 address prefixes; some networks override individual prefixes
/// instead of deriving everything from the global one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BechPrefixes {
    pub account: String,
    pub account_pubkey: String,
    pub validator: String,
    pub validator_pubkey: String,
    pub consensus_node: String,
    pub consensus_node_pubkey: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub tendermint_rpc: String,
    pub node_lcd: String,
    pub telegram_token: String,
    pub mintscan_prefix: String,
    pub network_name: String,
    pub coingecko_currency: String,
    pub ascendex_currency: String,
    pub mexc_currency: String,
    pub denom: Option<String>,
    pub bech: BechPrefixes,
}

fn pick(cli: Option<String>, file: Option<String>, default: &str) -> String {
    cli.or(file).unwrap_or_else(|| default.to_string())
}

impl Config {
    /// Loads the config file (when given) and merges it under the flags.
    pub fn resolve(args: Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("could not read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("could not parse config file {}", path.display()))?
            }
            None => FileConfig::default(),
        };
        let config = Self::merge(args, file);
        if config.telegram_token.is_empty() {
            bail!("telegram token is not set");
        }
        Ok(config)
    }

    fn merge(args: Args, file: FileConfig) -> Self {
        let bech_prefix = pick(args.bech_prefix, file.bech_prefix, "persistence");
        let bech = BechPrefixes {
            account: pick(args.bech_account_prefix, file.bech_account_prefix, &bech_prefix),
            account_pubkey: pick(
                args.bech_account_pubkey_prefix,
                file.bech_account_pubkey_prefix,
                &format!("{bech_prefix}pub"),
            ),
            validator: pick(
                args.bech_validator_prefix,
                file.bech_validator_prefix,
                &format!("{bech_prefix}valoper"),
            ),
            validator_pubkey: pick(
                args.bech_validator_pubkey_prefix,
                file.bech_validator_pubkey_prefix,
                &format!("{bech_prefix}valoperpub"),
            ),
            consensus_node: pick(
                args.bech_consensus_node_prefix,
                file.bech_consensus_node_prefix,
                &format!("{bech_prefix}valcons"),
            ),
            consensus_node_pubkey: pick(
                args.bech_consensus_node_pubkey_prefix,
                file.bech_consensus_node_pubkey_prefix,
                &format!("{bech_prefix}valconspub"),
            ),
        };

        Self {
            log_level: pick(args.log_level, file.log_level, "info"),
            tendermint_rpc: pick(
                args.tendermint_rpc,
                file.tendermint_rpc,
                "http://localhost:26657",
            ),
            node_lcd: pick(args.node_lcd, file.node_lcd, "http://localhost:1317"),
            telegram_token: pick(args.telegram_token, file.telegram_token, ""),
            mintscan_prefix: pick(args.mintscan_prefix, file.mintscan_prefix, "persistence"),
            network_name: pick(args.network_name, file.network_name, "Persistence"),
            coingecko_currency: pick(
                args.coingecko_currency,
                file.coingecko_currency,
                "persistence",
            ),
            ascendex_currency: pick(args.ascendex_currency, file.ascendex_currency, ""),
            mexc_currency: pick(args.mexc_currency, file.mexc_currency, ""),
            denom: args.denom.or(file.denom),
            bech,
        }
    }

    /// Per-query timeout against the node; failures are reported to the
    /// user, never retried.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_derive_from_the_global_prefix() {
        let args = Args {
            bech_prefix: Some("iris".to_string()),
            telegram_token: Some("token".to_string()),
            ..Args::default()
        };
        let config = Config::merge(args, FileConfig::default());

        assert_eq!(config.bech.account, "iris");
        assert_eq!(config.bech.account_pubkey, "irispub");
        assert_eq!(config.bech.validator, "irisvaloper");
        assert_eq!(config.bech.validator_pubkey, "irisvaloperpub");
        assert_eq!(config.bech.consensus_node, "irisvalcons");
        assert_eq!(config.bech.consensus_node_pubkey, "irisvalconspub");
    }

    #[test]
    fn explicit_prefix_overrides_win() {
        let args = Args {
            bech_prefix: Some("iris".to_string()),
            bech_validator_prefix: Some("iva".to_string()),
            ..Args::default()
        };
        let config = Config::merge(args, FileConfig::default());

        assert_eq!(config.bech.validator, "iva");
        assert_eq!(config.bech.account, "iris");
    }

    #[test]
    fn flags_beat_file_values_beat_defaults() {
        let args = Args {
            log_level: Some("debug".to_string()),
            ..Args::default()
        };
        let file = FileConfig {
            log_level: Some("trace".to_string()),
            network_name: Some("Sentinel".to_string()),
            ..FileConfig::default()
        };
        let config = Config::merge(args, file);

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.network_name, "Sentinel");
        assert_eq!(config.tendermint_rpc, "http://localhost:26657");
    }

    #[test]
    fn missing_telegram_token_is_an_error() {
        let args = Args::default();
        assert!(Config::resolve(args).is_err());
    }
}
