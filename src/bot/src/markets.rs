//! Exchange-rate fetchers: Coingecko spot price plus the AscendEX and MEXC
//! tickers. Each call is a one-shot JSON request with a tight timeout.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

const MARKET_TIMEOUT: Duration = Duration::from_secs(2);

fn market_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(MARKET_TIMEOUT)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

#[derive(Debug, Deserialize)]
struct CoingeckoPrice {
    usd: f64,
}

pub async fn coingecko_usd(currency: &str) -> Result<f64> {
    let url = format!(
        "https://api.coingecko.com/api/v3/simple/price?ids={currency}&vs_currencies=usd"
    );
    let prices: HashMap<String, CoingeckoPrice> =
        market_client()?.get(&url).send().await?.json().await?;
    prices
        .get(currency)
        .map(|price| price.usd)
        .ok_or_else(|| anyhow!("currency {currency:?} missing from Coingecko response"))
}

#[derive(Debug, Deserialize)]
struct AscendexResponse {
    data: Vec<AscendexBarhist>,
}

#[derive(Debug, Deserialize)]
struct AscendexBarhist {
    data: AscendexBarhistData,
}

#[derive(Debug, Deserialize)]
struct AscendexBarhistData {
    #[serde(rename = "c")]
    close: String,
}

pub async fn ascendex_usdt(symbol: &str) -> Result<f64> {
    let url = format!(
        "https://ascendex.com/api/pro/v1/barhist?symbol={}/USDT&interval=1&n=1",
        symbol.to_uppercase()
    );
    let response: AscendexResponse = market_client()?.get(&url).send().await?.json().await?;
    let bar = response
        .data
        .first()
        .ok_or_else(|| anyhow!("empty response from AscendEX"))?;
    bar.data
        .close
        .parse::<f64>()
        .map_err(|_| anyhow!("unparseable AscendEX close price: {:?}", bar.data.close))
}

#[derive(Debug, Deserialize)]
struct MexcResponse {
    data: Vec<MexcTicker>,
}

#[derive(Debug, Deserialize)]
struct MexcTicker {
    last: String,
}

pub async fn mexc_usdt(symbol: &str) -> Result<f64> {
    let url = format!(
        "https://www.mexc.com/open/api/v2/market/ticker?symbol={}_USDT",
        symbol.to_uppercase()
    );
    let response: MexcResponse = market_client()?.get(&url).send().await?.json().await?;
    let ticker = response
        .data
        .first()
        .ok_or_else(|| anyhow!("empty response from MEXC"))?;
    ticker
        .last
        .parse::<f64>()
        .map_err(|_| anyhow!("unparseable MEXC last price: {:?}", ticker.last))
}
