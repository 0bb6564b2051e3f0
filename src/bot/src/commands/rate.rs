use tracing::{error, info, warn};

use crate::commands::Ctx;
use crate::markets;
use crate::render;

pub async fn handle(ctx: &Ctx) -> String {
    let price = match markets::coingecko_usd(&ctx.config.coingecko_currency).await {
        Ok(price) => price,
        Err(err) => {
            error!(%err, currency = %ctx.config.coingecko_currency, "could not get rate");
            return "Could not get currency rate".to_string();
        }
    };

    let mut out = format!(
        "<code>${price:.3}</code> {}",
        render::link(
            &format!(
                "https://www.coingecko.com/en/coins/{}",
                ctx.config.coingecko_currency
            ),
            "Coingecko"
        )
    );

    // Exchange tickers are opt-in extras; a dead exchange never blocks the
    // primary answer.
    if !ctx.config.ascendex_currency.is_empty() {
        match markets::ascendex_usdt(&ctx.config.ascendex_currency).await {
            Ok(price) => out.push_str(&format!("\n<code>${price:.3}</code> AscendEX")),
            Err(err) => warn!(%err, "could not get AscendEX rate"),
        }
    }
    if !ctx.config.mexc_currency.is_empty() {
        match markets::mexc_usdt(&ctx.config.mexc_currency).await {
            Ok(price) => out.push_str(&format!("\n<code>${price:.3}</code> MEXC")),
            Err(err) => warn!(%err, "could not get MEXC rate"),
        }
    }

    info!(currency = %ctx.config.coingecko_currency, "returned currency info");
    out
}
