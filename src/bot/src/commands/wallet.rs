use tracing::{debug, error, warn};

use crate::commands::Ctx;
use crate::render;

pub async fn handle(ctx: &Ctx, args: Option<&str>) -> String {
    let Some(address) = args else {
        return "Usage: /wallet &lt;wallet address&gt;".to_string();
    };
    debug!(address, "wallet query");

    let balances = match ctx.chain.get_balances(address).await {
        Ok(balances) => balances,
        Err(err) => {
            error!(%err, address, "could not get balance");
            return "Could not get wallet balance".to_string();
        }
    };

    // Totals degrade to zero individually so a partial answer still goes
    // out; the fallback is decided here, not inside the client.
    let delegated = ctx
        .chain
        .get_total_delegations(address)
        .await
        .unwrap_or_else(|err| {
            warn!(%err, address, "could not get delegations");
            0.0
        });
    let unbonding = ctx
        .chain
        .get_total_unbondings(address)
        .await
        .unwrap_or_else(|err| {
            warn!(%err, address, "could not get unbondings");
            0.0
        });
    let rewards = ctx
        .chain
        .get_total_rewards(address)
        .await
        .unwrap_or_else(|err| {
            warn!(%err, address, "could not get rewards");
            0.0
        });

    let mut out = String::new();
    out.push_str(&format!("{}\n", render::code(address)));
    out.push_str(&format!(
        "{}\n\n",
        render::mintscan_link(
            &ctx.config.mintscan_prefix,
            &format!("account/{address}"),
            "Mintscan"
        )
    ));

    out.push_str("<strong>Balance:        </strong>");
    for coin in &balances {
        out.push_str(&render::amount_cell(coin.amount, &ctx.denom));
        out.push(' ');
    }

    out.push_str(&format!(
        "\n<strong>Total delegated: </strong>{}",
        render::amount_cell(delegated, &ctx.denom)
    ));
    out.push_str(&format!(
        "\n<strong>Total unbonding: </strong>{}",
        render::amount_cell(unbonding, &ctx.denom)
    ));
    out.push_str(&format!(
        "\n<strong>Total rewards:  </strong>{}",
        render::amount_cell(rewards, &ctx.denom)
    ));

    out
}
