use crate::commands::Ctx;
use crate::render;

pub fn handle(ctx: &Ctx) -> String {
    let mut out = String::new();
    out.push_str("<strong>chainbot</strong>\n\n");
    out.push_str(&format!(
        "Query for the {} network info.\n",
        ctx.config.network_name
    ));
    out.push_str("Can understand the following commands:\n");
    out.push_str("- /wallet &lt;wallet address&gt; - get the wallet info (balance, delegated amount, rewards etc.)\n");
    out.push_str("- /validator &lt;validator address or name&gt; - get validator info\n");
    out.push_str("- /proposal &lt;proposal ID&gt; - get the proposal info\n");
    out.push_str("- /proposals - proposals list\n");
    out.push_str("- /wenblock &lt;block height&gt; - when a block was, or will be, produced\n");
    out.push_str("- /rate - get the exchange rate to USD\n");
    out.push_str("- /help - display this message\n");
    out.push_str("- /about - get info about this bot\n\n");
    out.push_str("<strong>Useful links:</strong>\n");
    out.push_str(&format!(
        "{} - the network explorer\n",
        render::mintscan_link(&ctx.config.mintscan_prefix, "", "Mintscan")
    ));
    out.push_str(&format!(
        "{} - exchange rate\n",
        render::link(
            &format!(
                "https://www.coingecko.com/en/coins/{}",
                ctx.config.coingecko_currency
            ),
            "Coingecko"
        )
    ));
    out
}
