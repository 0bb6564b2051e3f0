use tracing::{debug, error, info};

use chain_query::{find_validator, ranking};

use crate::commands::Ctx;
use crate::render;

pub async fn handle(ctx: &Ctx, args: Option<&str>) -> String {
    let Some(query) = args else {
        return "Usage: /validator &lt;validator address or name&gt;".to_string();
    };
    debug!(query, "validator query");

    let validator =
        match find_validator(ctx.chain.as_ref(), query, &ctx.config.bech.validator).await {
            Ok(validator) => validator,
            Err(err) => {
                error!(%err, query, "could not get validator");
                return "Could not find validator".to_string();
            }
        };

    // Rank is meaningless for a jailed validator, so the set is not even
    // fetched for one.
    let rank_line = if validator.jailed {
        "<strong>Rank: </strong>JAILED\n".to_string()
    } else {
        let set = match ctx.chain.get_validators().await {
            Ok(set) => set,
            Err(err) => {
                error!(%err, query, "could not get validator set");
                return "Could not find validator rank".to_string();
            }
        };
        match ranking::rank(&validator.operator_address, &set) {
            Ok(rank) => format!("<strong>Rank: </strong>{rank}\n"),
            Err(err) => {
                error!(%err, query, "could not get validator rank");
                return "Could not find validator rank".to_string();
            }
        }
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", render::code(&validator.moniker)));
    out.push_str(&format!(
        "{}\n\n",
        render::mintscan_link(
            &ctx.config.mintscan_prefix,
            &format!("validators/{}", validator.operator_address),
            "Mintscan"
        )
    ));

    out.push_str(&format!(
        "<strong>Moniker: </strong>{}\n",
        render::code(&validator.moniker)
    ));
    out.push_str(&format!(
        "<strong>Operator address: </strong>{}\n",
        render::code(&validator.operator_address)
    ));
    out.push_str(&format!(
        "<strong>Description: </strong>{}\n",
        render::code(&validator.details)
    ));
    out.push_str(&format!(
        "<strong>Website: </strong>{}\n",
        render::code(&validator.website)
    ));
    out.push_str(&format!(
        "<strong>Security contact: </strong>{}\n",
        render::code(&validator.security_contact)
    ));
    out.push_str(&format!(
        "<strong>Commission rate: </strong><code>{:.1}%</code>\n",
        validator.commission_rate * 100.0
    ));
    out.push_str(&format!(
        "\n<strong>Total tokens delegated: </strong><code>{:.1} {}</code>\n",
        ctx.denom.display_amount(validator.delegated_shares),
        ctx.denom.denom
    ));
    out.push_str(&rank_line);

    info!(
        query,
        validator = %validator.operator_address,
        "returned validator info"
    );
    out
}
