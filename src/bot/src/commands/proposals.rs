use tracing::{error, info};

use chain_models::Proposal;

use crate::commands::Ctx;
use crate::render;

pub async fn handle(ctx: &Ctx) -> String {
    let proposals = match ctx.chain.get_proposals().await {
        Ok(proposals) => proposals,
        Err(err) => {
            error!(%err, "could not get proposals");
            return "Could not get proposals".to_string();
        }
    };

    if proposals.is_empty() {
        return "There are no proposals on this chain yet".to_string();
    }

    info!(count = proposals.len(), "returned proposals list");
    proposals
        .iter()
        .map(|proposal| serialize_short(proposal, &ctx.config.mintscan_prefix))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn serialize_short(proposal: &Proposal, mintscan_prefix: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("<strong>Proposal #{}</strong>\n", proposal.id));
    out.push_str(&format!("{}\n", render::code(&proposal.title)));
    out.push_str(&format!("Status: {}\n", render::code(&proposal.status)));
    out.push_str(&format!(
        "{}\n",
        render::mintscan_link(
            mintscan_prefix,
            &format!("proposals/{}", proposal.id),
            "Mintscan"
        )
    ));
    out.push_str(&format!("More info: <code>/proposal {}</code>", proposal.id));
    out
}
