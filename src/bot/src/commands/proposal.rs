use tracing::{debug, error, info};

use chain_models::Proposal;

use crate::commands::Ctx;
use crate::render;

pub async fn handle(ctx: &Ctx, args: Option<&str>) -> String {
    let Some(id_arg) = args else {
        return "Usage: /proposal &lt;proposal ID&gt;".to_string();
    };

    let id: u64 = match id_arg.trim().parse() {
        Ok(id) => id,
        Err(_) => {
            debug!(id_arg, "unparseable proposal id");
            return "Proposal ID should be a number".to_string();
        }
    };

    let proposal = match ctx.chain.get_proposal(id).await {
        Ok(proposal) => proposal,
        Err(err) => {
            error!(%err, id, "could not get proposal");
            return "Could not find proposal".to_string();
        }
    };

    info!(id, "returned proposal info");
    serialize(&proposal, &ctx.config.mintscan_prefix)
}

fn serialize(proposal: &Proposal, mintscan_prefix: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("<strong>Proposal #{}</strong>\n", proposal.id));
    out.push_str(&format!("{}\n", render::code(&proposal.title)));
    out.push_str(&format!(
        "Submit time:   <code>{}</code>\n",
        proposal.submit_time.to_rfc2822()
    ));
    out.push_str(&format!(
        "Deposit time:  <code>{}</code>\n",
        proposal.deposit_end_time.to_rfc2822()
    ));
    out.push_str(&format!(
        "Voting starts: <code>{}</code>\n",
        proposal.voting_start_time.to_rfc2822()
    ));
    out.push_str(&format!(
        "Voting ends:   <code>{}</code>\n",
        proposal.voting_end_time.to_rfc2822()
    ));
    out.push_str(&format!("Status: {}\n", render::code(&proposal.status)));
    out.push_str(&format!(
        "{}\n\n",
        render::mintscan_link(
            mintscan_prefix,
            &format!("proposals/{}", proposal.id),
            "Mintscan"
        )
    ));
    out.push_str(&format!("<pre>{}</pre>", render::escape(&proposal.description)));
    out
}
