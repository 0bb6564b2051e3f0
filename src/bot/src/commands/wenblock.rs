use chrono::Utc;
use tracing::{debug, error, warn};

use chain_models::Estimate;
use chain_query::blocktime::{self, REFERENCE_OFFSET};

use crate::commands::Ctx;
use crate::render;

pub async fn handle(ctx: &Ctx, args: Option<&str>) -> String {
    let Some(height_arg) = args else {
        return "Usage: /wenblock &lt;block height&gt;".to_string();
    };

    let target: u64 = match height_arg.trim().parse() {
        Ok(height) => height,
        Err(_) => {
            debug!(height_arg, "unparseable block height");
            return "Block height should be a number!".to_string();
        }
    };

    let latest = match ctx.chain.get_block(None).await {
        Ok(block) => block,
        Err(err) => {
            error!(%err, "could not get latest block");
            return "Could not get block info".to_string();
        }
    };

    // Past blocks are reported from their exact header, future ones are
    // extrapolated from the recent average block time.
    if target <= latest.height {
        debug!(target, latest = latest.height, "block is in the past");
        let block = match ctx.chain.get_block(Some(target)).await {
            Ok(block) => block,
            Err(err) => {
                error!(%err, target, "could not get past block");
                return "Could not get block info".to_string();
            }
        };

        let mut out = describe(target, &blocktime::elapsed(&block, Utc::now()));
        out.push_str(&format!(
            "{}\n",
            render::mintscan_link(
                &ctx.config.mintscan_prefix,
                &format!("blocks/{target}"),
                "Mintscan"
            )
        ));
        return out;
    }

    let reference_height = match blocktime::reference_height(latest.height, REFERENCE_OFFSET) {
        Ok(height) => height,
        Err(err) => {
            warn!(%err, latest = latest.height, "not enough history for an estimate");
            return "The chain is too young to estimate an average block time".to_string();
        }
    };
    let reference = match ctx.chain.get_block(Some(reference_height)).await {
        Ok(block) => block,
        Err(err) => {
            error!(%err, reference_height, "could not get reference block");
            return "Could not get block info".to_string();
        }
    };

    match blocktime::estimate(target, &latest, &reference) {
        Ok(estimate) => describe(target, &estimate),
        Err(err) => {
            error!(%err, target, "could not estimate block time");
            "Could not estimate block time".to_string()
        }
    }
}

fn describe(height: u64, estimate: &Estimate) -> String {
    let mut out = format!("<strong>Block #{height}</strong>\n");
    match estimate {
        Estimate::Past {
            produced_at,
            elapsed,
        } => {
            out.push_str(&format!(
                "<strong>Generation time: </strong><code>{}</code>\n",
                produced_at.to_rfc2822()
            ));
            out.push_str(&format!(
                "<code>{}</code> in the past.\n",
                render::human_duration(*elapsed)
            ));
        }
        Estimate::Future { eta, remaining } => {
            out.push_str(&format!(
                "<strong>Generation time: </strong><code>{}</code>\n",
                eta.to_rfc2822()
            ));
            out.push_str(&format!(
                "<code>{}</code> in the future.\n",
                render::human_duration(*remaining)
            ));
        }
    }
    out
}
