//! Command dispatch. One module per command; every handler is a pure
//! request/response function over the shared context, so handlers for
//! different chats can run concurrently without coordination.

use chain_models::DenomInfo;
use chain_query::ChainClient;

use crate::config::Config;

pub mod about;
pub mod help;
pub mod proposal;
pub mod proposals;
pub mod rate;
pub mod validator;
pub mod wallet;
pub mod wenblock;

/// Read-only state shared by all handlers: configuration resolved at
/// startup, the denom info fetched once from the node, and the query client.
pub struct Ctx {
    pub config: Config,
    pub denom: DenomInfo,
    pub chain: Box<dyn ChainClient>,
}

/// Routes a message to its handler. Returns `None` for anything that is not
/// a known command, so group chatter is ignored.
pub async fn dispatch(ctx: &Ctx, text: &str) -> Option<String> {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let command = parts.next()?;
    let args = parts.next().map(str::trim).filter(|rest| !rest.is_empty());

    // Commands in groups arrive as /command@botname.
    let command = command.split('@').next().unwrap_or(command);

    let reply = match command {
        "/wallet" => wallet::handle(ctx, args).await,
        "/validator" => validator::handle(ctx, args).await,
        "/proposal" => proposal::handle(ctx, args).await,
        "/proposals" => proposals::handle(ctx).await,
        "/wenblock" => wenblock::handle(ctx, args).await,
        "/rate" => rate::handle(ctx).await,
        "/help" | "/start" => help::handle(ctx),
        "/about" => about::handle(),
        _ => return None,
    };
    Some(reply)
}
