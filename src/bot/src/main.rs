use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use chain_query::{ChainClient, HttpChainClient};
use chainbot::commands::{self, Ctx};
use chainbot::config::{Args, Config};
use chainbot::telegram::{Message, TelegramClient};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::resolve(args)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .init();

    let chain = HttpChainClient::new(
        &config.tendermint_rpc,
        &config.node_lcd,
        config.query_timeout(),
    )?;
    let denom = chain.denom_info(config.denom.clone()).await?;
    info!(denom = %denom.denom, coefficient = denom.coefficient, "resolved denom info");

    let telegram = Arc::new(TelegramClient::new(&config.telegram_token)?);
    let ctx = Arc::new(Ctx {
        config,
        denom,
        chain: Box::new(chain),
    });

    info!("starting update loop");
    let mut offset = 0i64;
    loop {
        let updates = match telegram.get_updates(offset).await {
            Ok(updates) => updates,
            Err(err) => {
                warn!(%err, "could not fetch updates");
                tokio::time::sleep(Duration::from_secs(5)).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(message) = update.message else {
                continue;
            };
            let ctx = Arc::clone(&ctx);
            let client = Arc::clone(&telegram);
            tokio::spawn(async move {
                handle_message(&ctx, &client, message).await;
            });
        }
    }
}

async fn handle_message(ctx: &Ctx, client: &TelegramClient, message: Message) {
    let Some(text) = message.text.as_deref() else {
        return;
    };
    debug!(
        chat = message.chat.id,
        user = message.from.as_ref().and_then(|user| user.username.as_deref()),
        "incoming message"
    );
    let Some(reply) = commands::dispatch(ctx, text).await else {
        return;
    };
    if let Err(err) = client.send_html(message.chat.id, &reply).await {
        error!(%err, chat = message.chat.id, "could not send reply");
    }
}
