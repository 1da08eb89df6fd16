//! centrix demo
//!
//! Loads `centrix.yaml` (or the path in `CENTRIX_CONFIG`), then walks through
//! the API: publish, presence, history, channels, info, broadcast, and one
//! pipe carrying three publishes in a single request.

use std::time::Duration;

use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use centrix_client::{config, CallContext, Client};
use centrix_core::error::Result;
use centrix_core::protocol::{ChannelsOptions, HistoryOptions, PublishOptions};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let path = std::env::var("CENTRIX_CONFIG").unwrap_or_else(|_| "centrix.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let client = Client::new(cfg)?;
    let ctx = CallContext::background().with_timeout(Duration::from_secs(5));

    let ch = "chat:index";

    let res = client
        .publish(&ctx, ch, &json!({"input": "test"}), PublishOptions::new())
        .await?;
    tracing::info!(channel = ch, offset = res.offset, epoch = %res.epoch, "published");

    let presence = client.presence(&ctx, ch).await?;
    tracing::info!(channel = ch, subscribers = presence.presence.len(), "presence");

    let stats = client.presence_stats(&ctx, ch).await?;
    tracing::info!(
        channel = ch,
        users = stats.num_users,
        clients = stats.num_clients,
        "presence stats"
    );

    let history = client.history(&ctx, ch, HistoryOptions::new()).await?;
    tracing::info!(channel = ch, publications = history.publications.len(), "history");

    let channels = client.channels(&ctx, ChannelsOptions::new()).await?;
    tracing::info!(active = channels.channels.len(), "channels");

    let info = client.info(&ctx).await?;
    tracing::info!(nodes = info.nodes.len(), "info");

    let targets = vec!["chat_1".to_string(), "chat_2".to_string(), "chat_3".to_string()];
    let n = targets.len();
    client
        .broadcast(&ctx, targets, &json!({"input": "test"}), PublishOptions::new())
        .await?;
    tracing::info!(channels = n, "broadcast");

    client.history_remove(&ctx, ch).await?;
    tracing::info!(channel = ch, "history removed");

    let pipe = client.pipe();
    for input in ["test1", "test2", "test3"] {
        pipe.add_publish(ch, &json!({ "input": input }), PublishOptions::new())?;
    }
    let replies = client.send_pipe(&ctx, &pipe).await?;
    for (idx, reply) in replies.iter().enumerate() {
        if let Err(e) = reply.check() {
            tracing::warn!(idx, error = %e, "pipe reply failed");
        }
    }
    tracing::info!(commands = replies.len(), "pipe sent in one request");

    Ok(())
}
