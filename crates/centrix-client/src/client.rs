//! API client: sends pipes and exposes single-command helpers.
//!
//! `send_pipe` is the only network path. Every helper builds a one-command
//! pipe, sends it, and decodes the single reply; a server-reported error is
//! returned as `CentrixError::Api` without attempting to decode a result.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use centrix_core::error::{CentrixError, Result};
use centrix_core::protocol::ndjson;
use centrix_core::protocol::{
    BroadcastResult, ChannelsOptions, ChannelsResult, DisconnectOptions, HistoryOptions,
    HistoryResult, InfoResult, PresenceResult, PresenceStatsResult, PublishOptions,
    PublishResult, Reply, SubscribeOptions, UnsubscribeOptions,
};

use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::pipe::Pipe;
use crate::transport::{Endpoint, EndpointResolver, HttpRequest, HttpTransport, ReqwestTransport};

/// Builds a [`Client`] from config plus optional injected collaborators.
pub struct ClientBuilder {
    cfg: ClientConfig,
    resolver: Option<Arc<dyn EndpointResolver>>,
    http: Option<Arc<dyn HttpTransport>>,
}

impl ClientBuilder {
    pub fn new(cfg: ClientConfig) -> Self {
        Self {
            cfg,
            resolver: None,
            http: None,
        }
    }

    /// Resolve the endpoint before every call instead of using `api.addr`.
    pub fn endpoint_resolver(mut self, resolver: Arc<dyn EndpointResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Use this HTTP capability instead of the default `reqwest` one.
    pub fn http_transport(mut self, http: Arc<dyn HttpTransport>) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<Client> {
        self.cfg.validate()?;

        let endpoint = match (self.resolver, self.cfg.api.addr) {
            (Some(resolver), _) => Endpoint::Dynamic(resolver),
            (None, Some(addr)) => Endpoint::Static(addr),
            (None, None) => {
                return Err(CentrixError::Config(
                    "api.addr is required when no endpoint resolver is set".into(),
                ))
            }
        };

        let http: Arc<dyn HttpTransport> = match self.http {
            Some(http) => http,
            None => Arc::new(ReqwestTransport::new(
                Duration::from_millis(self.cfg.api.timeout_ms),
                self.cfg.api.max_idle_per_host,
            )?),
        };

        Ok(Client {
            endpoint,
            api_key: self.cfg.api.key.filter(|k| !k.is_empty()),
            http,
            reset_on_send: self.cfg.pipe.reset_on_send,
        })
    }
}

/// Client of the server HTTP API.
pub struct Client {
    endpoint: Endpoint,
    api_key: Option<String>,
    http: Arc<dyn HttpTransport>,
    reset_on_send: bool,
}

impl Client {
    /// Client with the default HTTP transport.
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        ClientBuilder::new(cfg).build()
    }

    pub fn builder(cfg: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(cfg)
    }

    /// Swap the HTTP capability. Takes `&mut self`, so it cannot overlap a send.
    pub fn set_http_transport(&mut self, http: Arc<dyn HttpTransport>) {
        self.http = http;
    }

    /// Fresh, empty pipe.
    pub fn pipe(&self) -> Pipe {
        Pipe::new()
    }

    /// Send every command buffered in `pipe` in one request.
    ///
    /// Returns one reply per command, in enqueue order. Per-command errors
    /// stay inside their reply and must be checked by the caller. Whether
    /// the pipe is cleared afterwards follows `pipe.reset_on_send`.
    pub async fn send_pipe(&self, ctx: &CallContext, pipe: &Pipe) -> Result<Vec<Reply>> {
        let (commands, generation) = pipe.snapshot();
        if commands.is_empty() {
            return Err(CentrixError::PipeEmpty);
        }
        ctx.check()?;

        let body = ndjson::encode_commands(&commands)?;
        let url = self.endpoint.resolve()?;

        let mut headers = vec![("Content-Type", "application/json".to_string())];
        if let Some(key) = &self.api_key {
            headers.push(("Authorization", format!("apikey {key}")));
        }

        tracing::debug!(commands = commands.len(), endpoint = %url, "sending pipe");
        let resp = ctx
            .run(self.http.post(HttpRequest { url, headers, body }))
            .await?;

        if resp.status != 200 {
            tracing::warn!(status = resp.status, "api request failed");
            return Err(CentrixError::StatusCode(resp.status));
        }

        let replies = ndjson::decode_replies_exact(&resp.body, commands.len())?;
        tracing::debug!(replies = replies.len(), "pipe replies decoded");

        if self.reset_on_send && !pipe.consume(commands.len(), generation) {
            tracing::debug!("pipe reset during send, buffer left untouched");
        }
        Ok(replies)
    }

    async fn send_one(&self, ctx: &CallContext, pipe: Pipe) -> Result<Reply> {
        let mut replies = self.send_pipe(ctx, &pipe).await?;
        match (replies.pop(), replies.is_empty()) {
            (Some(reply), true) => Ok(reply),
            _ => Err(CentrixError::MalformedResponse(
                "expected exactly one reply".into(),
            )),
        }
    }

    /// Publish data into a channel.
    pub async fn publish<T: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        channel: &str,
        data: &T,
        options: PublishOptions,
    ) -> Result<PublishResult> {
        let pipe = self.pipe();
        pipe.add_publish(channel, data, options)?;
        self.send_one(ctx, pipe).await?.decode()
    }

    /// Publish the same data into many channels.
    pub async fn broadcast<T: Serialize + ?Sized>(
        &self,
        ctx: &CallContext,
        channels: Vec<String>,
        data: &T,
        options: PublishOptions,
    ) -> Result<BroadcastResult> {
        let pipe = self.pipe();
        pipe.add_broadcast(channels, data, options)?;
        self.send_one(ctx, pipe).await?.decode()
    }

    /// Subscribe a user to a channel (server-side subscription).
    pub async fn subscribe(
        &self,
        ctx: &CallContext,
        channel: &str,
        user: &str,
        options: SubscribeOptions,
    ) -> Result<()> {
        let pipe = self.pipe();
        pipe.add_subscribe(channel, user, options);
        self.send_one(ctx, pipe).await?.check()
    }

    pub async fn unsubscribe(
        &self,
        ctx: &CallContext,
        channel: &str,
        user: &str,
        options: UnsubscribeOptions,
    ) -> Result<()> {
        let pipe = self.pipe();
        pipe.add_unsubscribe(channel, user, options);
        self.send_one(ctx, pipe).await?.check()
    }

    /// Close user connections.
    pub async fn disconnect(
        &self,
        ctx: &CallContext,
        user: &str,
        options: DisconnectOptions,
    ) -> Result<()> {
        let pipe = self.pipe();
        pipe.add_disconnect(user, options);
        self.send_one(ctx, pipe).await?.check()
    }

    pub async fn presence(&self, ctx: &CallContext, channel: &str) -> Result<PresenceResult> {
        let pipe = self.pipe();
        pipe.add_presence(channel);
        self.send_one(ctx, pipe).await?.decode()
    }

    /// Presence counters only.
    pub async fn presence_stats(
        &self,
        ctx: &CallContext,
        channel: &str,
    ) -> Result<PresenceStatsResult> {
        let pipe = self.pipe();
        pipe.add_presence_stats(channel);
        self.send_one(ctx, pipe).await?.decode()
    }

    pub async fn history(
        &self,
        ctx: &CallContext,
        channel: &str,
        options: HistoryOptions,
    ) -> Result<HistoryResult> {
        let pipe = self.pipe();
        pipe.add_history(channel, options);
        self.send_one(ctx, pipe).await?.decode()
    }

    pub async fn history_remove(&self, ctx: &CallContext, channel: &str) -> Result<()> {
        let pipe = self.pipe();
        pipe.add_history_remove(channel);
        self.send_one(ctx, pipe).await?.check()
    }

    /// Active channels (one or more subscribers).
    pub async fn channels(
        &self,
        ctx: &CallContext,
        options: ChannelsOptions,
    ) -> Result<ChannelsResult> {
        let pipe = self.pipe();
        pipe.add_channels(options);
        self.send_one(ctx, pipe).await?.decode()
    }

    /// Running server nodes and their stats.
    pub async fn info(&self, ctx: &CallContext) -> Result<InfoResult> {
        let pipe = self.pipe();
        pipe.add_info();
        self.send_one(ctx, pipe).await?.decode()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("reset_on_send", &self.reset_on_send)
            .finish()
    }
}
