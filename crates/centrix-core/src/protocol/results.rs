//! Typed result records, one per method that returns a body.
//!
//! Decoding ignores unknown fields but fails on type mismatches and on
//! missing required fields. Counters and stream positions default to zero
//! because the server omits zero values.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::protocol::command::Method;
use crate::protocol::reply::ApiError;

/// Ties a result record to the single method that produces it.
pub trait CommandResult: DeserializeOwned {
    const METHOD: Method;
}

/// Result of `publish`: where the publication landed in the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PublishResult {
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub epoch: String,
}

impl CommandResult for PublishResult {
    const METHOD: Method = Method::Publish;
}

/// Per-channel outcome inside a broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublishResponse {
    #[serde(default)]
    pub error: Option<ApiError>,
    #[serde(default)]
    pub result: Option<PublishResult>,
}

/// Result of `broadcast`, ordered like the requested channels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BroadcastResult {
    pub responses: Vec<PublishResponse>,
}

impl CommandResult for BroadcastResult {
    const METHOD: Method = Method::Broadcast;
}

/// One client connection as seen by presence and history.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    #[serde(default)]
    pub user: String,
    pub client: String,
    #[serde(default)]
    pub conn_info: Option<Box<RawValue>>,
    #[serde(default)]
    pub chan_info: Option<Box<RawValue>>,
}

/// Result of `presence`: client id to client info.
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceResult {
    pub presence: HashMap<String, ClientInfo>,
}

impl CommandResult for PresenceResult {
    const METHOD: Method = Method::Presence;
}

/// Result of `presence_stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PresenceStatsResult {
    #[serde(default)]
    pub num_clients: u32,
    #[serde(default)]
    pub num_users: u32,
}

impl CommandResult for PresenceStatsResult {
    const METHOD: Method = Method::PresenceStats;
}

/// A stored publication.
#[derive(Debug, Clone, Deserialize)]
pub struct Publication {
    #[serde(default)]
    pub offset: u64,
    pub data: Box<RawValue>,
    #[serde(default)]
    pub info: Option<ClientInfo>,
}

/// Result of `history`, with the current stream top.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResult {
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub epoch: String,
}

impl CommandResult for HistoryResult {
    const METHOD: Method = Method::History;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub num_clients: u32,
}

/// Result of `channels`: active channel name to its info.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChannelsResult {
    pub channels: HashMap<String, ChannelInfo>,
}

impl CommandResult for ChannelsResult {
    const METHOD: Method = Method::Channels;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub interval: f64,
    #[serde(default)]
    pub items: HashMap<String, f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Process {
    #[serde(default)]
    pub cpu: f64,
    #[serde(default)]
    pub rss: i64,
}

/// Statistics of one running server node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeInfo {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub num_clients: u32,
    #[serde(default)]
    pub num_users: u32,
    #[serde(default)]
    pub num_channels: u32,
    /// Seconds since node start.
    #[serde(default)]
    pub uptime: u32,
    #[serde(default)]
    pub metrics: Option<Metrics>,
    #[serde(default)]
    pub process: Option<Process>,
}

/// Result of `info`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InfoResult {
    pub nodes: Vec<NodeInfo>,
}

impl CommandResult for InfoResult {
    const METHOD: Method = Method::Info;
}
