//! Protocol modules for the server HTTP API.
//!
//! - [`command`]: the request envelope and typed per-method params.
//! - [`options`]: optional-parameter builders merged into params.
//! - [`reply`]: the response envelope and server-reported errors.
//! - [`results`]: typed result records and their decoders.
//! - [`ndjson`]: newline-delimited JSON stream codec.
//!
//! All decoders are panic-free: malformed input is reported as `CentrixError`.

pub mod command;
pub mod ndjson;
pub mod options;
pub mod reply;
pub mod results;

use serde::Serialize;
use serde_json::value::RawValue;

use crate::error::{CentrixError, Result};

pub use command::{Command, Method, PublishRequest, Request};
pub use options::{
    ChannelsOptions, Disconnect, DisconnectOptions, HistoryOptions, PublishOptions,
    StreamPosition, SubscribeOptions, UnsubscribeOptions, NO_LIMIT,
};
pub use reply::{ApiError, Reply};
pub use results::{
    BroadcastResult, ChannelInfo, ChannelsResult, ClientInfo, CommandResult, HistoryResult,
    InfoResult, Metrics, NodeInfo, PresenceResult, PresenceStatsResult, Process, Publication,
    PublishResponse, PublishResult,
};

/// Serialize any value into a raw JSON payload.
///
/// Used for `data`/`info` fields so they are encoded once, at enqueue time.
pub fn raw_json<T: Serialize + ?Sized>(value: &T) -> Result<Box<RawValue>> {
    serde_json::value::to_raw_value(value)
        .map_err(|e| CentrixError::Encode(format!("json encode failed: {e}")))
}

/// Validate an already-encoded JSON document and keep it verbatim.
pub fn raw_json_str(json: &str) -> Result<Box<RawValue>> {
    RawValue::from_string(json.to_owned())
        .map_err(|e| CentrixError::Encode(format!("invalid json payload: {e}")))
}
