//! Optional-parameter builders.
//!
//! Each options record starts empty (`Default`) and every setter overwrites
//! exactly one field, so the last call for a field wins. Unset fields are
//! omitted from the wire payload. Records are moved into a request by value;
//! a buffered command never observes later changes to a caller's copy.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// History limit meaning "return every publication in the stream".
pub const NO_LIMIT: i32 = -1;

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

/// Position inside a channel publication stream, used for recovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamPosition {
    /// Incremental publication offset.
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub offset: u64,
    /// Identifies one incarnation of the stream. A stream lost and rebuilt by
    /// the server gets a new epoch, which makes recovery across it detectable.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub epoch: String,
}

impl StreamPosition {
    pub fn new(offset: u64, epoch: impl Into<String>) -> Self {
        Self {
            offset,
            epoch: epoch.into(),
        }
    }
}

/// Options of `publish` and `broadcast`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishOptions {
    #[serde(skip_serializing_if = "is_false")]
    pub skip_history: bool,
}

impl PublishOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_history(mut self, skip: bool) -> Self {
        self.skip_history = skip;
        self
    }
}

/// Per-subscription options of `subscribe`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscribeOptions {
    /// Custom channel info attached to the subscription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<Box<RawValue>>,
    /// Participate in channel presence.
    #[serde(skip_serializing_if = "is_false")]
    pub presence: bool,
    /// Emit join/leave messages for this client.
    #[serde(skip_serializing_if = "is_false")]
    pub join_leave: bool,
    /// Track the client's stream position.
    #[serde(skip_serializing_if = "is_false")]
    pub position: bool,
    /// Recover missed publications on resubscribe. Implies position tracking.
    #[serde(skip_serializing_if = "is_false")]
    pub recover: bool,
    /// Data sent to the client with the subscribe push.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<RawValue>>,
    /// Subscribe and recover from this position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recover_since: Option<StreamPosition>,
    /// Subscribe only this client connection of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl SubscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(mut self, info: Box<RawValue>) -> Self {
        self.info = Some(info);
        self
    }

    pub fn presence(mut self, enabled: bool) -> Self {
        self.presence = enabled;
        self
    }

    pub fn join_leave(mut self, enabled: bool) -> Self {
        self.join_leave = enabled;
        self
    }

    pub fn position(mut self, enabled: bool) -> Self {
        self.position = enabled;
        self
    }

    pub fn recover(mut self, enabled: bool) -> Self {
        self.recover = enabled;
        self
    }

    pub fn data(mut self, data: Box<RawValue>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn recover_since(mut self, since: StreamPosition) -> Self {
        self.recover_since = Some(since);
        self
    }

    pub fn client(mut self, client_id: impl Into<String>) -> Self {
        self.client = Some(client_id.into());
        self
    }
}

/// Options of `unsubscribe`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnsubscribeOptions {
    /// Unsubscribe only this client connection of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl UnsubscribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: impl Into<String>) -> Self {
        self.client = Some(client_id.into());
        self
    }
}

/// Custom disconnect sent to the client.
///
/// Travels inside the WebSocket close frame reason, so its JSON form should
/// stay under 127 bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disconnect {
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub code: u32,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub reconnect: bool,
}

/// Options of `disconnect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisconnectOptions {
    /// Server default (force, no reconnect) when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disconnect: Option<Disconnect>,
    /// Client ids to keep connected.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub whitelist: Vec<String>,
    /// Disconnect only this client connection of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
}

impl DisconnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disconnect(mut self, disconnect: Disconnect) -> Self {
        self.disconnect = Some(disconnect);
        self
    }

    pub fn whitelist(mut self, client_ids: Vec<String>) -> Self {
        self.whitelist = client_ids;
        self
    }

    pub fn client(mut self, client_id: impl Into<String>) -> Self {
        self.client = Some(client_id.into());
        self
    }
}

/// Options of `history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryOptions {
    /// Return publications after this position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<StreamPosition>,
    /// `NO_LIMIT` for everything, `0` for the stream top only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(skip_serializing_if = "is_false")]
    pub reverse: bool,
}

impl HistoryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, position: StreamPosition) -> Self {
        self.since = Some(position);
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }
}

/// Options of `channels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelsOptions {
    /// Glob-like filter applied by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ChannelsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}
