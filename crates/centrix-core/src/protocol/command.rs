//! Command envelope (one line of the request stream).
//!
//! Every operation is a [`Request`] variant carrying its own typed params, so
//! the envelope stays payload-agnostic while each method keeps a checked shape.
//! Wire form: `{"uid"?: string, "method": string, "params": object}`.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::Result;
use crate::protocol::options::{
    ChannelsOptions, DisconnectOptions, HistoryOptions, PublishOptions, SubscribeOptions,
    UnsubscribeOptions,
};
use crate::protocol::raw_json;

/// API method names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Publish,
    Broadcast,
    Subscribe,
    Unsubscribe,
    Disconnect,
    Presence,
    PresenceStats,
    History,
    HistoryRemove,
    Channels,
    Info,
}

impl Method {
    /// Name used in the `method` field on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Publish => "publish",
            Method::Broadcast => "broadcast",
            Method::Subscribe => "subscribe",
            Method::Unsubscribe => "unsubscribe",
            Method::Disconnect => "disconnect",
            Method::Presence => "presence",
            Method::PresenceStats => "presence_stats",
            Method::History => "history",
            Method::HistoryRemove => "history_remove",
            Method::Channels => "channels",
            Method::Info => "info",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Params of `publish`. Also the element type of bulk publish.
#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest {
    pub channel: String,
    pub data: Box<RawValue>,
    #[serde(flatten)]
    pub options: PublishOptions,
}

impl PublishRequest {
    /// Build a publish request, encoding `data` immediately.
    pub fn new<T: Serialize + ?Sized>(channel: impl Into<String>, data: &T) -> Result<Self> {
        Ok(Self {
            channel: channel.into(),
            data: raw_json(data)?,
            options: PublishOptions::default(),
        })
    }

    pub fn with_options(mut self, options: PublishOptions) -> Self {
        self.options = options;
        self
    }
}

/// Params of `broadcast`.
#[derive(Debug, Clone, Serialize)]
pub struct BroadcastRequest {
    pub channels: Vec<String>,
    pub data: Box<RawValue>,
    #[serde(flatten)]
    pub options: PublishOptions,
}

/// Params of `subscribe`.
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeRequest {
    pub channel: String,
    pub user: String,
    #[serde(flatten)]
    pub options: SubscribeOptions,
}

/// Params of `unsubscribe`.
#[derive(Debug, Clone, Serialize)]
pub struct UnsubscribeRequest {
    pub channel: String,
    pub user: String,
    #[serde(flatten)]
    pub options: UnsubscribeOptions,
}

/// Params of `disconnect`.
#[derive(Debug, Clone, Serialize)]
pub struct DisconnectRequest {
    pub user: String,
    #[serde(flatten)]
    pub options: DisconnectOptions,
}

/// Params of `presence`, `presence_stats` and `history_remove`.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelRequest {
    pub channel: String,
}

/// Params of `history`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRequest {
    pub channel: String,
    #[serde(flatten)]
    pub options: HistoryOptions,
}

/// Params of `channels`.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelsRequest {
    #[serde(flatten)]
    pub options: ChannelsOptions,
}

/// Params of `info` (always `{}`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct InfoRequest {}

/// One typed operation, method and params together.
#[derive(Debug, Clone)]
pub enum Request {
    Publish(PublishRequest),
    Broadcast(BroadcastRequest),
    Subscribe(SubscribeRequest),
    Unsubscribe(UnsubscribeRequest),
    Disconnect(DisconnectRequest),
    Presence(ChannelRequest),
    PresenceStats(ChannelRequest),
    History(HistoryRequest),
    HistoryRemove(ChannelRequest),
    Channels(ChannelsRequest),
    Info(InfoRequest),
}

impl Request {
    pub fn method(&self) -> Method {
        match self {
            Request::Publish(_) => Method::Publish,
            Request::Broadcast(_) => Method::Broadcast,
            Request::Subscribe(_) => Method::Subscribe,
            Request::Unsubscribe(_) => Method::Unsubscribe,
            Request::Disconnect(_) => Method::Disconnect,
            Request::Presence(_) => Method::Presence,
            Request::PresenceStats(_) => Method::PresenceStats,
            Request::History(_) => Method::History,
            Request::HistoryRemove(_) => Method::HistoryRemove,
            Request::Channels(_) => Method::Channels,
            Request::Info(_) => Method::Info,
        }
    }
}

/// API command envelope. Immutable once appended to a pipe.
#[derive(Debug, Clone)]
pub struct Command {
    uid: Option<String>,
    request: Request,
}

impl Command {
    pub fn new(request: Request) -> Self {
        Self { uid: None, request }
    }

    /// Attach a correlation hint. Serialized only when set.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn method(&self) -> Method {
        self.request.method()
    }

    pub fn request(&self) -> &Request {
        &self.request
    }
}

impl From<Request> for Command {
    fn from(request: Request) -> Self {
        Command::new(request)
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = if self.uid.is_some() { 3 } else { 2 };
        let mut st = serializer.serialize_struct("Command", len)?;
        if let Some(uid) = &self.uid {
            st.serialize_field("uid", uid)?;
        }
        st.serialize_field("method", self.method().as_str())?;
        match &self.request {
            Request::Publish(p) => st.serialize_field("params", p)?,
            Request::Broadcast(p) => st.serialize_field("params", p)?,
            Request::Subscribe(p) => st.serialize_field("params", p)?,
            Request::Unsubscribe(p) => st.serialize_field("params", p)?,
            Request::Disconnect(p) => st.serialize_field("params", p)?,
            Request::Presence(p) | Request::PresenceStats(p) | Request::HistoryRemove(p) => {
                st.serialize_field("params", p)?
            }
            Request::History(p) => st.serialize_field("params", p)?,
            Request::Channels(p) => st.serialize_field("params", p)?,
            Request::Info(p) => st.serialize_field("params", p)?,
        }
        st.end()
    }
}
