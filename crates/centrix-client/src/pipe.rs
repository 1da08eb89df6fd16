//! Pipe: an ordered command buffer sent as one HTTP request.
//!
//! Appends and resets take the same lock, so a concurrent sender always sees
//! whole commands in enqueue order. Each `add_*` builds the method params from
//! its positional arguments plus an options record moved in by value.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use centrix_core::error::Result;
use centrix_core::protocol::command::{
    BroadcastRequest, ChannelRequest, ChannelsRequest, DisconnectRequest, HistoryRequest,
    InfoRequest, SubscribeRequest, UnsubscribeRequest,
};
use centrix_core::protocol::{
    raw_json, ChannelsOptions, Command, DisconnectOptions, HistoryOptions, Method,
    PublishOptions, PublishRequest, Request, SubscribeOptions, UnsubscribeOptions,
};

#[derive(Default)]
struct PipeInner {
    commands: Vec<Command>,
    /// Bumped by every reset so a finished send can tell whether its
    /// snapshot is still the head of the buffer.
    generation: u64,
}

/// Ordered, thread-safe command buffer.
#[derive(Default)]
pub struct Pipe {
    inner: Mutex<PipeInner>,
}

impl Pipe {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PipeInner> {
        // A panic while holding the lock cannot leave a half-pushed command.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().commands.is_empty()
    }

    /// Methods of the buffered commands, in enqueue order.
    pub fn methods(&self) -> Vec<Method> {
        self.lock().commands.iter().map(Command::method).collect()
    }

    /// Discard all unsent commands.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.commands.clear();
        inner.generation = inner.generation.wrapping_add(1);
    }

    /// Append a pre-built command.
    pub fn push(&self, cmd: Command) {
        self.lock().commands.push(cmd);
    }

    fn push_request(&self, request: Request) {
        self.push(Command::new(request));
    }

    pub fn add_publish<T: Serialize + ?Sized>(
        &self,
        channel: &str,
        data: &T,
        options: PublishOptions,
    ) -> Result<()> {
        let req = PublishRequest::new(channel, data)?.with_options(options);
        self.push_request(Request::Publish(req));
        Ok(())
    }

    /// Append one publish command per request, as a single atomic append.
    pub fn add_publish_requests(&self, requests: Vec<PublishRequest>) {
        let commands = requests
            .into_iter()
            .map(|r| Command::new(Request::Publish(r)));
        self.lock().commands.extend(commands);
    }

    pub fn add_broadcast<T: Serialize + ?Sized>(
        &self,
        channels: Vec<String>,
        data: &T,
        options: PublishOptions,
    ) -> Result<()> {
        let req = BroadcastRequest {
            channels,
            data: raw_json(data)?,
            options,
        };
        self.push_request(Request::Broadcast(req));
        Ok(())
    }

    pub fn add_subscribe(&self, channel: &str, user: &str, options: SubscribeOptions) {
        self.push_request(Request::Subscribe(SubscribeRequest {
            channel: channel.to_string(),
            user: user.to_string(),
            options,
        }));
    }

    pub fn add_unsubscribe(&self, channel: &str, user: &str, options: UnsubscribeOptions) {
        self.push_request(Request::Unsubscribe(UnsubscribeRequest {
            channel: channel.to_string(),
            user: user.to_string(),
            options,
        }));
    }

    pub fn add_disconnect(&self, user: &str, options: DisconnectOptions) {
        self.push_request(Request::Disconnect(DisconnectRequest {
            user: user.to_string(),
            options,
        }));
    }

    pub fn add_presence(&self, channel: &str) {
        self.push_request(Request::Presence(ChannelRequest {
            channel: channel.to_string(),
        }));
    }

    pub fn add_presence_stats(&self, channel: &str) {
        self.push_request(Request::PresenceStats(ChannelRequest {
            channel: channel.to_string(),
        }));
    }

    pub fn add_history(&self, channel: &str, options: HistoryOptions) {
        self.push_request(Request::History(HistoryRequest {
            channel: channel.to_string(),
            options,
        }));
    }

    pub fn add_history_remove(&self, channel: &str) {
        self.push_request(Request::HistoryRemove(ChannelRequest {
            channel: channel.to_string(),
        }));
    }

    pub fn add_channels(&self, options: ChannelsOptions) {
        self.push_request(Request::Channels(ChannelsRequest { options }));
    }

    pub fn add_info(&self) {
        self.push_request(Request::Info(InfoRequest {}));
    }

    /// Copy of the buffered commands plus the reset generation they belong to.
    pub(crate) fn snapshot(&self) -> (Vec<Command>, u64) {
        let inner = self.lock();
        (inner.commands.clone(), inner.generation)
    }

    /// Drop the first `sent` commands if no reset happened since `generation`.
    /// Commands appended after the snapshot stay buffered.
    pub(crate) fn consume(&self, sent: usize, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation || inner.commands.len() < sent {
            return false;
        }
        inner.commands.drain(..sent);
        true
    }
}

impl std::fmt::Debug for Pipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipe").field("len", &self.len()).finish()
    }
}
