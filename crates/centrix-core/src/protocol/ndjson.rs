//! Newline-delimited JSON stream codec.
//!
//! Requests: each command is encoded independently, one per line.
//! Responses: decoded as a stream of JSON values with an incremental
//! deserializer, never by splitting on `\n` (string payloads may carry
//! escaped newlines and servers may pretty-print).

use bytes::Bytes;
use serde_json::Deserializer;

use crate::error::{CentrixError, Result};
use crate::protocol::command::Command;
use crate::protocol::reply::Reply;

/// Encode commands as a request body, one JSON object per line.
pub fn encode_commands(commands: &[Command]) -> Result<Bytes> {
    let mut buf = Vec::with_capacity(commands.len() * 64);
    for cmd in commands {
        serde_json::to_writer(&mut buf, cmd).map_err(|e| {
            CentrixError::Encode(format!("{} command: {e}", cmd.method()))
        })?;
        buf.push(b'\n');
    }
    Ok(Bytes::from(buf))
}

/// Decode a response body into replies, in stream order.
///
/// Any malformed element fails the whole stream; no partial result is returned.
pub fn decode_replies(body: &[u8]) -> Result<Vec<Reply>> {
    let mut replies = Vec::new();
    for (idx, item) in Deserializer::from_slice(body).into_iter::<Reply>().enumerate() {
        let reply = item.map_err(|e| {
            CentrixError::MalformedResponse(format!("reply {idx}: {e}"))
        })?;
        replies.push(reply);
    }
    Ok(replies)
}

/// Decode a response body and require exactly `expected` replies.
pub fn decode_replies_exact(body: &[u8], expected: usize) -> Result<Vec<Reply>> {
    let replies = decode_replies(body)?;
    if replies.len() != expected {
        tracing::warn!(expected, got = replies.len(), "reply count mismatch");
        return Err(CentrixError::MalformedResponse(format!(
            "expected {expected} replies, got {}",
            replies.len()
        )));
    }
    Ok(replies)
}
