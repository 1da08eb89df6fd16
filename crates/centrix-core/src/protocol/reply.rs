//! Reply envelope (one line of the response stream).
//!
//! Replies are correlated with commands by position only. A reply carrying an
//! `error` has no meaningful `result`; decoding short-circuits to the error.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use thiserror::Error;

use crate::error::{CentrixError, Result};
use crate::protocol::results::CommandResult;

/// Error reported by the server for a single command.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("api error {code}: {message}")]
pub struct ApiError {
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

/// Server reply to one command.
#[derive(Debug, Deserialize)]
pub struct Reply {
    /// Echoed method name, when the server includes it.
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub error: Option<ApiError>,
    /// Result payload, kept raw until a decoder asks for a concrete shape.
    #[serde(default)]
    pub result: Option<Box<RawValue>>,
}

impl Reply {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Surface the server error, if any. Used for commands without a result body.
    pub fn check(&self) -> Result<()> {
        match &self.error {
            Some(e) => Err(CentrixError::Api(e.clone())),
            None => Ok(()),
        }
    }

    /// Decode the result payload into the record of method `R::METHOD`.
    ///
    /// Server errors win over decoding. A missing or `null` result, or an
    /// echoed method that differs from `R::METHOD`, is a decode failure.
    pub fn decode<R: CommandResult>(&self) -> Result<R> {
        self.check()?;
        let method = R::METHOD.as_str();
        if let Some(echoed) = self.method.as_deref() {
            if !echoed.is_empty() && echoed != method {
                return Err(CentrixError::Decode(format!(
                    "expected {method} reply, got {echoed}"
                )));
            }
        }
        let raw = self
            .result
            .as_ref()
            .ok_or_else(|| CentrixError::Decode(format!("{method} reply has no result")))?;
        serde_json::from_str(raw.get())
            .map_err(|e| CentrixError::Decode(format!("{method} result: {e}")))
    }
}
