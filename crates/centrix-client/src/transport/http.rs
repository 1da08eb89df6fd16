use async_trait::async_trait;
use bytes::Bytes;

use centrix_core::error::Result;

/// One HTTP POST, fully built by the client.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Bytes,
}

/// Raw HTTP answer. Status interpretation is left to the client.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Pluggable HTTP capability shared by every call of a client.
///
/// Implementations move bytes only: they must not interpret the body and
/// must report network failures as `CentrixError::Transport`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(&self, req: HttpRequest) -> Result<HttpResponse>;
}
