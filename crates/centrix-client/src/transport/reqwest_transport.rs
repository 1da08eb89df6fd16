//! Default HTTP capability over `reqwest` (rustls, pooled connections).

use std::time::Duration;

use async_trait::async_trait;

use centrix_core::error::{CentrixError, Result};

use crate::transport::http::{HttpRequest, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a pooled client with a per-request timeout.
    pub fn new(timeout: Duration, max_idle_per_host: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(max_idle_per_host)
            .build()
            .map_err(|e| CentrixError::Transport(format!("http client build failed: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap a caller-configured `reqwest::Client`.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn map_err(e: reqwest::Error) -> CentrixError {
    if e.is_timeout() {
        CentrixError::DeadlineExceeded
    } else {
        CentrixError::Transport(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, req: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.post(&req.url).body(req.body);
        for (name, value) in &req.headers {
            builder = builder.header(*name, value.as_str());
        }
        let resp = builder.send().await.map_err(map_err)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(map_err)?;
        Ok(HttpResponse { status, body })
    }
}
