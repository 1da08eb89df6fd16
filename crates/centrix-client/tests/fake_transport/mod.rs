//! Recording `HttpTransport` double shared by client tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

use centrix_client::{HttpRequest, HttpResponse, HttpTransport};
use centrix_core::error::Result;

type Responder = Box<dyn Fn(&HttpRequest) -> HttpResponse + Send + Sync>;

pub struct FakeTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responder: Responder,
    delay: Option<Duration>,
}

impl FakeTransport {
    pub fn new(responder: impl Fn(&HttpRequest) -> HttpResponse + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
            delay: None,
        })
    }

    /// Always answer 200 with `body`.
    pub fn body(body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| HttpResponse {
            status: 200,
            body: Bytes::from(body.clone()),
        })
    }

    pub fn status(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| HttpResponse {
            status,
            body: Bytes::from(body.clone()),
        })
    }

    /// Answer every command line with `reply`.
    pub fn per_command(reply: &str) -> Arc<Self> {
        let reply = reply.to_string();
        Self::new(move |req| {
            let n = request_lines(req).len();
            let body: String = (0..n).map(|_| format!("{reply}\n")).collect();
            HttpResponse {
                status: 200,
                body: Bytes::from(body),
            }
        })
    }

    pub fn slow(delay: Duration, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(move |_| HttpResponse {
                status: 200,
                body: Bytes::from(body.clone()),
            }),
            delay: Some(delay),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }

    pub fn last_lines(&self) -> Vec<Value> {
        request_lines(&self.last_request())
    }
}

pub fn request_lines(req: &HttpRequest) -> Vec<Value> {
    let text = std::str::from_utf8(&req.body).unwrap();
    text.lines().map(|l| serde_json::from_str(l).unwrap()).collect()
}

pub fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn post(&self, req: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(req.clone());
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        Ok((self.responder)(&req))
    }
}
