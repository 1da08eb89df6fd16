//! centrix HTTP API client.
//!
//! This crate wires the command pipe, the call context, the HTTP transport and
//! the reply decoders into a client for the server's administrative API. It is
//! consumed by applications, by the demo binary (`main.rs`) and by integration
//! tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod client;
pub mod config;
pub mod context;
pub mod pipe;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use context::{CallContext, CancelHandle};
pub use pipe::Pipe;
pub use transport::{
    Endpoint, EndpointResolver, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport,
};
