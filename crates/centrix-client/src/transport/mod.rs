//! Transport layer: the injected HTTP capability and endpoint resolution.
//!
//! - [`http`]: request/response types and the `HttpTransport` trait
//! - [`reqwest_transport`]: default `HttpTransport` backed by `reqwest`
//! - [`endpoint`]: static address or per-call resolver

pub mod endpoint;
pub mod http;
pub mod reqwest_transport;

pub use endpoint::{Endpoint, EndpointResolver};
pub use http::{HttpRequest, HttpResponse, HttpTransport};
pub use reqwest_transport::ReqwestTransport;
