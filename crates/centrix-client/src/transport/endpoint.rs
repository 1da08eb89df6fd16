//! API endpoint resolution.
//!
//! A resolver, when present, is called right before every send and its
//! answer overrides the static address. Failures are returned as-is to the
//! caller; there is no retry.

use std::sync::Arc;

use centrix_core::error::{CentrixError, Result};

/// Supplies the API address for the next call.
pub trait EndpointResolver: Send + Sync {
    fn resolve(&self) -> Result<String>;
}

impl<F> EndpointResolver for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn resolve(&self) -> Result<String> {
        self()
    }
}

#[derive(Clone)]
pub enum Endpoint {
    Static(String),
    Dynamic(Arc<dyn EndpointResolver>),
}

impl Endpoint {
    pub fn resolve(&self) -> Result<String> {
        match self {
            Endpoint::Static(addr) => Ok(addr.clone()),
            Endpoint::Dynamic(resolver) => resolver.resolve().map_err(|e| {
                tracing::warn!(error = %e, "endpoint resolver failed");
                match e {
                    CentrixError::Endpoint(msg) => CentrixError::Endpoint(msg),
                    other => CentrixError::Endpoint(other.to_string()),
                }
            }),
        }
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Static(addr) => f.debug_tuple("Static").field(addr).finish(),
            Endpoint::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
