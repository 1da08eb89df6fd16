//! Top-level facade crate for centrix.
//!
//! Re-exports the protocol core and the HTTP client so users can depend on a single crate.

pub mod core {
    pub use centrix_core::*;
}

pub mod client {
    pub use centrix_client::*;
}

pub use centrix_client::{CallContext, Client, ClientConfig, Pipe};
pub use centrix_core::{CentrixError, Result};
