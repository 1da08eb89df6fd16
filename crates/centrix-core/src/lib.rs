//! centrix core: transport-agnostic protocol primitives and the shared error type.
//!
//! This crate defines the wire-level contracts of the server API: the command
//! envelope and its typed per-method requests, option builders, replies, typed
//! results, and the newline-delimited JSON codec. It carries no HTTP or runtime
//! dependencies so it can be reused by any transport.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `CentrixError`/`Result` so a bad server reply
//! never crashes the calling process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{CentrixError, ErrorCode, Result};
