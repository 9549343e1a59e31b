//! PulseLink core: transport-agnostic protocol codec for the power-box
//! device-control protocol.
//!
//! This crate defines the wire envelope, the inner delimited command grammar,
//! the hex waveform codec and generators, and the typed command variants
//! shared by the relay and any client tooling. It intentionally carries no
//! transport or runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ProtocolError`/`Result` so processes
//! consuming relayed traffic do not crash on malformed input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ProtocolError, Result};
