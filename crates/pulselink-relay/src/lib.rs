//! PulseLink relay library: the session-layer-facing surface of the codec.
//!
//! This crate wires the core codec into handler hooks a transport can drive:
//! inbound JSON goes through the [`router`], which decodes, validates,
//! resolves the command kind, and invokes the matching [`handler`] hook.
//! The WebSocket loop, heartbeat scheduling, and connection lifecycle stay
//! with the embedding process; this crate contains no transport code.

pub mod config;
pub mod handler;
pub mod router;

pub use config::RelayConfig;
pub use handler::{ClientHandler, ServerHandler};
pub use router::{ClientRouter, ServerRouter, DEFAULT_PULSE_DELAY_MS};
