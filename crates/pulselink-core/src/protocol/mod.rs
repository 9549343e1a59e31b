//! Protocol modules for the power-box wire format.
//!
//! The wire format is two-layered: a JSON envelope (outer discriminant,
//! participant ids, one string `message` field) whose `message` carries a
//! delimited command grammar that depends on the command name and direction.
//!
//! All parsers are panic-free: malformed input is reported as
//! `ProtocolError` instead of panicking or indexing raw strings, keeping the
//! relay resilient to hostile traffic.

pub mod codec;
pub mod command;
pub mod envelope;
pub mod generator;
pub mod message;
pub mod msg;
pub mod role;
pub mod status;
pub mod wave;
