//! Relay message: a wire payload plus its message direction.

use serde::Serialize;

use crate::error::Result;
use crate::protocol::codec::WireCodec;
use crate::protocol::command::CommandKind;
use crate::protocol::envelope::Payload;
use crate::protocol::role::MessageDirection;

/// Canned reply the transport sends when asked to serialize an invalid
/// payload.
pub const INVALID_WIRE_JSON: &str =
    r#"{"type":"error","clientId":"","targetId":"","message":""}"#;

/// A decoded/encoded message with its `(sender, receiver)` direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayMessage {
    pub direction: MessageDirection,
    pub payload: Payload,
}

impl RelayMessage {
    pub fn new(payload: Payload, direction: MessageDirection) -> Self {
        Self { direction, payload }
    }

    pub fn command_kind(&self, may_be_pulse: bool) -> CommandKind {
        self.payload.command_kind(may_be_pulse)
    }

    /// Payload-only wire JSON, as handed to the peer. An invalid payload
    /// degrades to the canned `error` envelope instead of leaking garbage.
    pub fn to_wire_json(&self, codec: &WireCodec) -> String {
        if self.payload.is_valid().is_err() {
            return INVALID_WIRE_JSON.to_string();
        }
        codec
            .encode_payload(&self.payload)
            .unwrap_or_else(|_| INVALID_WIRE_JSON.to_string())
    }

    /// Full `{direction, payload}` JSON used between relay components.
    pub fn to_relay_json(&self, codec: &WireCodec) -> Result<String> {
        codec.encode_message(self)
    }
}
