//! Polymorphic wire (de)serialization.
//!
//! The wire format carries only the outer `type` string, so decoding must
//! branch on that tag to pick the concrete [`Payload`] representation. The
//! dispatch table is built once as an immutable value and passed explicitly
//! into every decode call; there is no global codec state.

use serde_json::Value;

use crate::error::{ProtocolError, Result};
use crate::protocol::envelope::{outer_type, Envelope, Payload};
use crate::protocol::message::RelayMessage;
use crate::protocol::role::{MessageDirection, Role, RoleKind};

type DecodeFn = fn(&Value) -> Result<Payload>;

/// Immutable decode registry: outer tag mapped to its payload decoder.
pub struct WireCodec {
    registry: Vec<(&'static str, DecodeFn)>,
}

impl Default for WireCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl WireCodec {
    pub fn new() -> Self {
        Self {
            registry: vec![
                (outer_type::HEARTBEAT, decode_plain as DecodeFn),
                (outer_type::BIND, decode_plain),
                (outer_type::BREAK, decode_plain),
                (outer_type::MSG, decode_plain),
                (outer_type::ERROR, decode_plain),
                (outer_type::CLIENT_MSG, decode_with_timer),
            ],
        }
    }

    /// Decode a wire payload from JSON text.
    pub fn decode_payload(&self, json: &str) -> Result<Payload> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ProtocolError::BadJson(e.to_string()))?;
        self.decode_payload_value(&value)
    }

    /// Decode a wire payload from an already-parsed JSON value.
    pub fn decode_payload_value(&self, value: &Value) -> Result<Payload> {
        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ProtocolError::MissingField("type"))?;
        let decode = self
            .registry
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, decode)| *decode)
            .ok_or_else(|| ProtocolError::UnknownOuterType(tag.to_string()))?;
        decode(value)
    }

    /// Serialize a payload to its wire JSON.
    pub fn encode_payload(&self, payload: &Payload) -> Result<String> {
        serde_json::to_string(payload).map_err(|e| ProtocolError::BadJson(e.to_string()))
    }

    /// Decode a full relay message (`{direction, payload}`).
    pub fn decode_message(&self, json: &str) -> Result<RelayMessage> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ProtocolError::BadJson(e.to_string()))?;
        let payload = self.decode_payload_value(
            value
                .get("payload")
                .ok_or(ProtocolError::MissingField("payload"))?,
        )?;
        let direction = decode_direction(
            value
                .get("direction")
                .ok_or(ProtocolError::MissingField("direction"))?,
        )?;
        Ok(RelayMessage::new(payload, direction))
    }

    /// Serialize a full relay message.
    pub fn encode_message(&self, message: &RelayMessage) -> Result<String> {
        serde_json::to_string(message).map_err(|e| ProtocolError::BadJson(e.to_string()))
    }
}

fn string_field(value: &Value, field: &'static str) -> Result<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ProtocolError::MissingField(field))
}

fn envelope_from_value(value: &Value) -> Result<Envelope> {
    Ok(Envelope {
        msg_type: string_field(value, "type")?,
        client_id: string_field(value, "clientId")?,
        target_id: string_field(value, "targetId")?,
        message: string_field(value, "message")?,
    })
}

fn decode_plain(value: &Value) -> Result<Payload> {
    Ok(Payload::Plain(envelope_from_value(value)?))
}

#[allow(deprecated)]
fn decode_with_timer(value: &Value) -> Result<Payload> {
    let base = envelope_from_value(value)?;
    // legacy dual-timer wire form: accepted on decode, never re-encoded
    if value.get("timer_A").is_some() || value.get("timer_B").is_some() {
        return Ok(Payload::DualTimer {
            base,
            timer_a: value.get("timer_A").and_then(Value::as_i64),
            timer_b: value.get("timer_B").and_then(Value::as_i64),
        });
    }
    let timer = value.get("timer").and_then(Value::as_i64);
    Ok(Payload::SingleTimer { base, timer })
}

fn decode_role(value: &Value) -> Result<Role> {
    let name = string_field(value, "name")?;
    let tag = string_field(value, "type")?;
    Ok(Role::new(RoleKind::from_tag(&tag)?, name))
}

fn decode_direction(value: &Value) -> Result<MessageDirection> {
    let sender = decode_role(
        value
            .get("sender")
            .ok_or(ProtocolError::MissingField("sender"))?,
    )?;
    let receiver = decode_role(
        value
            .get("receiver")
            .ok_or(ProtocolError::MissingField("receiver"))?,
    )?;
    Ok(MessageDirection::new(sender, receiver))
}
