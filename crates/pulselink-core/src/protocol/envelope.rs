//! Wire envelope and its outer-type validity rules.
//!
//! The envelope is the protocol data unit: an outer discriminant, two
//! participant ids, and one `message` string that carries either a status
//! code or an inner command. Construction never validates; callers invoke
//! [`Envelope::is_valid`] explicitly before trusting a payload.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::error::{ProtocolError, Result};
use crate::protocol::command::{self, CommandKind};
use crate::protocol::status::StatusCode;

/// Outer `type` tags of the wire envelope.
pub mod outer_type {
    pub const HEARTBEAT: &str = "heartbeat";
    pub const BIND: &str = "bind";
    pub const BREAK: &str = "break";
    pub const MSG: &str = "msg";
    pub const ERROR: &str = "error";
    pub const CLIENT_MSG: &str = "clientMsg";
}

/// The protocol data unit. Owns its strings; no shared mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub msg_type: String,
    pub client_id: String,
    pub target_id: String,
    pub message: String,
}

impl Envelope {
    pub fn new(
        msg_type: impl Into<String>,
        client_id: impl Into<String>,
        target_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            msg_type: msg_type.into(),
            client_id: client_id.into(),
            target_id: target_id.into(),
            message: message.into(),
        }
    }

    /// Attach the single numeric timer used by `clientMsg` traffic.
    pub fn with_timer(self, timer: Option<i64>) -> Payload {
        Payload::SingleTimer { base: self, timer }
    }

    fn invalid(&self, reason: impl Into<String>) -> ProtocolError {
        ProtocolError::InvalidPayload {
            outer_type: self.msg_type.clone(),
            reason: reason.into(),
        }
    }

    /// Check the outer-type-specific validity rule.
    ///
    /// | outer type | rule |
    /// |---|---|
    /// | heartbeat | clientId non-empty, message a known status code |
    /// | bind | message == "targetId": clientId non-empty, targetId empty (bind request placeholder); else all four non-empty |
    /// | msg | clientId & targetId non-empty, message passes grammar validation |
    /// | break, clientMsg | clientId, targetId, message non-empty |
    /// | error | message non-empty |
    /// | anything else | invalid |
    pub fn is_valid(&self) -> Result<()> {
        match self.msg_type.as_str() {
            outer_type::HEARTBEAT => {
                if self.client_id.is_empty() {
                    return Err(self.invalid("clientId must not be empty"));
                }
                if !StatusCode::is_valid_code(&self.message) {
                    return Err(self.invalid(format!("not a status code: {}", self.message)));
                }
                Ok(())
            }
            outer_type::BIND => {
                // "targetId" is the bind-request placeholder: the client does
                // not yet know its peer
                if self.message == "targetId" {
                    if self.client_id.is_empty() {
                        return Err(self.invalid("clientId must not be empty"));
                    }
                    if !self.target_id.is_empty() {
                        return Err(self.invalid("bind request must leave targetId empty"));
                    }
                    Ok(())
                } else {
                    self.require_all_fields()
                }
            }
            outer_type::MSG => {
                if self.client_id.is_empty() || self.target_id.is_empty() {
                    return Err(self.invalid("clientId and targetId must not be empty"));
                }
                command::validate(&self.message)
            }
            outer_type::BREAK | outer_type::CLIENT_MSG => self.require_all_fields(),
            outer_type::ERROR => {
                if self.message.is_empty() {
                    return Err(self.invalid("message must not be empty"));
                }
                Ok(())
            }
            other => Err(ProtocolError::UnknownOuterType(other.to_string())),
        }
    }

    fn require_all_fields(&self) -> Result<()> {
        if self.client_id.is_empty() || self.target_id.is_empty() || self.message.is_empty() {
            return Err(self.invalid("clientId, targetId and message must not be empty"));
        }
        Ok(())
    }

    /// Resolve the command kind of this envelope's message.
    pub fn command_kind(&self, may_be_pulse: bool) -> CommandKind {
        CommandKind::resolve(&self.msg_type, &self.message, may_be_pulse)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Envelope", 4)?;
        st.serialize_field("type", &self.msg_type)?;
        st.serialize_field("clientId", &self.client_id)?;
        st.serialize_field("targetId", &self.target_id)?;
        st.serialize_field("message", &self.message)?;
        st.end()
    }
}

/// Concrete wire representations of the envelope.
///
/// The outer `type` tag selects the representation during decoding; there is
/// no self-describing type tag beyond it. `DualTimer` is a legacy wire form:
/// it is decoded for backward compatibility but never produced by encode
/// paths, and new code must not construct it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// heartbeat / bind / break / msg / error.
    Plain(Envelope),
    /// clientMsg with its single numeric timer attachment.
    SingleTimer { base: Envelope, timer: Option<i64> },
    /// Deprecated dual-timer attachment, kept for legacy decode only.
    #[deprecated(note = "legacy wire form, decode-only; use SingleTimer")]
    DualTimer {
        base: Envelope,
        timer_a: Option<i64>,
        timer_b: Option<i64>,
    },
}

impl Payload {
    #[allow(deprecated)]
    pub fn envelope(&self) -> &Envelope {
        match self {
            Payload::Plain(env) => env,
            Payload::SingleTimer { base, .. } => base,
            Payload::DualTimer { base, .. } => base,
        }
    }

    /// The single timer attachment, when present.
    pub fn timer(&self) -> Option<i64> {
        match self {
            Payload::SingleTimer { timer, .. } => *timer,
            _ => None,
        }
    }

    /// Validity is decided by the carried envelope alone; attachments are
    /// unconstrained.
    pub fn is_valid(&self) -> Result<()> {
        self.envelope().is_valid()
    }

    pub fn command_kind(&self, may_be_pulse: bool) -> CommandKind {
        self.envelope().command_kind(may_be_pulse)
    }
}

impl Serialize for Payload {
    #[allow(deprecated)]
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Payload::Plain(env) => env.serialize(serializer),
            Payload::SingleTimer { base, timer } => {
                let mut st = serializer.serialize_struct("Envelope", 5)?;
                st.serialize_field("type", &base.msg_type)?;
                st.serialize_field("clientId", &base.client_id)?;
                st.serialize_field("targetId", &base.target_id)?;
                st.serialize_field("message", &base.message)?;
                st.serialize_field("timer", timer)?;
                st.end()
            }
            Payload::DualTimer {
                base,
                timer_a,
                timer_b,
            } => {
                let mut st = serializer.serialize_struct("Envelope", 6)?;
                st.serialize_field("type", &base.msg_type)?;
                st.serialize_field("clientId", &base.client_id)?;
                st.serialize_field("targetId", &base.target_id)?;
                st.serialize_field("message", &base.message)?;
                st.serialize_field("timer_A", timer_a)?;
                st.serialize_field("timer_B", timer_b)?;
                st.end()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn heartbeat_requires_status_code() {
        let ok = Envelope::new("heartbeat", "abc", "", "200");
        assert!(ok.is_valid().is_ok());
        let bad = Envelope::new("heartbeat", "abc", "", "hello");
        assert!(matches!(
            bad.is_valid(),
            Err(ProtocolError::InvalidPayload { .. })
        ));
        let no_client = Envelope::new("heartbeat", "", "", "200");
        assert!(no_client.is_valid().is_err());
    }

    #[test]
    fn bind_placeholder_rule() {
        // bind request: message literally "targetId", empty targetId
        let request = Envelope::new("bind", "abc", "", "targetId");
        assert!(request.is_valid().is_ok());
        let bad_request = Envelope::new("bind", "abc", "xyz", "targetId");
        assert!(bad_request.is_valid().is_err());
        // bind response: all four fields populated
        let response = Envelope::new("bind", "abc", "xyz", "200");
        assert!(response.is_valid().is_ok());
        let empty_target = Envelope::new("bind", "abc", "", "200");
        assert!(empty_target.is_valid().is_err());
    }

    #[test]
    fn msg_delegates_to_grammar() {
        let ok = Envelope::new("msg", "abc", "xyz", "strength-1+0+50");
        assert!(ok.is_valid().is_ok());
        let bad_grammar = Envelope::new("msg", "abc", "xyz", "clear-3");
        assert!(matches!(
            bad_grammar.is_valid(),
            Err(ProtocolError::BadChannel { .. })
        ));
        let no_target = Envelope::new("msg", "abc", "", "clear-1");
        assert!(matches!(
            no_target.is_valid(),
            Err(ProtocolError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn client_msg_requires_fields_only() {
        // inner grammar is not checked until a typed variant is read
        let env = Envelope::new("clientMsg", "abc", "xyz", "anything");
        assert!(env.is_valid().is_ok());
        let empty = Envelope::new("clientMsg", "abc", "xyz", "");
        assert!(empty.is_valid().is_err());
    }

    #[test]
    fn error_requires_message_only() {
        assert!(Envelope::new("error", "", "", "500").is_valid().is_ok());
        assert!(Envelope::new("error", "", "", "").is_valid().is_err());
    }

    #[test]
    fn unknown_outer_type_is_invalid() {
        let env = Envelope::new("gossip", "a", "b", "c");
        assert!(matches!(
            env.is_valid(),
            Err(ProtocolError::UnknownOuterType(_))
        ));
    }

    #[test]
    fn single_timer_serializes_timer_field() {
        let payload = Envelope::new("clientMsg", "a", "b", "clear-1").with_timer(Some(500));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["timer"], 500);
        assert_eq!(json["type"], "clientMsg");
    }

    #[test]
    fn plain_serializes_without_timer() {
        let payload = Payload::Plain(Envelope::new("msg", "a", "b", "clear-1"));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("timer").is_none());
    }
}
