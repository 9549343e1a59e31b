//! Typed command variants.
//!
//! Each variant converts to a wire [`Payload`] (`to_payload`) and back
//! (`read`). Reads check that the payload resolves to the variant's command
//! kind and arity; a mismatch is an error, never a panic. Variants own their
//! parsed fields and are constructed fresh per decode.

use crate::error::{ProtocolError, Result};
use crate::protocol::command::{self, ChangePolicy, Channel, CommandArgs, CommandKind};
use crate::protocol::envelope::{outer_type, Envelope, Payload};
use crate::protocol::generator;
use crate::protocol::message::RelayMessage;
use crate::protocol::role::MessageDirection;
use crate::protocol::wave::PulseWaveList;

/// Common surface of the typed command variants.
pub trait PowerCommand: Sized {
    /// Inner command string carried in the envelope `message` field.
    fn command_string(&self) -> String;

    /// Build the wire payload addressed from `client_id` to `target_id`.
    fn to_payload(&self, client_id: &str, target_id: &str) -> Payload;

    /// Read this variant back out of a decoded payload.
    fn read(payload: &Payload) -> Result<Self>;

    /// Full relay message with a direction attached.
    fn to_relay_message(
        &self,
        client_id: &str,
        target_id: &str,
        direction: MessageDirection,
    ) -> RelayMessage {
        RelayMessage::new(self.to_payload(client_id, target_id), direction)
    }
}

fn read_args(payload: &Payload, kind: CommandKind, variant: &'static str) -> Result<CommandArgs> {
    // strength resolves for both forms; arity is checked by the caller
    if payload.command_kind(kind == CommandKind::Pulse) != kind {
        return Err(ProtocolError::NoMatch(variant));
    }
    command::parse_args(kind, &payload.envelope().message)
}

/// Adjust one channel's strength: sent toward the device (3-arg form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthChange {
    pub channel: Channel,
    pub policy: ChangePolicy,
    pub value: u8,
}

impl PowerCommand for StrengthChange {
    fn command_string(&self) -> String {
        format!(
            "strength-{}+{}+{}",
            self.channel.index(),
            self.policy.index(),
            self.value
        )
    }

    fn to_payload(&self, client_id: &str, target_id: &str) -> Payload {
        Payload::Plain(Envelope::new(
            outer_type::MSG,
            client_id,
            target_id,
            self.command_string(),
        ))
    }

    fn read(payload: &Payload) -> Result<Self> {
        match read_args(payload, CommandKind::Strength, "StrengthChange")? {
            CommandArgs::StrengthChange {
                channel,
                policy,
                value,
            } => {
                if !(0..=200).contains(&value) {
                    return Err(ProtocolError::OutOfRange {
                        field: "value",
                        min: 0,
                        max: 200,
                        actual: value,
                    });
                }
                Ok(Self {
                    channel: Channel::from_index(channel)?,
                    policy: ChangePolicy::from_index(policy)?,
                    value: value as u8,
                })
            }
            _ => Err(ProtocolError::ArgCountMismatch {
                kind: "strength",
                expected: "3",
                actual: 4,
            }),
        }
    }
}

/// Current strengths and limits: sent from the device outward (4-arg form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthInfo {
    pub a_value: i64,
    pub b_value: i64,
    pub a_max: i64,
    pub b_max: i64,
}

impl PowerCommand for StrengthInfo {
    fn command_string(&self) -> String {
        format!(
            "strength-{}+{}+{}+{}",
            self.a_value, self.b_value, self.a_max, self.b_max
        )
    }

    fn to_payload(&self, client_id: &str, target_id: &str) -> Payload {
        Payload::Plain(Envelope::new(
            outer_type::MSG,
            client_id,
            target_id,
            self.command_string(),
        ))
    }

    fn read(payload: &Payload) -> Result<Self> {
        match read_args(payload, CommandKind::Strength, "StrengthInfo")? {
            CommandArgs::StrengthInfo {
                a_value,
                b_value,
                a_max,
                b_max,
            } => Ok(Self {
                a_value,
                b_value,
                a_max,
                b_max,
            }),
            _ => Err(ProtocolError::ArgCountMismatch {
                kind: "strength",
                expected: "4",
                actual: 3,
            }),
        }
    }
}

/// Clear one channel's queued waveform data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clear {
    pub channel: Channel,
}

impl PowerCommand for Clear {
    fn command_string(&self) -> String {
        format!("clear-{}", self.channel.index())
    }

    fn to_payload(&self, client_id: &str, target_id: &str) -> Payload {
        Payload::Plain(Envelope::new(
            outer_type::MSG,
            client_id,
            target_id,
            self.command_string(),
        ))
    }

    fn read(payload: &Payload) -> Result<Self> {
        match read_args(payload, CommandKind::Clear, "Clear")? {
            CommandArgs::Clear { channel } => Ok(Self {
                channel: Channel::from_index(channel)?,
            }),
            _ => Err(ProtocolError::NoMatch("Clear")),
        }
    }
}

/// User feedback icon index (0..=10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub value: u8,
}

impl PowerCommand for Feedback {
    fn command_string(&self) -> String {
        format!("feedback-{}", self.value)
    }

    fn to_payload(&self, client_id: &str, target_id: &str) -> Payload {
        Payload::Plain(Envelope::new(
            outer_type::MSG,
            client_id,
            target_id,
            self.command_string(),
        ))
    }

    fn read(payload: &Payload) -> Result<Self> {
        match read_args(payload, CommandKind::Feedback, "Feedback")? {
            CommandArgs::Feedback { value } => {
                if !(0..=10).contains(&value) {
                    return Err(ProtocolError::OutOfRange {
                        field: "feedback",
                        min: 0,
                        max: 10,
                        actual: value,
                    });
                }
                Ok(Self { value: value as u8 })
            }
            _ => Err(ProtocolError::NoMatch("Feedback")),
        }
    }
}

/// Queue waveform data on one channel, with the single timer attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pulse {
    pub channel: Channel,
    pub waves: PulseWaveList,
    pub timer: Option<i64>,
}

impl Pulse {
    /// Build from raw 16-char hex entries.
    pub fn from_hex_entries<S: AsRef<str>>(
        channel: Channel,
        entries: &[S],
        timer: Option<i64>,
    ) -> Result<Self> {
        Ok(Self {
            channel,
            waves: generator::from_hex_strings(entries)?,
            timer,
        })
    }
}

impl PowerCommand for Pulse {
    fn command_string(&self) -> String {
        format!(
            "pulse-{}:{}",
            self.channel.letter(),
            self.waves.to_bracket_string()
        )
    }

    fn to_payload(&self, client_id: &str, target_id: &str) -> Payload {
        Envelope::new(
            outer_type::CLIENT_MSG,
            client_id,
            target_id,
            self.command_string(),
        )
        .with_timer(self.timer)
    }

    fn read(payload: &Payload) -> Result<Self> {
        match read_args(payload, CommandKind::Pulse, "Pulse")? {
            CommandArgs::Pulse { channel, waves } => Ok(Self {
                channel: Channel::from_letter(channel)?,
                waves: generator::from_hex_strings(&waves)?,
                timer: payload.timer(),
            }),
            _ => Err(ProtocolError::NoMatch("Pulse")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn strength_change_round_trip() {
        let cmd = StrengthChange {
            channel: Channel::A,
            policy: ChangePolicy::Increase,
            value: 50,
        };
        assert_eq!(cmd.command_string(), "strength-1+0+50");
        let payload = cmd.to_payload("abc", "xyz");
        assert!(payload.is_valid().is_ok());
        assert_eq!(StrengthChange::read(&payload).unwrap(), cmd);
    }

    #[test]
    fn strength_arity_disambiguation() {
        let info_payload = Payload::Plain(Envelope::new(
            "msg",
            "abc",
            "xyz",
            "strength-10+20+30+40",
        ));
        let info = StrengthInfo::read(&info_payload).unwrap();
        assert_eq!(
            info,
            StrengthInfo {
                a_value: 10,
                b_value: 20,
                a_max: 30,
                b_max: 40
            }
        );
        // the same string is NOT a change command
        assert!(matches!(
            StrengthChange::read(&info_payload),
            Err(ProtocolError::ArgCountMismatch { .. })
        ));
        // and a change string is not an info command
        let change_payload =
            Payload::Plain(Envelope::new("msg", "abc", "xyz", "strength-1+0+50"));
        assert!(matches!(
            StrengthInfo::read(&change_payload),
            Err(ProtocolError::ArgCountMismatch { .. })
        ));
    }

    #[test]
    fn clear_round_trip_and_mismatch() {
        let cmd = Clear {
            channel: Channel::B,
        };
        assert_eq!(cmd.command_string(), "clear-2");
        let payload = cmd.to_payload("abc", "xyz");
        assert_eq!(Clear::read(&payload).unwrap(), cmd);
        // wrong variant yields a no-match error
        assert!(matches!(
            Feedback::read(&payload),
            Err(ProtocolError::NoMatch("Feedback"))
        ));
    }

    #[test]
    fn feedback_round_trip() {
        let cmd = Feedback { value: 7 };
        assert_eq!(cmd.command_string(), "feedback-7");
        let payload = cmd.to_payload("abc", "xyz");
        assert_eq!(Feedback::read(&payload).unwrap(), cmd);
    }

    #[test]
    fn pulse_round_trip_keeps_timer_and_waves() {
        let cmd = Pulse::from_hex_entries(
            Channel::A,
            &["0A1E14805A4A6432", "0A0A0A0A00000000"],
            Some(500),
        )
        .unwrap();
        assert_eq!(
            cmd.command_string(),
            r#"pulse-A:["0A1E14805A4A6432","0A0A0A0A00000000"]"#
        );
        let payload = cmd.to_payload("abc", "xyz");
        assert_eq!(payload.envelope().msg_type, "clientMsg");
        assert_eq!(payload.timer(), Some(500));
        let back = Pulse::read(&payload).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn pulse_read_requires_opt_in_resolution() {
        // a clientMsg payload that is not a pulse stays a client message
        let payload = Payload::SingleTimer {
            base: Envelope::new("clientMsg", "abc", "xyz", "clear-1"),
            timer: None,
        };
        assert!(matches!(
            Pulse::read(&payload),
            Err(ProtocolError::NoMatch("Pulse"))
        ));
    }

    #[test]
    fn pulse_read_rejects_non_hex_alnum_entries() {
        // grammar-valid but not hex-decodable
        let payload = Payload::SingleTimer {
            base: Envelope::new("clientMsg", "abc", "xyz", r#"pulse-A:["ZZZZZZZZZZZZZZZZ"]"#),
            timer: None,
        };
        assert!(matches!(
            Pulse::read(&payload),
            Err(ProtocolError::MalformedHex(_))
        ));
    }
}
