//! Shared error type across PulseLink crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Unified error type used by the codec and the relay.
///
/// Grammar and codec failures are returned as values up to the envelope /
/// typed-command boundary and never coerced to defaults. Nothing here is
/// fatal: the worst outcome is "reject this message", which the transport
/// turns into an `error` reply to the sender.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Outer `type` tag is not one of the known envelope kinds.
    #[error("unknown outer type: {0}")]
    UnknownOuterType(String),
    /// Inner command prefix did not resolve to a known command kind.
    #[error("unknown command kind: {0}")]
    UnknownCommandKind(String),
    /// Argument count does not match the command kind's declared arity.
    #[error("{kind} expects {expected} argument(s), got {actual}")]
    ArgCountMismatch {
        kind: &'static str,
        expected: &'static str,
        actual: usize,
    },
    /// A numeric field fell outside its allowed range.
    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },
    /// Channel designator outside {1,2} / {A,B}.
    #[error("channel must be {expected}, got {actual}")]
    BadChannel {
        expected: &'static str,
        actual: String,
    },
    /// Argument text that should be an integer was not one.
    #[error("{field} is not a valid integer: {text}")]
    BadNumber { field: &'static str, text: String },
    /// Waveform token is not 16 hex characters.
    #[error("malformed waveform hex: {0}")]
    MalformedHex(String),
    /// Pulse waveform list exceeds the 100-entry protocol bound.
    #[error("waveform list too long: {actual} entries (max {max})")]
    ListTooLong { actual: usize, max: usize },
    /// A mandatory wire field was absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// Typed command decode attempted against a non-matching payload.
    #[error("payload does not match {0}")]
    NoMatch(&'static str),
    /// Role `type` tag is not one of the known role kinds.
    #[error("unknown role tag: {0}")]
    UnknownRoleTag(String),
    /// Payload failed its outer-type validity rule.
    #[error("invalid {outer_type} payload: {reason}")]
    InvalidPayload {
        outer_type: String,
        reason: String,
    },
    /// Bad generator input (non-positive duration, mismatched sample arrays).
    #[error("invalid generator argument: {0}")]
    BadGeneratorArg(String),
    /// JSON text rejected by serde at the adapter boundary.
    #[error("bad json: {0}")]
    BadJson(String),
    /// Relay configuration rejected at load time.
    #[error("invalid config: {0}")]
    Config(String),
}
