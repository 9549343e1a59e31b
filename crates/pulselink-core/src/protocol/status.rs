//! Protocol status-code registry.
//!
//! Status codes ride in the envelope `message` field for `heartbeat` and
//! `error` traffic. They are distinct from command-grammar errors: the
//! grammar reports `ProtocolError` values, which the relay maps onto this
//! registry when replying to a peer.

/// Closed set of protocol-level outcome/error codes (stable wire values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200: request handled.
    Success,
    /// 209: the bound peer disconnected.
    PeerDisconnected,
    /// 210: QR code carried an invalid client id.
    InvalidQrClientId,
    /// 211: waited too long for the server binding message.
    BindingTimeout,
    /// 400: tried to bind an id that is already bound.
    IdAlreadyBound,
    /// 401: target client does not exist.
    TargetNotFound,
    /// 402: sender and target are not a bound pair.
    NotBoundPair,
    /// 403: payload was not standard JSON.
    NonStandardJson,
    /// 404: recipient is offline.
    RecipientOffline,
    /// 405: message exceeded the length limit.
    MessageTooLong,
    /// 406: no channel chosen.
    NoChannelChosen,
    /// 500: internal relay error.
    InternalError,
    /// 501: invalid request.
    InvalidRequest,
    /// 502: operation not supported.
    UnsupportedOperation,
    /// -1: not a recognized code.
    Invalid,
}

impl StatusCode {
    /// Wire string for this code.
    pub fn as_code(self) -> &'static str {
        match self {
            StatusCode::Success => "200",
            StatusCode::PeerDisconnected => "209",
            StatusCode::InvalidQrClientId => "210",
            StatusCode::BindingTimeout => "211",
            StatusCode::IdAlreadyBound => "400",
            StatusCode::TargetNotFound => "401",
            StatusCode::NotBoundPair => "402",
            StatusCode::NonStandardJson => "403",
            StatusCode::RecipientOffline => "404",
            StatusCode::MessageTooLong => "405",
            StatusCode::NoChannelChosen => "406",
            StatusCode::InternalError => "500",
            StatusCode::InvalidRequest => "501",
            StatusCode::UnsupportedOperation => "502",
            StatusCode::Invalid => "-1",
        }
    }

    /// Resolve a wire string; anything unrecognized is `Invalid`.
    pub fn from_code(code: &str) -> StatusCode {
        match code {
            "200" => StatusCode::Success,
            "209" => StatusCode::PeerDisconnected,
            "210" => StatusCode::InvalidQrClientId,
            "211" => StatusCode::BindingTimeout,
            "400" => StatusCode::IdAlreadyBound,
            "401" => StatusCode::TargetNotFound,
            "402" => StatusCode::NotBoundPair,
            "403" => StatusCode::NonStandardJson,
            "404" => StatusCode::RecipientOffline,
            "405" => StatusCode::MessageTooLong,
            "406" => StatusCode::NoChannelChosen,
            "500" => StatusCode::InternalError,
            "501" => StatusCode::InvalidRequest,
            "502" => StatusCode::UnsupportedOperation,
            _ => StatusCode::Invalid,
        }
    }

    /// True if `code` maps to a real registry entry.
    pub fn is_valid_code(code: &str) -> bool {
        StatusCode::from_code(code) != StatusCode::Invalid
    }
}
